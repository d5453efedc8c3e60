use thiserror::Error;

/// Errors raised by trainee intake validation.
///
/// These are user-facing: the messages are shown verbatim and the session
/// state is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IntakeError {
    #[error("please enter your name")]
    EmptyName,

    #[error("please enter your email")]
    EmptyEmail,

    #[error("invalid email: you must use your official '{domain}' address")]
    WrongDomain { domain: String },
}

/// Identity of the trainee running a session, captured once at intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraineeProfile {
    name: String,
    email: String,
}

impl TraineeProfile {
    /// Validate and capture trainee identity.
    ///
    /// The email must end with `required_domain` (the organizational suffix,
    /// a deployment parameter). Inputs are trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError` for an empty name, an empty email, or an email
    /// outside the required domain.
    pub fn new(name: &str, email: &str, required_domain: &str) -> Result<Self, IntakeError> {
        let name = name.trim();
        let email = email.trim();

        if name.is_empty() {
            return Err(IntakeError::EmptyName);
        }
        if email.is_empty() {
            return Err(IntakeError::EmptyEmail);
        }
        if !email.ends_with(required_domain) {
            return Err(IntakeError::WrongDomain {
                domain: required_domain.to_owned(),
            });
        }

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = "@myfiducia.com";

    #[test]
    fn valid_identity_is_captured_trimmed() {
        let profile = TraineeProfile::new("  Jane Doe ", " jane.doe@myfiducia.com ", DOMAIN).unwrap();
        assert_eq!(profile.name(), "Jane Doe");
        assert_eq!(profile.email(), "jane.doe@myfiducia.com");
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = TraineeProfile::new("  ", "a@myfiducia.com", DOMAIN).unwrap_err();
        assert_eq!(err, IntakeError::EmptyName);
    }

    #[test]
    fn empty_email_is_rejected() {
        let err = TraineeProfile::new("Jane", "", DOMAIN).unwrap_err();
        assert_eq!(err, IntakeError::EmptyEmail);
    }

    #[test]
    fn foreign_domain_is_rejected() {
        let err = TraineeProfile::new("Jane", "a@wrongdomain.com", DOMAIN).unwrap_err();
        assert!(matches!(err, IntakeError::WrongDomain { .. }));
    }

    #[test]
    fn domain_suffix_is_configurable() {
        assert!(TraineeProfile::new("Jane", "a@example.org", "@example.org").is_ok());
    }
}
