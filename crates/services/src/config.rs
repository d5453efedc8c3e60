/// Deployment configuration for a training session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingConfig {
    email_domain: String,
}

impl TrainingConfig {
    /// Configuration requiring trainee emails to end with `email_domain`.
    #[must_use]
    pub fn new(email_domain: impl Into<String>) -> Self {
        Self {
            email_domain: email_domain.into(),
        }
    }

    /// Required organizational email suffix for intake validation.
    #[must_use]
    pub fn email_domain(&self) -> &str {
        &self.email_domain
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::new("@myfiducia.com")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_domain_matches_the_organization() {
        assert_eq!(TrainingConfig::default().email_domain(), "@myfiducia.com");
    }

    #[test]
    fn domain_is_configurable() {
        let config = TrainingConfig::new("@example.org");
        assert_eq!(config.email_domain(), "@example.org");
    }
}
