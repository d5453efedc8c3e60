use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised while producing a certificate document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CertificateError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("certificate rendering failed: {0}")]
    Render(String),
}

/// Everything a certificate document needs: who passed, with what score,
/// out of what maximum, and when it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateData {
    pub name: String,
    pub score: u32,
    pub max_score: u32,
    pub issued_on: DateTime<Utc>,
}

/// Seam for certificate document generation. The actual layout engine (PDF
/// or otherwise) is an external collaborator behind this trait.
pub trait CertificateRenderer {
    /// Render the certificate to a document byte stream.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError` if the document cannot be produced.
    fn render(&self, data: &CertificateData) -> Result<Vec<u8>, CertificateError>;
}

/// Plain-text certificate for terminal display and file export.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCertificate;

impl CertificateRenderer for TextCertificate {
    fn render(&self, data: &CertificateData) -> Result<Vec<u8>, CertificateError> {
        let date = data.issued_on.format("%d %B %Y");
        let body = format!(
            "==============================================\n\
                       CERTIFICATE OF COMPLETION\n\
             ==============================================\n\
             \n\
             This certifies that\n\
             \n\
                 {}\n\
             \n\
             has successfully completed the training.\n\
             \n\
             Score: {} / {}\n\
             Date:  {}\n\
             ==============================================\n",
            data.name, data.score, data.max_score, date
        );
        Ok(body.into_bytes())
    }
}
