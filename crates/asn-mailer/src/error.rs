use thiserror::Error;

/// Delivery failures.
#[derive(Debug, Error)]
pub enum MailError {
    /// Message has neither direct nor blind recipients.
    #[error("message '{0}' has no recipients")]
    Empty(String),

    /// The backend refused the message.
    #[error("message rejected: {0}")]
    Rejected(String),

    /// The relay could not be reached.
    #[error("relay transport: {0}")]
    Http(#[from] reqwest::Error),
}
