use thiserror::Error;

/// Reasons a token can not be issued or a request can not be authenticated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    Missing,
    #[error("Malformed token")]
    Malformed,
    #[error("Token expired")]
    Expired,
    #[error("Invalid token signature")]
    BadSignature,
    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// True for rejections of a presented token, false for server-side failures.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, AuthError::Signing(_))
    }
}
