use thiserror::Error;

/// Error type for `Authorization` header parsing.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("Authorization header is missing")]
    MissingHeader,

    #[error("Authorization header does not use the expected scheme")]
    MalformedHeader,
}

/// Error type for webhook API key validation.
///
/// Every variant means the caller is unauthorized.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ApiKeyError {
    #[error("API key header is missing")]
    MissingHeader,

    #[error("API key header is malformed")]
    MalformedHeader,

    #[error("API key does not match")]
    Mismatch,
}

impl From<HeaderError> for ApiKeyError {
    fn from(err: HeaderError) -> Self {
        match err {
            HeaderError::MissingHeader => ApiKeyError::MissingHeader,
            HeaderError::MalformedHeader => ApiKeyError::MalformedHeader,
        }
    }
}
