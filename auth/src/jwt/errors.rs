use thiserror::Error;

/// Why an access token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    Malformed,
    UnsupportedAlgorithm,
    BadSignature,
    Expired,
    WrongIssuer,
}

impl std::fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            TokenRejection::Malformed => "malformed",
            TokenRejection::UnsupportedAlgorithm => "unsupported algorithm",
            TokenRejection::BadSignature => "signature mismatch",
            TokenRejection::Expired => "expired",
            TokenRejection::WrongIssuer => "unexpected issuer",
        };
        f.write_str(reason)
    }
}

/// Error type for access token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessTokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid: {0}")]
    TokenInvalid(TokenRejection),

    #[error("Token subject is not a user identifier: {0}")]
    SubjectInvalid(String),
}
