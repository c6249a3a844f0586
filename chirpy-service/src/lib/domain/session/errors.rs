use thiserror::Error;

use crate::domain::session::models::RefreshTokenRejection;
use crate::user::errors::UserError;

/// Coarse classification used by transports to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input; never reached the credential checks
    Validation,
    /// Bad credentials or an invalid, expired, revoked or unknown token
    AuthFailure,
    /// A hashing, signing, entropy or storage primitive failed
    InternalFault,
}

/// Error for session operations (login, refresh, revoke, authorize).
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Refresh token rejected: {0}")]
    RefreshTokenRejected(RefreshTokenRejection),

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Access token rejected: {0}")]
    AccessTokenRejected(auth::AccessTokenError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Access token signing failed: {0}")]
    Signing(String),

    #[error("Refresh token generation failed: {0}")]
    TokenGeneration(#[from] auth::RefreshTokenError),

    #[error("User error: {0}")]
    User(#[from] UserError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::InvalidCredentials
            | SessionError::RefreshTokenRejected(_)
            | SessionError::RefreshTokenNotFound
            | SessionError::AccessTokenRejected(_) => ErrorKind::AuthFailure,
            SessionError::User(UserError::InvalidEmail(_) | UserError::InvalidUserId(_)) => {
                ErrorKind::Validation
            }
            SessionError::Password(_)
            | SessionError::Signing(_)
            | SessionError::TokenGeneration(_)
            | SessionError::User(_)
            | SessionError::DatabaseError(_) => ErrorKind::InternalFault,
        }
    }
}

impl From<auth::AccessTokenError> for SessionError {
    fn from(err: auth::AccessTokenError) -> Self {
        match err {
            auth::AccessTokenError::EncodingFailed(msg) => SessionError::Signing(msg),
            rejected => SessionError::AccessTokenRejected(rejected),
        }
    }
}

impl From<auth::AuthenticationError> for SessionError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => SessionError::InvalidCredentials,
            auth::AuthenticationError::Password(e) => SessionError::Password(e),
            auth::AuthenticationError::AccessToken(e) => SessionError::from(e),
        }
    }
}
