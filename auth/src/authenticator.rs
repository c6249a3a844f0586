use chrono::Duration;
use uuid::Uuid;

use crate::jwt::AccessTokenError;
use crate::jwt::AccessTokenIssuer;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and access token issuance.
///
/// Built once from the signing secret in configuration and shared by reference.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: AccessTokenIssuer,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Access token error: {0}")]
    AccessToken(#[from] AccessTokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `signing_secret` - Secret key for access token signing
    pub fn new(signing_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: AccessTokenIssuer::new(signing_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash without issuing anything.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is corrupted or verification failed
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - User the token is issued to
    /// * `ttl` - Access token lifetime, already clamped by the caller
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored hash is corrupted or verification failed
    /// * `AccessToken` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: Uuid,
        ttl: Duration,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_issuer.issue(user_id, ttl)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue an access token without password verification.
    ///
    /// Used by the refresh flow, where identity was proven by a refresh token.
    pub fn issue_access_token(
        &self,
        user_id: Uuid,
        ttl: Duration,
    ) -> Result<String, AccessTokenError> {
        self.token_issuer.issue(user_id, ttl)
    }

    /// Validate an access token and return its user.
    pub fn validate_access_token(&self, token: &str) -> Result<Uuid, AccessTokenError> {
        self.token_issuer.validate(token)
    }
}
