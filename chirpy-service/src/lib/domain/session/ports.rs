use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LoginResult;
use crate::domain::session::models::RefreshToken;
use crate::domain::user::models::UserId;

/// Port for session operations invoked by transports.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify email and password, then issue an access token and a new refresh token.
    ///
    /// Refresh tokens issued by earlier logins stay valid.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Password` - Stored hash is corrupted
    /// * `Signing` / `TokenGeneration` / `DatabaseError` - Internal fault
    async fn login(&self, command: LoginCommand) -> Result<LoginResult, SessionError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    /// * `RefreshTokenRejected` - Unknown, expired or revoked (with reason)
    /// * `Signing` / `DatabaseError` - Internal fault
    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError>;

    /// Revoke a refresh token. Revoking an already revoked token succeeds.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - No such token
    /// * `DatabaseError` - Storage failed
    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError>;

    /// Validate an access token and return the user it belongs to.
    ///
    /// # Errors
    /// * `AccessTokenRejected` - Invalid, expired or tampered token, or bad subject
    fn authorize(&self, access_token: &str) -> Result<UserId, SessionError>;
}

/// Persistence operations for refresh tokens.
///
/// Each method is a single atomic statement at the store.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Persist a newly issued token.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage failed, including a duplicate token
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, SessionError>;

    /// Retrieve a token record by its token string (None if not found).
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, SessionError>;

    /// Set `revoked_at` if it is still unset and return the record.
    ///
    /// # Returns
    /// The record after the update, or None when no record matches
    async fn revoke(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>, SessionError>;
}
