use std::sync::Arc;

use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::RefreshTokenRejection;
use crate::domain::session::models::RefreshTokenStatus;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::user::models::UserId;

/// Lifecycle rules for refresh tokens on top of a storage port.
///
/// Storage is owned by the repository; this type decides what a token string
/// looks like, how long it lives and when it is still usable.
pub struct RefreshTokenStore<RR>
where
    RR: RefreshTokenRepository,
{
    repository: Arc<RR>,
}

impl<RR> RefreshTokenStore<RR>
where
    RR: RefreshTokenRepository,
{
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }

    /// Generate and persist a new refresh token for a user.
    ///
    /// # Errors
    /// * `TokenGeneration` - Entropy source failed
    /// * `DatabaseError` - Storage failed
    pub async fn issue(&self, user_id: &UserId) -> Result<RefreshToken, SessionError> {
        let token = auth::generate_refresh_token()?;
        let record = RefreshToken::issue(token, *user_id, Utc::now());

        self.repository.create(record).await
    }

    /// Fetch a token record regardless of its state.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - No such token
    pub async fn lookup(&self, token: &str) -> Result<RefreshToken, SessionError> {
        self.repository
            .find_by_token(token)
            .await?
            .ok_or(SessionError::RefreshTokenNotFound)
    }

    /// Revoke a token; repeated calls keep the original revocation time.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - No such token
    pub async fn revoke(&self, token: &str) -> Result<RefreshToken, SessionError> {
        self.repository
            .revoke(token, Utc::now())
            .await?
            .ok_or(SessionError::RefreshTokenNotFound)
    }

    /// Decide whether a token may be exchanged for an access token.
    ///
    /// Checks run in order: unknown, expired, revoked.
    ///
    /// # Errors
    /// * `RefreshTokenRejected` - With the first failing reason
    pub async fn check(&self, token: &str) -> Result<RefreshToken, SessionError> {
        let record = self.lookup(token).await.map_err(|e| match e {
            SessionError::RefreshTokenNotFound => {
                SessionError::RefreshTokenRejected(RefreshTokenRejection::Unknown)
            }
            other => other,
        })?;

        match record.status_at(Utc::now()) {
            RefreshTokenStatus::Active => Ok(record),
            RefreshTokenStatus::Expired => Err(SessionError::RefreshTokenRejected(
                RefreshTokenRejection::Expired,
            )),
            RefreshTokenStatus::Revoked => Err(SessionError::RefreshTokenRejected(
                RefreshTokenRejection::Revoked,
            )),
        }
    }
}
