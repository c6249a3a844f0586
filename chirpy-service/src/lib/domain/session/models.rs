use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Fixed lifetime of a refresh token, counted from issuance.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Long-lived, server-side session credential.
///
/// `expires_at` is fixed when the token is issued and `revoked_at`, once set,
/// is never cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Build a new active record for a freshly generated token string.
    ///
    /// # Arguments
    /// * `token` - Opaque random token (see `auth::generate_refresh_token`)
    /// * `user_id` - Owning user
    /// * `now` - Issuance instant
    pub fn issue(token: String, user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            token,
            user_id,
            created_at: now,
            updated_at: now,
            expires_at: now + Duration::days(REFRESH_TOKEN_TTL_DAYS),
            revoked_at: None,
        }
    }

    /// Lifecycle state at `now`.
    ///
    /// Expiry is checked before revocation, so a token that is both expired
    /// and revoked reports `Expired`.
    pub fn status_at(&self, now: DateTime<Utc>) -> RefreshTokenStatus {
        if now > self.expires_at {
            RefreshTokenStatus::Expired
        } else if self.revoked_at.is_some() {
            RefreshTokenStatus::Revoked
        } else {
            RefreshTokenStatus::Active
        }
    }

    /// Latch the token as revoked. A second call leaves the first timestamp.
    pub fn revoke(&mut self, now: DateTime<Utc>) {
        if self.revoked_at.is_none() {
            self.revoked_at = Some(now);
            self.updated_at = now;
        }
    }
}

/// Lifecycle states of a refresh token. `Expired` and `Revoked` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTokenStatus {
    Active,
    Expired,
    Revoked,
}

/// Internal reason a refresh token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTokenRejection {
    Unknown,
    Expired,
    Revoked,
}

impl fmt::Display for RefreshTokenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            RefreshTokenRejection::Unknown => "unknown",
            RefreshTokenRejection::Expired => "expired",
            RefreshTokenRejection::Revoked => "revoked",
        };
        f.write_str(reason)
    }
}

/// Command to start a session with email and password.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
    /// Requested access token lifetime; clamped to the allowed maximum.
    pub expires_in: Option<Duration>,
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub access_token: String,
    pub refresh_token: RefreshToken,
}
