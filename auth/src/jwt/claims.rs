use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Issuer written into every access token.
pub const ACCESS_TOKEN_ISSUER: &str = "chirpy";

/// Registered claims carried by an access token.
///
/// Never persisted: they only exist inside the signed token and while it is
/// being validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessTokenClaims {
    /// Issuer, always [`ACCESS_TOKEN_ISSUER`]
    pub iss: String,

    /// Subject (user identifier in canonical hyphenated form)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessTokenClaims {
    /// Build claims for a user, valid from `now` for `ttl`.
    ///
    /// # Arguments
    /// * `user_id` - User identifier, encoded as the subject
    /// * `now` - Issuance instant
    /// * `ttl` - Lifetime; a negative value yields already-expired claims
    pub fn for_user(user_id: Uuid, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            iss: ACCESS_TOKEN_ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}
