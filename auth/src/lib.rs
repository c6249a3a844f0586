//! Credential primitives shared by the chirpy services.
//!
//! - Password hashing (Argon2id)
//! - Access token issuance and validation (HS256 JWT)
//! - `Authorization` header parsing for bearer tokens and webhook API keys
//! - Refresh token generation
//!
//! Everything here is synchronous and free of I/O. Refresh token storage and
//! lifecycle rules live in the service that owns the database.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::AccessTokenIssuer;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let issuer = AccessTokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = issuer.issue(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(issuer.validate(&token).unwrap(), user_id);
//! ```
//!
//! ## Headers
//! ```
//! use auth::{extract_bearer_token, ApiKeyValidator, HeaderError};
//!
//! assert_eq!(extract_bearer_token(Some("Bearer abc123")), Ok("abc123"));
//! assert_eq!(extract_bearer_token(Some("Basic abc")), Err(HeaderError::MalformedHeader));
//!
//! let validator = ApiKeyValidator::new("webhook-secret");
//! assert!(validator.validate(Some("ApiKey webhook-secret")).is_ok());
//! ```

pub mod authenticator;
pub mod header;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use header::extract_api_key;
pub use header::extract_bearer_token;
pub use header::ApiKeyError;
pub use header::ApiKeyValidator;
pub use header::HeaderError;
pub use jwt::clamp_access_token_ttl;
pub use jwt::clamp_access_token_ttl_seconds;
pub use jwt::MAX_ACCESS_TOKEN_TTL_SECONDS;
pub use jwt::AccessTokenClaims;
pub use jwt::AccessTokenError;
pub use jwt::AccessTokenIssuer;
pub use jwt::TokenRejection;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::generate_refresh_token;
pub use refresh::RefreshTokenError;
