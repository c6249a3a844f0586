//! Opaque refresh token generation.
//!
//! Only the random token string is produced here; lifetime, persistence and
//! revocation belong to whichever service stores the tokens.

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Number of random bytes in a refresh token (256 bits).
pub const REFRESH_TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, Error)]
pub enum RefreshTokenError {
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Generate a fresh refresh token from the operating system CSPRNG.
///
/// # Returns
/// Lowercase hex string of [`REFRESH_TOKEN_BYTES`] random bytes
///
/// # Errors
/// * `EntropyUnavailable` - The OS random source failed
pub fn generate_refresh_token() -> Result<String, RefreshTokenError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RefreshTokenError::EntropyUnavailable(e.to_string()))?;

    Ok(hex::encode(bytes))
}
