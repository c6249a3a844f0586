use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::AccessTokenClaims;
use super::claims::ACCESS_TOKEN_ISSUER;
use super::errors::AccessTokenError;
use super::errors::TokenRejection;

/// Default lifetime of an access token, in seconds, when the caller asks for none.
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Longest lifetime, in seconds, a caller may request for an access token.
pub const MAX_ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 60;

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Apply the access token lifetime policy to a caller-requested TTL.
///
/// Missing requests get the default; non-positive or oversized requests are
/// clamped to the maximum. The issuer never clamps on its own.
pub fn clamp_access_token_ttl(requested: Option<Duration>) -> Duration {
    let max = Duration::seconds(MAX_ACCESS_TOKEN_TTL_SECONDS);
    match requested {
        None => Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECONDS),
        Some(ttl) if ttl <= Duration::zero() || ttl > max => max,
        Some(ttl) => ttl,
    }
}

/// Apply the lifetime policy to a TTL requested in whole seconds.
///
/// Values too large to represent as a `Duration` count as oversized.
pub fn clamp_access_token_ttl_seconds(requested: Option<i64>) -> Duration {
    clamp_access_token_ttl(
        requested.map(|secs| Duration::try_seconds(secs).unwrap_or(Duration::MAX)),
    )
}

/// Derive the key used to verify a token signed with `algorithm`.
///
/// Only HMAC-SHA256 is accepted; anything else is rejected before a single
/// claim is looked at.
pub fn verification_key(
    algorithm: Algorithm,
    secret: &[u8],
) -> Result<DecodingKey, AccessTokenError> {
    match algorithm {
        Algorithm::HS256 => Ok(DecodingKey::from_secret(secret)),
        _ => Err(AccessTokenError::TokenInvalid(
            TokenRejection::UnsupportedAlgorithm,
        )),
    }
}

/// Issues and validates short-lived, stateless access tokens.
///
/// Tokens are compact JWTs signed with HS256 over a shared secret. The issuer
/// holds no mutable state and is safe to share across request tasks.
pub struct AccessTokenIssuer {
    secret: Vec<u8>,
    encoding_key: EncodingKey,
    validation: Validation,
}

impl AccessTokenIssuer {
    /// Create a new issuer with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Supply it from configuration, never from code
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = 0;
        validation.set_issuer(&[ACCESS_TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self {
            secret: secret.to_vec(),
            encoding_key: EncodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a signed access token for a user.
    ///
    /// # Arguments
    /// * `user_id` - User the token is issued to
    /// * `ttl` - Lifetime, trusted as given (see [`clamp_access_token_ttl`])
    ///
    /// # Returns
    /// Three-part JWT string
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing or serialization failed
    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<String, AccessTokenError> {
        let claims = AccessTokenClaims::for_user(user_id, Utc::now(), ttl);

        encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AccessTokenError::EncodingFailed(e.to_string()))
    }

    /// Validate an access token and return the user it was issued to.
    ///
    /// # Arguments
    /// * `token` - JWT string
    ///
    /// # Returns
    /// User identifier from the subject claim
    ///
    /// # Errors
    /// * `TokenInvalid` - Unparseable, wrong algorithm, bad signature, wrong issuer or expired
    /// * `SubjectInvalid` - Subject claim is not a UUID
    pub fn validate(&self, token: &str) -> Result<Uuid, AccessTokenError> {
        let header = decode_header(token)
            .map_err(|_| AccessTokenError::TokenInvalid(TokenRejection::Malformed))?;
        let decoding_key = verification_key(header.alg, &self.secret)?;

        let token_data = decode::<AccessTokenClaims>(token, &decoding_key, &self.validation)
            .map_err(|e| AccessTokenError::TokenInvalid(rejection_for(e.kind())))?;

        Uuid::parse_str(&token_data.claims.sub)
            .map_err(|_| AccessTokenError::SubjectInvalid(token_data.claims.sub))
    }
}

fn rejection_for(kind: &ErrorKind) -> TokenRejection {
    match kind {
        ErrorKind::ExpiredSignature => TokenRejection::Expired,
        ErrorKind::InvalidSignature => TokenRejection::BadSignature,
        ErrorKind::InvalidIssuer => TokenRejection::WrongIssuer,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenRejection::UnsupportedAlgorithm
        }
        _ => TokenRejection::Malformed,
    }
}
