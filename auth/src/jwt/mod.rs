pub mod claims;
pub mod errors;
pub mod issuer;

pub use claims::AccessTokenClaims;
pub use claims::ACCESS_TOKEN_ISSUER;
pub use errors::AccessTokenError;
pub use errors::TokenRejection;
pub use issuer::clamp_access_token_ttl;
pub use issuer::clamp_access_token_ttl_seconds;
pub use issuer::verification_key;
pub use issuer::AccessTokenIssuer;
pub use issuer::DEFAULT_ACCESS_TOKEN_TTL_SECONDS;
pub use issuer::MAX_ACCESS_TOKEN_TTL_SECONDS;
