use subtle::ConstantTimeEq;

use super::bearer::strip_scheme;
use super::errors::ApiKeyError;
use super::errors::HeaderError;

const API_KEY_PREFIX: &str = "ApiKey ";

/// Extract the key from an `Authorization: ApiKey <key>` header value.
///
/// # Errors
/// * `MissingHeader` - Header absent or empty
/// * `MalformedHeader` - Value does not start with `"ApiKey "`
pub fn extract_api_key(header_value: Option<&str>) -> Result<&str, HeaderError> {
    strip_scheme(header_value, API_KEY_PREFIX)
}

/// Validates the shared secret sent by the trusted webhook caller.
///
/// The configured key is fixed for the lifetime of the validator.
#[derive(Clone)]
pub struct ApiKeyValidator {
    configured_key: String,
}

impl ApiKeyValidator {
    pub fn new(configured_key: impl Into<String>) -> Self {
        Self {
            configured_key: configured_key.into(),
        }
    }

    /// Check an `Authorization` header value against the configured key.
    ///
    /// Comparison runs in constant time with respect to the key contents.
    ///
    /// # Errors
    /// * `MissingHeader` / `MalformedHeader` - Header absent or not an API key
    /// * `Mismatch` - Key differs from the configured one
    pub fn validate(&self, header_value: Option<&str>) -> Result<(), ApiKeyError> {
        let presented = extract_api_key(header_value)?;

        if bool::from(
            presented
                .as_bytes()
                .ct_eq(self.configured_key.as_bytes()),
        ) {
            Ok(())
        } else {
            Err(ApiKeyError::Mismatch)
        }
    }
}

impl std::fmt::Debug for ApiKeyValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyValidator")
            .field("key_length", &self.configured_key.len())
            .finish_non_exhaustive()
    }
}
