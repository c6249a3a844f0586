use super::errors::HeaderError;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the raw token from an `Authorization: Bearer <token>` header value.
///
/// The remainder after the prefix is returned verbatim, without trimming.
///
/// # Errors
/// * `MissingHeader` - Header absent or empty
/// * `MalformedHeader` - Value does not start with `"Bearer "`
pub fn extract_bearer_token(header_value: Option<&str>) -> Result<&str, HeaderError> {
    strip_scheme(header_value, BEARER_PREFIX)
}

pub(crate) fn strip_scheme<'a>(
    header_value: Option<&'a str>,
    prefix: &str,
) -> Result<&'a str, HeaderError> {
    match header_value {
        None | Some("") => Err(HeaderError::MissingHeader),
        Some(value) => value
            .strip_prefix(prefix)
            .ok_or(HeaderError::MalformedHeader),
    }
}
