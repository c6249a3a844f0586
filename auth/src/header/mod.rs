pub mod api_key;
pub mod bearer;
pub mod errors;

pub use api_key::extract_api_key;
pub use api_key::ApiKeyValidator;
pub use bearer::extract_bearer_token;
pub use errors::ApiKeyError;
pub use errors::HeaderError;
