use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates access tokens and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = auth::extract_bearer_token(authorization_header(req.headers())?).map_err(|e| {
        tracing::debug!("Rejected Authorization header: {}", e);
        ApiError::from(e)
    })?;

    let user_id = state.session_service.authorize(token)?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

/// Read the `Authorization` header as text.
///
/// A header that is not visible ASCII counts as malformed.
pub(crate) fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, auth::HeaderError> {
    headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| auth::HeaderError::MalformedHeader))
        .transpose()
}
