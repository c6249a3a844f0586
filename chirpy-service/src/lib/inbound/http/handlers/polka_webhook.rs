use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::authorization_header;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

const USER_UPGRADED_EVENT: &str = "user.upgraded";

#[derive(Debug, Deserialize)]
pub struct PolkaWebhookRequest {
    event: String,
    #[serde(default)]
    data: Option<PolkaWebhookData>,
}

#[derive(Debug, Deserialize)]
pub struct PolkaWebhookData {
    user_id: String,
}

/// Receive payment provider events.
///
/// The API key is checked before the body is read.
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let header = authorization_header(&headers).map_err(auth::ApiKeyError::from)?;
    state.api_key_validator.validate(header).map_err(|e| {
        tracing::warn!("Webhook rejected: {}", e);
        ApiError::from(e)
    })?;

    let request: PolkaWebhookRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid webhook body: {}", e)))?;

    if request.event != USER_UPGRADED_EVENT {
        tracing::debug!(event = %request.event, "Ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let data = request
        .data
        .ok_or_else(|| ApiError::BadRequest("Missing webhook data".to_string()))?;
    let user_id = UserId::from_string(&data.user_id).map_err(UserError::from)?;

    state.user_service.upgrade_to_chirpy_red(&user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
