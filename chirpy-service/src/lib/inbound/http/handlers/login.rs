use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;
use crate::session::errors::SessionError;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // A malformed email cannot belong to anyone; answer as for a wrong password.
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::from(SessionError::InvalidCredentials))?;

    let command = LoginCommand {
        email,
        password: body.password,
        expires_in: body
            .expires_in_seconds
            .map(|secs| auth::clamp_access_token_ttl_seconds(Some(secs))),
    };

    let session = state.session_service.login(command).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            user: (&session.user).into(),
            token: session.access_token,
            refresh_token: session.refresh_token.token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
    /// Requested access token lifetime; clamped to one hour
    #[serde(default)]
    expires_in_seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    #[serde(flatten)]
    pub user: UserData,
    pub token: String,
    pub refresh_token: String,
}
