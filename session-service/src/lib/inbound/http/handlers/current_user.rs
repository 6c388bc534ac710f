use auth::AuthenticatedContext;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

pub async fn current_user(
    State(state): State<AppState>,
    Extension(context): Extension<AuthenticatedContext>,
) -> Result<ApiSuccess<CurrentUserResponseData>, ApiError> {
    let user = state
        .session_service
        .current_user(&context.identity)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        CurrentUserResponseData {
            email: user.email.to_string(),
            username: user.username,
            session_id: context.session_id,
            session_expires_at: context.expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponseData {
    pub email: String,
    pub username: String,
    pub session_id: String,
    pub session_expires_at: DateTime<Utc>,
}
