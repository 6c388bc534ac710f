use auth::AuthenticatedContext;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    Extension(context): Extension<AuthenticatedContext>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<LogoutResponseData>), ApiError> {
    state
        .session_service
        .logout(&context.identity)
        .await
        .map_err(ApiError::from)?;

    let removal = Cookie::build((state.cookie.name.clone(), "")).path("/").build();

    Ok((
        jar.remove(removal),
        ApiSuccess::new(
            StatusCode::OK,
            LogoutResponseData {
                message: format!("User {} logged out successfully", context.identity),
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
