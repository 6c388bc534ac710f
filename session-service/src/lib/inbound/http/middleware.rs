use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that validates the session token and attaches the
/// authenticated context to request extensions.
///
/// The token comes from `Authorization: Bearer ...`, falling back to the
/// session cookie. Failures are terminal for the request.
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Owned copies: the request body is not Sync, so no borrow may cross the await
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let cookie = jar
        .get(&state.cookie.name)
        .map(|cookie| cookie.value().to_owned());
    let uri = req.uri().clone();

    let context = state
        .gate
        .authenticate(authorization.as_deref(), cookie.as_deref())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, uri = %uri, "Request rejected by auth gate");
            ApiError::from(e)
        })?;

    tracing::debug!(
        identity = %context.identity,
        session_id = %context.session_id,
        "Request authenticated"
    );
    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}
