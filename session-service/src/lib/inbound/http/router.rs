use std::sync::Arc;
use std::time::Duration;

use auth::AuthGate;
use auth::JwtSessionStrategy;
use auth::SessionStore;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_user::current_user;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::middleware::authenticate as auth_middleware;
use crate::config::SessionConfig;
use crate::domain::session::service::SessionService;
use crate::outbound::repositories::InMemoryUserDirectory;

/// Token strategy over whichever session store was configured.
pub type SessionStrategy = JwtSessionStrategy<dyn SessionStore>;

pub type AppSessionService = SessionService<InMemoryUserDirectory, SessionStrategy>;

/// How the session cookie is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSettings {
    pub name: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub max_age: Duration,
}

impl From<&SessionConfig> for CookieSettings {
    fn from(config: &SessionConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            domain: config.cookie_domain.clone(),
            secure: config.cookie_secure,
            max_age: config.token_ttl(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<AppSessionService>,
    pub gate: AuthGate<SessionStrategy>,
    pub cookie: CookieSettings,
}

pub fn create_router(session_service: Arc<AppSessionService>, cookie: CookieSettings) -> Router {
    let state = AppState {
        gate: session_service.gate(),
        session_service,
        cookie,
    };

    let public_routes = Router::new().route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/users/me", get(current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
