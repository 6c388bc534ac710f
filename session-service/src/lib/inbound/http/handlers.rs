use auth::AuthError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::session::errors::SessionError;

pub mod current_user;
pub mod login;
pub mod logout;

pub const MISSING_CREDENTIAL: &str = "Authorization header is missing";
pub const INVALID_TOKEN: &str = "Invalid or missing token";
pub const EXPIRED_TOKEN: &str = "Token is expired";
pub const LOGGED_OUT: &str = "You have been logged out";
pub const SESSION_STORE_UNAVAILABLE: &str = "Session store is unavailable";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    ServiceUnavailable(String),
    UnprocessableEntity(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            SessionError::InvalidEmail(_) => ApiError::UnprocessableEntity(err.to_string()),
            SessionError::UserNotFound(_) => ApiError::NotFound(err.to_string()),
            SessionError::StoreUnavailable(_) | SessionError::Directory(_) => {
                ApiError::ServiceUnavailable(err.to_string())
            }
            SessionError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Auth gate outcomes. Revoked and expired stay distinguishable to clients.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential => ApiError::Unauthorized(MISSING_CREDENTIAL.to_string()),
            AuthError::Expired => ApiError::Forbidden(EXPIRED_TOKEN.to_string()),
            AuthError::Revoked => ApiError::Forbidden(LOGGED_OUT.to_string()),
            AuthError::Infrastructure(_) => {
                ApiError::ServiceUnavailable(SESSION_STORE_UNAVAILABLE.to_string())
            }
            AuthError::Configuration(_) => ApiError::InternalServerError(err.to_string()),
            AuthError::InvalidToken | AuthError::EmptyIdentity => {
                ApiError::Unauthorized(INVALID_TOKEN.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}
