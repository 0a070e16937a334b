// HTTP API error types and the uniform error envelope.
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// A single field-level validation failure, reported under `fieldErrors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
    pub code: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            field,
            message: message.into(),
            code,
        }
    }
}

/// HTTP API error with appropriate status codes and client-safe messages.
///
/// Every failure path renders through [`ApiError::to_json`], so all error
/// bodies share the `{timestamp, status, error, fieldErrors?, message}`
/// envelope. Success payloads never pass through here.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    Validation(Vec<FieldError>),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 502 Bad Gateway (upstream contract violations)
    BadGateway(String),

    // 503 Service Unavailable (upstream unreachable)
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Short reason phrase for the `error` envelope field.
    pub fn reason(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => "Bad Request",
            ApiError::Unauthorized(_) => "Unauthorized",
            ApiError::NotFound(_) => "Not Found",
            ApiError::Conflict(_) => "Conflict",
            ApiError::InternalServerError(_) => "Internal Server Error",
            ApiError::BadGateway(_) => "Bad Gateway",
            ApiError::ServiceUnavailable(_) => "Service Unavailable",
        }
    }

    /// Client-safe human-readable summary.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(_) => "Nieprawidłowe dane wejściowe",
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::BadGateway(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Render the uniform error envelope with a fresh timestamp.
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert(
            "timestamp".into(),
            json!(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        body.insert("status".into(), json!(self.status_code().as_u16()));
        body.insert("error".into(), json!(self.reason()));
        if let ApiError::Validation(field_errors) = self {
            body.insert("fieldErrors".into(), json!(field_errors));
        }
        body.insert("message".into(), json!(self.message()));
        Value::Object(body)
    }
}

// Static constructor methods, mirroring the variant names.
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation(field_errors: Vec<FieldError>) -> Self {
        ApiError::Validation(field_errors)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        ApiError::BadGateway(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError.
impl From<crate::database::DatabaseError> for ApiError {
    fn from(err: crate::database::DatabaseError) -> Self {
        use crate::database::DatabaseError;
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::UniqueViolation(msg) => {
                tracing::warn!("unique constraint violation: {msg}");
                ApiError::conflict("Rekord o takiej wartości już istnieje")
            }
            DatabaseError::Sqlx(err) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("database error: {err}");
                ApiError::internal_server_error("Wystąpił błąd podczas przetwarzania żądania")
            }
        }
    }
}

impl From<crate::services::JokeError> for ApiError {
    fn from(err: crate::services::JokeError) -> Self {
        use crate::services::JokeError;
        match err {
            JokeError::Unavailable => ApiError::service_unavailable(err.to_string()),
            JokeError::UpstreamStatus(_) | JokeError::InvalidBody => {
                ApiError::bad_gateway(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(format!(
            "Nieprawidłowe ciało żądania: {}",
            rejection.body_text()
        ))
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
