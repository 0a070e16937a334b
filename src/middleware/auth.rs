use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::auth::{verify_token, AuthError};
use crate::error::ApiError;
use crate::AppState;

/// Authenticated caller context extracted from a verified token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub login: String,
}

/// Gate in front of the mutating product routes.
///
/// Rejects before the handler runs, so a missing or bad token never reaches
/// validation or the store. On success the caller context is injected into
/// request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Brak tokenu uwierzytelniającego"))?;

    let claims =
        verify_token(header_value, &state.config.security).map_err(|err| match err {
            AuthError::Expired => ApiError::unauthorized("Token wygasł"),
            _ => ApiError::unauthorized("Nieprawidłowy token"),
        })?;

    request.extensions_mut().insert(AuthUser { login: claims.sub });
    Ok(next.run(request).await)
}
