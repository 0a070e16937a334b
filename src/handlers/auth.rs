// POST /register and POST /login.
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::auth::issue_token;
use crate::database::UserStore;
use crate::error::ApiError;
use crate::validation::{self, RegistrationPayload};
use crate::AppState;

const BAD_CREDENTIALS: &str = "Nieprawidłowy login lub hasło";

/// POST /register - create an account with the default role.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(payload) = payload?;
    let credentials = validation::validate_registration(&payload).map_err(ApiError::validation)?;

    let users = UserStore::new(state.pool.clone());
    if users.find_by_login(&credentials.login).await?.is_some() {
        return Err(ApiError::conflict("Użytkownik o takim loginie już istnieje"));
    }

    let password_hash = bcrypt::hash(&credentials.password, bcrypt::DEFAULT_COST).map_err(|err| {
        tracing::error!("password hashing failed: {err}");
        ApiError::internal_server_error("Nie udało się utworzyć konta")
    })?;

    let user = users.create(&credentials.login, &password_hash).await?;
    tracing::info!(login = %user.login, "registered new user");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Użytkownik zarejestrowany pomyślnie!" })),
    ))
}

/// POST /login - verify credentials and issue a bearer token.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload?;
    let credentials = validation::require_credentials(&payload).map_err(ApiError::validation)?;

    let users = UserStore::new(state.pool.clone());
    let user = users
        .find_by_login(&credentials.login)
        .await?
        .ok_or_else(|| ApiError::unauthorized(BAD_CREDENTIALS))?;

    // A malformed stored hash fails verification rather than the request.
    let password_ok = bcrypt::verify(&credentials.password, &user.password_hash).unwrap_or(false);
    if !password_ok {
        return Err(ApiError::unauthorized(BAD_CREDENTIALS));
    }

    let token = issue_token(&user.login, &state.config.security).map_err(|err| {
        tracing::error!("token issuance failed: {err}");
        ApiError::internal_server_error("Nie udało się wystawić tokenu")
    })?;

    Ok(Json(json!({ "access_token": token })))
}
