// GET /external/joke.
use axum::{extract::State, response::Json};

use crate::error::ApiError;
use crate::services::Joke;
use crate::AppState;

/// Proxy one random joke from the upstream API.
pub async fn random_joke(State(state): State<AppState>) -> Result<Json<Joke>, ApiError> {
    let joke = state.jokes.fetch_random_joke().await?;
    Ok(Json(joke))
}
