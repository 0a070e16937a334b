// CRUD handlers for /produkty.
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde_json::{json, Value};

use crate::database::{Product, ProductStore};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::validation::{self, ProductPayload};
use crate::AppState;

const DUPLICATE_NAME: &str = "Produkt o takiej nazwie już istnieje";
const MISSING_PRODUCT: &str = "Produkt nie istnieje";

/// GET /produkty - public listing of every product.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = ProductStore::new(state.pool.clone()).list_all().await?;
    Ok(Json(products))
}

/// POST /produkty - create a product after full validation.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(payload) = payload?;
    let new = validation::validate_new_product(&payload).map_err(ApiError::validation)?;

    let store = ProductStore::new(state.pool.clone());
    if store.find_by_name(&new.nazwa).await?.is_some() {
        return Err(ApiError::conflict(DUPLICATE_NAME));
    }

    let product = store.create(new).await?;
    tracing::info!(id = product.id, nazwa = %product.nazwa, by = %user.login, "created product");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Produkt dodany pomyślnie!" })),
    ))
}

/// PUT /produkty/:id - partial update; omitted fields keep stored values.
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload?;
    let patch = validation::validate_product_patch(&payload).map_err(ApiError::validation)?;

    let store = ProductStore::new(state.pool.clone());
    let existing = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(MISSING_PRODUCT))?;

    let previous_nazwa = existing.nazwa.clone();
    let merged = patch.apply(existing);

    // A renamed product must not collide with another row.
    if merged.nazwa != previous_nazwa && store.find_by_name(&merged.nazwa).await?.is_some() {
        return Err(ApiError::conflict(DUPLICATE_NAME));
    }

    store.update(&merged).await?;
    tracing::info!(id = merged.id, by = %user.login, "updated product");

    Ok(Json(json!({ "message": "Produkt zaktualizowany pomyślnie!" })))
}

/// DELETE /produkty/:id.
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let store = ProductStore::new(state.pool.clone());
    if store.find_by_id(id).await?.is_none() {
        return Err(ApiError::not_found(MISSING_PRODUCT));
    }

    store.delete(id).await?;
    tracing::info!(id, by = %user.login, "deleted product");

    Ok(Json(json!({ "message": "Produkt usunięty pomyślnie!" })))
}
