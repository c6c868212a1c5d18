// handlers/protected/catalog.rs - POST, PATCH/PUT and DELETE on /api/:collection
//
// Each mutating request runs in one transaction; any error drops the
// transaction and rolls back rows created by nested references.

use axum::extract::{Path, State};
use axum::Extension;
use garde::Validate;
use serde_json::{json, Value};
use tracing::info;

use crate::database::{Database, Entity, Repository};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody};
use crate::services::CatalogResource;
use crate::state::AppState;

pub async fn create<T: CatalogResource>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonBody(payload): JsonBody<T::Payload>,
) -> ApiResult<T::View> {
    let view = create_entry::<T>(&state.db, &user, payload).await?;
    Ok(ApiResponse::created(view))
}

pub async fn update<T: CatalogResource>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(key): Path<String>,
    JsonBody(payload): JsonBody<T::Payload>,
) -> ApiResult<T::View> {
    let view = update_entry::<T>(&state.db, &user, &key, payload).await?;
    Ok(ApiResponse::success(view))
}

pub async fn delete<T: CatalogResource>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(key): Path<String>,
) -> ApiResult<Value> {
    let mut tx = state.db.begin().await?;
    let row = Repository::<T>::new(&mut *tx).find_404(&key).await?;
    Repository::<T>::new(&mut *tx).delete(row.id()).await?;
    tx.commit().await?;

    info!("{} {} deleted by {}", T::LABEL, key, user.username);
    Ok(ApiResponse::success(json!({"message": format!("{} deleted", key)})))
}

/// Validate, reject duplicates, resolve nested references and insert.
pub async fn create_entry<T: CatalogResource>(
    db: &Database,
    user: &AuthUser,
    payload: T::Payload,
) -> Result<T::View, ApiError> {
    payload.validate()?;
    let key = T::payload_key(&payload).unwrap_or_default().to_string();

    let mut tx = db.begin().await?;
    if Repository::<T>::new(&mut *tx).exists(&key).await? {
        return Err(ApiError::conflict(format!("{} {} already exists", T::LABEL, key)));
    }

    let row = T::create(&mut *tx, payload).await?;
    let view = row.view(&mut *tx).await?;
    tx.commit().await?;

    info!("{} {} created by {}", T::LABEL, key, user.username);
    Ok(view)
}

/// Merge a partial payload into the row stored under `key`.
pub async fn update_entry<T: CatalogResource>(
    db: &Database,
    user: &AuthUser,
    key: &str,
    mut payload: T::Payload,
) -> Result<T::View, ApiError> {
    let mut tx = db.begin().await?;
    let existing = Repository::<T>::new(&mut *tx).find_404(key).await?;

    T::default_key(&mut payload, existing.key());
    payload.validate()?;

    let row = T::update(&mut *tx, existing, payload).await?;
    let view = row.view(&mut *tx).await?;
    tx.commit().await?;

    info!("{} {} updated by {}", T::LABEL, key, user.username);
    Ok(view)
}
