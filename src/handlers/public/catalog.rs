// handlers/public/catalog.rs - GET /api/:collection and GET /api/:collection/:key

use axum::extract::{Path, State};
use serde_json::{Map, Value};

use crate::database::Repository;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::CatalogResource;
use crate::state::AppState;

/// List every row as `{"<collection>": [view, ...]}`
pub async fn list<T: CatalogResource>(State(state): State<AppState>) -> ApiResult<Map<String, Value>> {
    let mut conn = state.db.acquire().await?;
    let rows = Repository::<T>::new(&mut *conn).find_all().await?;

    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        views.push(row.view(&mut *conn).await?);
    }

    let mut body = Map::new();
    body.insert(T::COLLECTION.to_string(), serde_json::to_value(views)?);
    Ok(ApiResponse::success(body))
}

/// Fetch one row by business key
pub async fn get<T: CatalogResource>(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<T::View> {
    let mut conn = state.db.acquire().await?;
    let row = Repository::<T>::new(&mut *conn).find_404(&key).await?;
    Ok(ApiResponse::success(row.view(&mut *conn).await?))
}
