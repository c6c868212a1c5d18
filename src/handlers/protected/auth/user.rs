// handlers/protected/auth/user.rs - DELETE /api/user/:username

use axum::extract::{Path, State};
use axum::Extension;
use serde_json::{json, Value};
use tracing::info;

use crate::database::models::User;
use crate::database::{Entity, Repository};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(username): Path<String>,
) -> ApiResult<Value> {
    let mut tx = state.db.begin().await?;
    let user = Repository::<User>::new(&mut *tx).find_404(&username).await?;
    Repository::<User>::new(&mut *tx).delete(user.id()).await?;
    tx.commit().await?;

    info!("User {} deleted by {}", username, auth.username);
    Ok(ApiResponse::success(json!({"message": "User deleted."})))
}
