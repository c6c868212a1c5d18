// handlers/public/auth/user.rs - GET /api/user/:username

use axum::extract::{Path, State};

use crate::database::models::User;
use crate::database::Repository;
use crate::middleware::{ApiResponse, ApiResult};
use crate::schemas::UserView;
use crate::state::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<UserView> {
    let mut conn = state.db.acquire().await?;
    let user = Repository::<User>::new(&mut *conn).find_404(&username).await?;
    Ok(ApiResponse::success(user.into()))
}
