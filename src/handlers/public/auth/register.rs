// handlers/public/auth/register.rs - POST /api/register

use axum::extract::State;
use garde::Validate;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::password::hash_password;
use crate::auth::AuthError;
use crate::database::models::{NewUser, User};
use crate::database::Repository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::schemas::RegisterPayload;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterPayload>,
) -> ApiResult<Value> {
    payload.validate()?;

    let RegisterPayload {
        username,
        password,
        email,
        role,
    } = payload;
    let username = username.unwrap_or_default();
    let password = password.unwrap_or_default();

    let mut tx = state.db.begin().await?;
    if Repository::<User>::new(&mut *tx).exists(&username).await? {
        return Err(ApiError::conflict("User already exists"));
    }

    // Argon2 is deliberately slow; keep it off the async workers
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))??;

    User::insert(
        &mut *tx,
        NewUser {
            username: username.clone(),
            password_hash,
            email,
            role,
        },
    )
    .await?;
    tx.commit().await?;

    info!("Registered user {}", username);
    Ok(ApiResponse::created(json!({"message": "User created successfully."})))
}
