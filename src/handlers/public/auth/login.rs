// handlers/public/auth/login.rs - POST /api/login

use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use garde::Validate;
use tracing::{info, warn};

use crate::auth::password::verify_password;
use crate::auth::{AuthError, ACCESS_COOKIE};
use crate::database::models::User;
use crate::database::Repository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, JsonBody};
use crate::schemas::Credentials;
use crate::state::AppState;

/// Authenticate and answer with `"Bearer <token>"`; the same token is set
/// as an HttpOnly cookie for browser clients.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<(CookieJar, ApiResponse<String>), ApiError> {
    credentials.validate()?;
    let username = credentials.username.unwrap_or_default();
    let password = credentials.password.unwrap_or_default();

    let mut conn = state.db.acquire().await?;
    let user = Repository::<User>::new(&mut *conn).find_404(&username).await?;
    drop(conn);

    let stored_hash = user.password;
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))??;

    if !matches {
        warn!("Rejected login for {}", username);
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let token = state.tokens.issue(&username)?;
    let cookie = Cookie::build((ACCESS_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.security.cookie_secure);

    info!("User {} logged in", username);
    Ok((jar.add(cookie), ApiResponse::success(format!("Bearer {}", token))))
}
