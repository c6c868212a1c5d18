// handlers/protected/auth/session.rs - POST /api/logout

use axum::Extension;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::ACCESS_COOKIE;
use crate::middleware::{ApiResponse, AuthUser};

/// Clear the access token cookie. Tokens are stateless and stay valid until they expire.
pub async fn logout(
    Extension(user): Extension<AuthUser>,
    jar: CookieJar,
) -> (CookieJar, ApiResponse<Value>) {
    let mut cookie = Cookie::from(ACCESS_COOKIE);
    cookie.set_path("/");

    info!("User {} logged out", user.username);
    (
        jar.remove(cookie),
        ApiResponse::success(json!({"message": "Logout successful"})),
    )
}
