use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::{AuthError, ACCESS_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from the access token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
}

/// Reject the request unless it carries a valid access token, either as
/// `Authorization: Bearer <token>` or in the access token cookie.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&headers, &jar)?;
    let claims = state.tokens.verify(&token)?;

    request.extensions_mut().insert(AuthUser { username: claims.sub });

    Ok(next.run(request).await)
}

/// Header first, cookie second
fn extract_token(headers: &HeaderMap, jar: &CookieJar) -> Result<String, AuthError> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        let auth_str = value
            .to_str()
            .map_err(|_| AuthError::InvalidToken("Invalid Authorization header format".to_string()))?;

        return match auth_str.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            Some(_) => Err(AuthError::InvalidToken("Empty bearer token".to_string())),
            None => Err(AuthError::InvalidToken(
                "Authorization header must use Bearer token format".to_string(),
            )),
        };
    }

    jar.get(ACCESS_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}
