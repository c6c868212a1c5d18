mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{unique, PASSWORD};

#[tokio::test]
async fn register_then_login_returns_bearer_token() -> Result<()> {
    let Some(server) = common::server_with_database().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let username = unique("somm").replace(' ', "_");

    let res = client
        .post(server.url("/api/register"))
        .json(&json!({
            "username": username,
            "password": PASSWORD,
            "email": "somm@example.com",
            "role": "expert"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "User created successfully.");

    let res = client
        .post(server.url("/api/login"))
        .json(&json!({"username": username, "password": PASSWORD}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let cookie = res
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("access_token_cookie="));
    assert!(cookie.contains("HttpOnly"));

    let token: String = res.json().await?;
    assert!(token.starts_with("Bearer "));
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized() -> Result<()> {
    let Some(server) = common::server_with_database().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let username = unique("somm").replace(' ', "_");

    client
        .post(server.url("/api/register"))
        .json(&json!({"username": username, "password": PASSWORD}))
        .send()
        .await?;

    let res = client
        .post(server.url("/api/login"))
        .json(&json!({"username": username, "password": "Wrong#Pass1"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn unknown_user_login_is_not_found() -> Result<()> {
    let Some(server) = common::server_with_database().await? else {
        return Ok(());
    };

    let res = reqwest::Client::new()
        .post(server.url("/api/login"))
        .json(&json!({"username": unique("nobody").replace(' ', "_"), "password": PASSWORD}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn login_without_password_is_bad_request() -> Result<()> {
    let Some(server) = common::server_with_database().await? else {
        return Ok(());
    };

    let res = reqwest::Client::new()
        .post(server.url("/api/login"))
        .json(&json!({"username": "someone"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn duplicate_and_weak_registrations_are_rejected() -> Result<()> {
    let Some(server) = common::server_with_database().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let username = unique("somm").replace(' ', "_");
    let body = json!({"username": username, "password": PASSWORD});

    let first = client.post(server.url("/api/register")).json(&body).send().await?;
    assert_eq!(first.status(), StatusCode::CREATED);

    let again = client.post(server.url("/api/register")).json(&body).send().await?;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let weak = client
        .post(server.url("/api/register"))
        .json(&json!({"username": unique("weak").replace(' ', "_"), "password": "password"}))
        .send()
        .await?;
    assert_eq!(weak.status(), StatusCode::BAD_REQUEST);
    let body: Value = weak.json().await?;
    assert!(body["field_errors"].get("password").is_some());
    Ok(())
}

#[tokio::test]
async fn user_lookup_hides_password_and_delete_requires_token() -> Result<()> {
    let Some(server) = common::server_with_database().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let username = unique("somm").replace(' ', "_");

    client
        .post(server.url("/api/register"))
        .json(&json!({"username": username, "password": PASSWORD, "role": "producer"}))
        .send()
        .await?;

    let res = client.get(server.url(&format!("/api/user/{}", username))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["username"], username.as_str());
    assert_eq!(body["role"], "producer");
    assert!(body.get("password").is_none());

    let res = client.delete(server.url(&format!("/api/user/{}", username))).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let bearer = common::bearer(server).await?;
    let res = client
        .delete(server.url(&format!("/api/user/{}", username)))
        .header("Authorization", &bearer)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "User deleted.");

    let res = client.get(server.url(&format!("/api/user/{}", username))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn logout_needs_a_token_and_clears_the_cookie() -> Result<()> {
    let Some(server) = common::server_with_database().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let res = client.post(server.url("/api/logout")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let bearer = common::bearer(server).await?;
    let res = client
        .post(server.url("/api/logout"))
        .header("Authorization", &bearer)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("access_token_cookie="));
    Ok(())
}

#[tokio::test]
async fn cookie_token_authorizes_writes() -> Result<()> {
    let Some(server) = common::server_with_database().await? else {
        return Ok(());
    };
    let bearer = common::bearer(server).await?;
    let token = bearer.trim_start_matches("Bearer ");

    let res = reqwest::Client::new()
        .post(server.url("/api/wine_types"))
        .header("Cookie", format!("access_token_cookie={}", token))
        .json(&json!({"type": unique("rosé")}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    Ok(())
}
