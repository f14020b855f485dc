//! Integration tests for login sessions and admin access control.
//!
//! Requires PostgreSQL: TEST_DATABASE_URL=postgres://... cargo test --test auth_integration

mod common;

use axum::extract::ConnectInfo;
use axum::http::{header, Method, StatusCode};
use common::*;
use serde_json::json;
use std::net::SocketAddr;

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let (pool, app) = setup(&[]).await;
    let admin = create_user(&pool, "admin").await;

    let response = send(
        &app,
        json_request(
            Method::POST,
            "/api/auth/login",
            json!({ "email": admin.email, "password": admin.password }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.contains("HttpOnly"));
    assert!(session_cookie(&response).is_some());

    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], admin.email);
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["expiresAt"].is_string());
}

#[tokio::test]
async fn test_login_rejects_bad_credentials_uniformly() {
    let (pool, app) = setup(&[]).await;
    let admin = create_user(&pool, "admin").await;

    let wrong_password = send(
        &app,
        json_request(
            Method::POST,
            "/api/auth/login",
            json!({ "email": admin.email, "password": "not-the-password" }),
            None,
        ),
    )
    .await;
    let unknown_email = send(
        &app,
        json_request(
            Method::POST,
            "/api/auth/login",
            json!({ "email": unique_email("nobody"), "password": "whatever" }),
            None,
        ),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(wrong_password).await["message"],
        body_json(unknown_email).await["message"]
    );
}

#[tokio::test]
async fn test_disabled_user_cannot_log_in() {
    let (pool, app) = setup(&[]).await;
    let admin = create_user(&pool, "admin").await;
    sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
        .bind(admin.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = send(
        &app,
        json_request(
            Method::POST,
            "/api/auth/login",
            json!({ "email": admin.email, "password": admin.password }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_then_logout() {
    let (pool, app) = setup(&[]).await;
    let admin = create_user(&pool, "admin").await;

    let login = send(
        &app,
        json_request(
            Method::POST,
            "/api/auth/login",
            json!({ "email": admin.email, "password": admin.password }),
            None,
        ),
    )
    .await;
    let token = session_cookie(&login).unwrap();

    let session = send(&app, empty_request(Method::GET, "/api/auth/session", Some(&token))).await;
    assert_eq!(session.status(), StatusCode::OK);
    assert_eq!(body_json(session).await["user"]["id"], admin.id.to_string());

    let logout = send(&app, empty_request(Method::POST, "/api/auth/logout", Some(&token))).await;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);
    let cleared = logout
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let after = send(&app, empty_request(Method::GET, "/api/auth/session", Some(&token))).await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session_is_no_content() {
    let (_pool, app) = setup(&[]).await;
    let response = send(&app, empty_request(Method::POST, "/api/auth/logout", None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let (pool, app) = setup(&[]).await;
    let (admin, token) = admin_session(&pool).await;

    let request = axum::http::Request::builder()
        .uri("/api/auth/session")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["email"], admin.email);
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let (_pool, app) = setup(&[]).await;

    let response = send(&app, empty_request(Method::GET, "/api/admin/blogs", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "unauthorized");

    let response = send(
        &app,
        empty_request(Method::GET, "/api/admin/blogs", Some("not-a-real-token")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_reject_non_admins() {
    let (pool, app) = setup(&[]).await;
    let user = create_user(&pool, "user").await;
    let token = create_session_token(&pool, user.id).await;

    let response = send(&app, empty_request(Method::GET, "/api/admin/analytics", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    let (pool, app) = setup(&[]).await;
    let (_admin, token) = admin_session(&pool).await;
    sqlx::query("UPDATE user_sessions SET expires_at = NOW() - INTERVAL '1 minute' WHERE token_hash = $1")
        .bind(shared::crypto::sha256_hex(&token))
        .execute(&pool)
        .await
        .unwrap();

    let response = send(&app, empty_request(Method::GET, "/api/auth/session", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_change_password_revokes_other_sessions() {
    let (pool, app) = setup(&[]).await;
    let admin = create_user(&pool, "admin").await;
    let current = create_session_token(&pool, admin.id).await;
    let other = create_session_token(&pool, admin.id).await;

    let wrong = send(
        &app,
        json_request(
            Method::PUT,
            "/api/auth/password",
            json!({ "currentPassword": "wrong", "newPassword": "Another#Strong2025" }),
            Some(&current),
        ),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        json_request(
            Method::PUT,
            "/api/auth/password",
            json!({ "currentPassword": admin.password, "newPassword": "Another#Strong2025" }),
            Some(&current),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let still_valid = send(&app, empty_request(Method::GET, "/api/auth/session", Some(&current))).await;
    assert_eq!(still_valid.status(), StatusCode::OK);
    let revoked = send(&app, empty_request(Method::GET, "/api/auth/session", Some(&other))).await;
    assert_eq!(revoked.status(), StatusCode::UNAUTHORIZED);

    let relogin = send(
        &app,
        json_request(
            Method::POST,
            "/api/auth/login",
            json!({ "email": admin.email, "password": "Another#Strong2025" }),
            None,
        ),
    )
    .await;
    assert_eq!(relogin.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_is_rate_limited_per_ip() {
    let (_pool, app) = setup(&[("security.rate_limit_per_minute", "2")]).await;
    let peer: SocketAddr = "192.0.2.44:51000".parse().unwrap();

    // a client rotating X-Forwarded-For still lands in its peer's bucket
    let attempt = |hop: u8| {
        let mut request = json_request(
            Method::POST,
            "/api/auth/login",
            json!({ "email": unique_email("limited"), "password": "x" }),
            None,
        );
        request
            .headers_mut()
            .insert("x-forwarded-for", format!("203.0.113.{}", hop).parse().unwrap());
        request.extensions_mut().insert(ConnectInfo(peer));
        request
    };

    assert_eq!(send(&app, attempt(1)).await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(send(&app, attempt(2)).await.status(), StatusCode::UNAUTHORIZED);

    let limited = send(&app, attempt(3)).await;
    assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(limited.headers().contains_key(header::RETRY_AFTER));

    let mut other = json_request(
        Method::POST,
        "/api/auth/login",
        json!({ "email": unique_email("limited"), "password": "x" }),
        None,
    );
    other
        .extensions_mut()
        .insert(ConnectInfo("192.0.2.45:51000".parse::<SocketAddr>().unwrap()));
    assert_eq!(send(&app, other).await.status(), StatusCode::UNAUTHORIZED);
}
