// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

mod common;

use chrono::Duration;
use rocket::http::{Method, Status};
use serde_json::json;
use std::sync::Arc;

use common::{access_token, call, client, client_with_clock, post_json, register, PASSWORD};
use rust_todolist::auth::ManualClock;

#[rocket::async_test]
async fn test_register_returns_tokens() {
    let client = client().await;
    let data = register(&client, "alice").await;

    assert_eq!(data["username"], "alice");
    assert!(data["userId"].as_i64().is_some());
    assert!(data["refreshToken"].is_string());
    assert_eq!(data["expiresIn"], 86400);

    let (status, body) = call(&client, Method::Get, "/api/v1/users/me", Some(&access_token(&data)), None).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["code"], 200);
    assert_eq!(body["data"]["username"], "alice");
}

#[rocket::async_test]
async fn test_register_rejections() {
    let client = client().await;
    register(&client, "alice").await;

    let (status, body) = post_json(
        &client,
        "/api/v1/auth/register",
        json!({"username": "alice", "password": PASSWORD, "confirmPassword": PASSWORD}),
    )
    .await;
    assert_eq!(status, Status::Conflict);
    assert_eq!(body["code"], 409);

    let (status, _) = post_json(
        &client,
        "/api/v1/auth/register",
        json!({"username": "bob", "password": PASSWORD, "confirmPassword": "different1"}),
    )
    .await;
    assert_eq!(status, Status::BadRequest);

    let (status, _) = post_json(
        &client,
        "/api/v1/auth/register",
        json!({"username": "bob", "password": "lettersonly", "confirmPassword": "lettersonly"}),
    )
    .await;
    assert_eq!(status, Status::BadRequest);
}

#[rocket::async_test]
async fn test_login_with_seed_user() {
    let client = client().await;
    let (status, body) = post_json(
        &client,
        "/api/v1/auth/login",
        json!({"username": "admin", "password": "admin123"}),
    )
    .await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["userId"], 1);
    assert_eq!(body["data"]["username"], "admin");

    let (status, body) = post_json(
        &client,
        "/api/v1/auth/login",
        json!({"username": "admin", "password": "wrong123"}),
    )
    .await;
    assert_eq!(status, Status::Unauthorized);
    assert_eq!(body["message"], "Invalid username or password");
}

#[rocket::async_test]
async fn test_missing_or_invalid_token_is_unauthorized() {
    let client = client().await;

    let (status, body) = call(&client, Method::Get, "/api/v1/users/me", None, None).await;
    assert_eq!(status, Status::Unauthorized);
    assert_eq!(body["message"], "User not authenticated");

    let (status, _) = call(&client, Method::Get, "/api/v1/users/me", Some("garbage"), None).await;
    assert_eq!(status, Status::Unauthorized);
}

#[rocket::async_test]
async fn test_refresh_token_cannot_authenticate() {
    let client = client().await;
    let data = register(&client, "alice").await;
    let refresh = data["refreshToken"].as_str().unwrap();

    let (status, _) = call(&client, Method::Get, "/api/v1/users/me", Some(refresh), None).await;
    assert_eq!(status, Status::Unauthorized);
}

#[rocket::async_test]
async fn test_expired_access_token_then_refresh() {
    let clock = Arc::new(ManualClock::starting_now());
    let client = client_with_clock(clock.clone()).await;
    let data = register(&client, "alice").await;
    let access = access_token(&data);
    let refresh = data["refreshToken"].as_str().unwrap().to_string();

    clock.advance(Duration::seconds(86401));
    let (status, _) = call(&client, Method::Get, "/api/v1/users/me", Some(&access), None).await;
    assert_eq!(status, Status::Unauthorized);

    let (status, body) = post_json(&client, "/api/v1/auth/refresh", json!({"refreshToken": refresh})).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["userId"], data["userId"]);

    let renewed = access_token(&body["data"]);
    let (status, body) = call(&client, Method::Get, "/api/v1/users/me", Some(&renewed), None).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"]["username"], "alice");
}

#[rocket::async_test]
async fn test_refresh_rejections() {
    let client = client().await;
    let data = register(&client, "alice").await;

    let (status, body) = post_json(
        &client,
        "/api/v1/auth/refresh",
        json!({"refreshToken": access_token(&data)}),
    )
    .await;
    assert_eq!(status, Status::Unauthorized);
    assert_eq!(body["message"], "Invalid or expired refresh token");

    let (status, _) = post_json(&client, "/api/v1/auth/refresh", json!({"refreshToken": "nope"})).await;
    assert_eq!(status, Status::Unauthorized);
}

#[rocket::async_test]
async fn test_password_change() {
    let client = client().await;
    let data = register(&client, "alice").await;
    let token = access_token(&data);

    let (status, _) = call(
        &client,
        Method::Put,
        "/api/v1/users/me/password",
        Some(&token),
        Some(json!({"oldPassword": PASSWORD, "newPassword": "changed99", "confirmPassword": "changed99"})),
    )
    .await;
    assert_eq!(status, Status::Ok);

    let (status, _) = post_json(
        &client,
        "/api/v1/auth/login",
        json!({"username": "alice", "password": "changed99"}),
    )
    .await;
    assert_eq!(status, Status::Ok);
}

#[rocket::async_test]
async fn test_logout_and_cors_headers() {
    let client = client().await;
    let response = client.post("/api/v1/auth/logout").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );

    let preflight = client.options("/api/v1/todos").dispatch().await;
    assert_eq!(preflight.status(), Status::Ok);
    assert!(preflight
        .headers()
        .get_one("Access-Control-Allow-Headers")
        .is_some_and(|h| h.contains("Authorization")));
}

#[rocket::async_test]
async fn test_malformed_body_uses_envelope() {
    let client = client().await;
    let response = client
        .post("/api/v1/auth/login")
        .header(rocket::http::ContentType::JSON)
        .body("{not json")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["code"], 400);
}
