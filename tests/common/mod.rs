// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

#![allow(dead_code)]

use rocket::config::LogLevel;
use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};
use std::sync::Arc;

use rust_todolist::auth::{Clock, ManualClock};
use rust_todolist::config::{Config, SeedUser};
use rust_todolist::server::build_rocket;

pub const PASSWORD: &str = "secret123";

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.signing_secret = "http-test-secret-0123456789abcdefghijklmnop".to_string();
    config.auth.password_cost = 4;
    config.access.users = vec![SeedUser {
        username: "admin".to_string(),
        password: "admin123".to_string(),
    }];
    config
}

fn figment() -> rocket::figment::Figment {
    rocket::Config::figment()
        .merge(("port", 0))
        .merge(("address", "127.0.0.1"))
        .merge(("log_level", LogLevel::Off))
}

pub async fn client_with_clock(clock: Arc<ManualClock>) -> Client {
    let rocket = build_rocket(figment(), Arc::new(test_config()), Some(clock as Arc<dyn Clock>))
        .expect("valid rocket instance");
    Client::tracked(rocket).await.expect("valid rocket client")
}

pub async fn client() -> Client {
    client_with_clock(Arc::new(ManualClock::starting_now())).await
}

pub fn bearer(token: &str) -> Header<'static> {
    Header::new("Authorization", format!("Bearer {}", token))
}

pub async fn post_json(client: &Client, uri: &str, body: Value) -> (Status, Value) {
    let response = client
        .post(uri.to_string())
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch()
        .await;
    let status = response.status();
    (status, response.into_json().await.unwrap_or(Value::Null))
}

/// Send an authenticated request with an optional JSON body
pub async fn call(
    client: &Client,
    method: rocket::http::Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (Status, Value) {
    let mut request = client.req(method, uri.to_string());
    if let Some(token) = token {
        request = request.header(bearer(token));
    }
    if let Some(body) = body {
        request = request.header(ContentType::JSON).body(body.to_string());
    }
    let response = request.dispatch().await;
    let status = response.status();
    (status, response.into_json().await.unwrap_or(Value::Null))
}

/// Register `username` and return the `data` part of the answer
pub async fn register(client: &Client, username: &str) -> Value {
    let (status, body) = post_json(
        client,
        "/api/v1/auth/register",
        json!({
            "username": username,
            "password": PASSWORD,
            "confirmPassword": PASSWORD,
        }),
    )
    .await;
    assert_eq!(status, Status::Created, "registration failed: {}", body);
    body["data"].clone()
}

pub fn access_token(data: &Value) -> String {
    data["token"].as_str().expect("token in response").to_string()
}
