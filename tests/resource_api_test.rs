// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

mod common;

use rocket::http::{Method, Status};
use serde_json::json;

use common::{access_token, call, client, register};

#[rocket::async_test]
async fn test_todo_lifecycle() {
    let client = client().await;
    let alice = access_token(&register(&client, "alice").await);

    let (status, body) = call(
        &client,
        Method::Post,
        "/api/v1/todos",
        Some(&alice),
        Some(json!({"title": "Write report", "priority": "HIGH"})),
    )
    .await;
    assert_eq!(status, Status::Created);
    assert_eq!(body["data"]["status"], "PENDING");
    assert_eq!(body["data"]["priority"], "HIGH");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call(&client, Method::Patch, &format!("/api/v1/todos/{}/toggle", id), Some(&alice), None).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"]["status"], "COMPLETED");
    assert!(body["data"]["completedAt"].is_string());

    let (status, body) = call(&client, Method::Get, "/api/v1/todos?status=COMPLETED", Some(&alice), None).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (status, body) = call(&client, Method::Get, "/api/v1/todos?status=PENDING", Some(&alice), None).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));

    let (status, _) = call(&client, Method::Get, "/api/v1/todos?priority=URGENT", Some(&alice), None).await;
    assert_eq!(status, Status::BadRequest);

    let (status, _) = call(&client, Method::Delete, &format!("/api/v1/todos/{}", id), Some(&alice), None).await;
    assert_eq!(status, Status::Ok);
    let (status, _) = call(&client, Method::Get, &format!("/api/v1/todos/{}", id), Some(&alice), None).await;
    assert_eq!(status, Status::NotFound);
}

#[rocket::async_test]
async fn test_cross_user_access() {
    let client = client().await;
    let alice = access_token(&register(&client, "alice").await);
    let bob = access_token(&register(&client, "bob").await);

    let (_, body) = call(
        &client,
        Method::Post,
        "/api/v1/todos",
        Some(&alice),
        Some(json!({"title": "Private"})),
    )
    .await;
    let uri = format!("/api/v1/todos/{}", body["data"]["id"]);

    let (status, body) = call(&client, Method::Get, &uri, Some(&bob), None).await;
    assert_eq!(status, Status::Forbidden);
    assert_eq!(body["code"], 403);

    let (status, _) = call(&client, Method::Put, &uri, Some(&bob), Some(json!({"title": "Mine now"}))).await;
    assert_eq!(status, Status::Forbidden);

    let (status, _) = call(&client, Method::Delete, &uri, Some(&bob), None).await;
    assert_eq!(status, Status::Forbidden);

    let (status, _) = call(&client, Method::Get, &uri, None, None).await;
    assert_eq!(status, Status::Unauthorized);

    let (status, body) = call(&client, Method::Get, "/api/v1/todos", Some(&bob), None).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"], json!([]));

    let (status, body) = call(&client, Method::Get, &uri, Some(&alice), None).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"]["title"], "Private");
}

#[rocket::async_test]
async fn test_categories() {
    let client = client().await;
    let alice = access_token(&register(&client, "alice").await);
    let bob = access_token(&register(&client, "bob").await);

    let (status, body) = call(&client, Method::Post, "/api/v1/categories", Some(&alice), Some(json!({"name": "Work"}))).await;
    assert_eq!(status, Status::Created);
    assert_eq!(body["data"]["color"], "#000000");
    let work = body["data"]["id"].as_i64().unwrap();

    let (status, _) = call(&client, Method::Post, "/api/v1/categories", Some(&alice), Some(json!({"name": "Work"}))).await;
    assert_eq!(status, Status::Conflict);

    let (status, _) = call(&client, Method::Post, "/api/v1/categories", Some(&bob), Some(json!({"name": "Work"}))).await;
    assert_eq!(status, Status::Created);

    let (status, _) = call(
        &client,
        Method::Post,
        "/api/v1/todos",
        Some(&bob),
        Some(json!({"title": "Sneaky", "categoryIds": [work]})),
    )
    .await;
    assert_eq!(status, Status::Forbidden);

    let (status, _) = call(
        &client,
        Method::Post,
        "/api/v1/todos",
        Some(&alice),
        Some(json!({"title": "Filed", "categoryIds": [work]})),
    )
    .await;
    assert_eq!(status, Status::Created);

    let (status, body) = call(&client, Method::Get, &format!("/api/v1/todos?categoryId={}", work), Some(&alice), None).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"][0]["title"], "Filed");

    let (status, _) = call(&client, Method::Delete, &format!("/api/v1/categories/{}", work), Some(&alice), None).await;
    assert_eq!(status, Status::Conflict);

    let (status, body) = call(
        &client,
        Method::Put,
        &format!("/api/v1/categories/{}", work),
        Some(&alice),
        Some(json!({"name": "Office", "color": "#FF8800"})),
    )
    .await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"]["name"], "Office");
    assert_eq!(body["data"]["color"], "#FF8800");
}

#[rocket::async_test]
async fn test_unknown_route_uses_envelope() {
    let client = client().await;
    let (status, body) = call(&client, Method::Get, "/api/v1/nothing-here", None, None).await;
    assert_eq!(status, Status::NotFound);
    assert_eq!(body["code"], 404);
    assert_eq!(body["message"], "Resource not found");
}
