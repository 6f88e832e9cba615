// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

mod common;

use rocket::http::{Method, Status};
use std::sync::Arc;
use std::thread;

use common::{access_token, call, client, register};
use rust_todolist::auth::{Identity, IdentityContext};

#[rocket::async_test]
async fn test_concurrent_requests_keep_their_identity() {
    let client = client().await;
    let alice = access_token(&register(&client, "alice").await);
    let bob = access_token(&register(&client, "bob").await);

    for _ in 0..10 {
        let (a, b, anonymous) = tokio::join!(
            call(&client, Method::Get, "/api/v1/users/me", Some(&alice), None),
            call(&client, Method::Get, "/api/v1/users/me", Some(&bob), None),
            call(&client, Method::Get, "/api/v1/users/me", None, None),
        );
        assert_eq!(a.0, Status::Ok);
        assert_eq!(a.1["data"]["username"], "alice");
        assert_eq!(b.0, Status::Ok);
        assert_eq!(b.1["data"]["username"], "bob");
        assert_eq!(anonymous.0, Status::Unauthorized);
    }
}

#[test]
fn test_contexts_are_isolated_between_threads() {
    let handles: Vec<_> = (1..=8)
        .map(|id| {
            thread::spawn(move || {
                let context = IdentityContext::default();
                let name = format!("user{}", id);
                {
                    let scope = context.enter(Identity::new(id, name.clone()));
                    thread::yield_now();
                    let current = scope.current().expect("identity inside scope");
                    assert_eq!(current.subject_id, id);
                    assert_eq!(current.subject_name, name);
                }
                assert!(context.current().is_none());
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread finished");
    }
}

#[test]
fn test_shared_context_is_cleared_by_scope() {
    let context = Arc::new(IdentityContext::default());
    {
        let _scope = context.enter(Identity::new(7, "carol"));
        let reader = Arc::clone(&context);
        let seen = thread::spawn(move || reader.current())
            .join()
            .expect("reader finished");
        assert_eq!(seen.map(|identity| identity.subject_id), Some(7));
    }
    assert!(context.current().is_none());
}
