// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! In-memory storage for owned resources

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::auth::OwnedResource;

/// The records of an [`OwnedStore`], reached through its lock guards
#[derive(Debug)]
pub struct Records<T> {
    next_id: i64,
    by_id: BTreeMap<i64, T>,
}

impl<T: OwnedResource + Clone> Records<T> {
    pub fn get(&self, id: i64) -> Option<T> {
        self.by_id.get(&id).cloned()
    }

    /// All resources of `owner_id`, by ascending id
    pub fn list_owned(&self, owner_id: i64) -> Vec<T> {
        self.by_id
            .values()
            .filter(|r| r.owner_id() == owner_id)
            .cloned()
            .collect()
    }

    /// Whether some resource of `owner_id` satisfies `predicate`
    pub fn any_owned<P>(&self, owner_id: i64, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.by_id
            .values()
            .any(|r| r.owner_id() == owner_id && predicate(r))
    }

    /// Allocate an id and store the resource `build` makes with it
    pub fn insert<F>(&mut self, build: F) -> T
    where
        F: FnOnce(i64) -> T,
    {
        self.next_id += 1;
        let resource = build(self.next_id);
        self.by_id.insert(resource.id(), resource.clone());
        resource
    }

    /// Replace a stored resource; `false` if its id is unknown
    pub fn update(&mut self, resource: T) -> bool {
        match self.by_id.get_mut(&resource.id()) {
            Some(stored) => {
                *stored = resource;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: i64) -> Option<T> {
        self.by_id.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Id-keyed store of resources
///
/// A check and the write depending on it must happen under one guard. When a
/// service needs two stores at once it locks the category store before the
/// todo store.
#[derive(Debug)]
pub struct OwnedStore<T> {
    inner: RwLock<Records<T>>,
}

impl<T> Default for OwnedStore<T> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Records {
                next_id: 0,
                by_id: BTreeMap::new(),
            }),
        }
    }
}

impl<T: OwnedResource + Clone> OwnedStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared access until the guard is dropped
    pub fn read(&self) -> RwLockReadGuard<'_, Records<T>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Exclusive access until the guard is dropped
    pub fn write(&self) -> RwLockWriteGuard<'_, Records<T>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
