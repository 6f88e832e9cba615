// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Todo items and categories owned by users

pub mod error;
pub mod model;
pub mod service;
pub mod store;

pub use error::{ResourceError, ResourceResult};
pub use model::{
    Category, CategoryInput, Todo, TodoInput, TodoPriority, TodoStatus, DEFAULT_CATEGORY_COLOR,
};
pub use service::{CategoryService, TodoFilter, TodoService};
pub use store::OwnedStore;
