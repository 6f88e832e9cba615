// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! User accounts: records, storage and the account service

pub mod model;
pub mod service;
pub mod store;

pub use model::{User, UserProfile};
pub use service::{AccountError, AccountResult, AccountService};
pub use store::{MemoryUserStore, UserStore};
