// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use thiserror::Error;

use crate::auth::AuthError;

/// Errors of todo and category operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// Authentication or ownership failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Conflict(String),
}

pub type ResourceResult<T> = Result<T, ResourceError>;
