// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Todo items and categories
//!
//! Both are [`OwnedResource`]s: every record carries the id of the user who
//! created it, and only that user may read or change it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::auth::OwnedResource;

/// Color given to categories created without one
pub const DEFAULT_CATEGORY_COLOR: &str = "#000000";

/// Progress of a todo item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoStatus::Pending => write!(f, "PENDING"),
            TodoStatus::InProgress => write!(f, "IN_PROGRESS"),
            TodoStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl FromStr for TodoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(TodoStatus::Pending),
            "IN_PROGRESS" => Ok(TodoStatus::InProgress),
            "COMPLETED" => Ok(TodoStatus::Completed),
            _ => Err(format!("Unknown todo status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for TodoPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LOW" => Ok(TodoPriority::Low),
            "MEDIUM" => Ok(TodoPriority::Medium),
            "HIGH" => Ok(TodoPriority::High),
            _ => Err(format!("Unknown todo priority: {}", s)),
        }
    }
}

/// A todo item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    #[serde(rename = "userId")]
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    pub due_date: Option<DateTime<Utc>>,
    /// Categories of the same owner this item is filed under
    pub category_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set while the status is [`TodoStatus::Completed`]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Move to `status`, keeping `completed_at` consistent with it
    pub fn set_status(&mut self, status: TodoStatus, now: DateTime<Utc>) {
        if status == self.status {
            return;
        }
        self.completed_at = match status {
            TodoStatus::Completed => Some(now),
            _ => None,
        };
        self.status = status;
        self.updated_at = now;
    }
}

impl OwnedResource for Todo {
    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> i64 {
        self.owner_id
    }
}

/// A label grouping todo items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    #[serde(rename = "userId")]
    pub owner_id: i64,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl OwnedResource for Category {
    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> i64 {
        self.owner_id
    }
}

/// Body of todo creation and update requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Left unchanged on update when absent; `MEDIUM` on creation
    #[serde(default)]
    pub priority: Option<TodoPriority>,
    /// Ignored on creation, where items always start `PENDING`
    #[serde(default)]
    pub status: Option<TodoStatus>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category_ids: Vec<i64>,
}

/// Body of category creation and update requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}
