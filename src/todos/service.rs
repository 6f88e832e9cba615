// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Todo and category operations
//!
//! Every operation takes the caller's identity as resolved by the bearer
//! authentication fairing. Lists only ever contain the caller's own records,
//! and single-record operations go through [`AccessGuard::load_owned`], so
//! a missing identity yields `401`, an unknown id `404` and somebody else's
//! record `403`.

use chrono::Utc;
use log::info;
use std::sync::Arc;

use super::error::{ResourceError, ResourceResult};
use super::model::{
    Category, CategoryInput, Todo, TodoInput, TodoPriority, TodoStatus, DEFAULT_CATEGORY_COLOR,
};
use super::store::{OwnedStore, Records};
use crate::auth::{AccessGuard, AuthError, Identity};

const TITLE_MAX_LEN: usize = 200;
const DESCRIPTION_MAX_LEN: usize = 1000;
const CATEGORY_NAME_MAX_LEN: usize = 50;

fn invalid(message: impl Into<String>) -> ResourceError {
    ResourceError::InvalidInput(message.into())
}

fn validate_todo(input: &TodoInput) -> ResourceResult<()> {
    if input.title.trim().is_empty() {
        return Err(invalid("Title cannot be empty"));
    }
    if input.title.chars().count() > TITLE_MAX_LEN {
        return Err(invalid(format!(
            "Title length cannot exceed {} characters",
            TITLE_MAX_LEN
        )));
    }
    if let Some(description) = &input.description {
        if description.chars().count() > DESCRIPTION_MAX_LEN {
            return Err(invalid(format!(
                "Description length cannot exceed {} characters",
                DESCRIPTION_MAX_LEN
            )));
        }
    }
    Ok(())
}

/// Check a `#RRGGBB` color code
pub fn is_valid_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn validate_category(input: &CategoryInput) -> ResourceResult<()> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(invalid("Category name cannot be empty"));
    }
    if name.chars().count() > CATEGORY_NAME_MAX_LEN {
        return Err(invalid(format!(
            "Category name length must be between 1-{} characters",
            CATEGORY_NAME_MAX_LEN
        )));
    }
    match &input.color {
        Some(color) if !is_valid_color(color) => Err(invalid(
            "Invalid color format, must be hex color code",
        )),
        _ => Ok(()),
    }
}

/// Optional criteria narrowing a todo listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
    pub category_id: Option<i64>,
}

impl TodoFilter {
    fn matches(&self, todo: &Todo) -> bool {
        self.status.map_or(true, |s| todo.status == s)
            && self.priority.map_or(true, |p| todo.priority == p)
            && self
                .category_id
                .map_or(true, |c| todo.category_ids.contains(&c))
    }
}

/// Check that the caller owns every category in `ids`
fn check_categories(
    categories: &Records<Category>,
    identity: Option<&Identity>,
    ids: &[i64],
) -> ResourceResult<()> {
    for &category_id in ids {
        AccessGuard::load_owned(identity, category_id, |id| categories.get(id))?;
    }
    Ok(())
}

/// Todo item operations
///
/// Operations referencing categories hold the category store's read lock
/// until the todo is written, so a category cannot vanish in between.
pub struct TodoService {
    todos: Arc<OwnedStore<Todo>>,
    categories: Arc<OwnedStore<Category>>,
}

impl TodoService {
    pub fn new(todos: Arc<OwnedStore<Todo>>, categories: Arc<OwnedStore<Category>>) -> Self {
        Self { todos, categories }
    }

    /// The caller's items matching `filter`, by ascending id
    pub fn list(&self, identity: Option<&Identity>, filter: &TodoFilter) -> ResourceResult<Vec<Todo>> {
        let identity = AccessGuard::require_identity(identity)?;
        Ok(self
            .todos
            .read()
            .list_owned(identity.subject_id)
            .into_iter()
            .filter(|todo| filter.matches(todo))
            .collect())
    }

    pub fn get(&self, identity: Option<&Identity>, id: i64) -> ResourceResult<Todo> {
        let todos = self.todos.read();
        Ok(AccessGuard::load_owned(identity, id, |id| todos.get(id))?)
    }

    /// Create an item; it always starts `PENDING`
    pub fn create(&self, identity: Option<&Identity>, input: TodoInput) -> ResourceResult<Todo> {
        let identity = AccessGuard::require_identity(identity)?;
        validate_todo(&input)?;

        let categories = self.categories.read();
        check_categories(&categories, Some(identity), &input.category_ids)?;

        let now = Utc::now();
        let todo = self.todos.write().insert(|id| Todo {
            id,
            owner_id: identity.subject_id,
            title: input.title,
            description: input.description,
            status: TodoStatus::Pending,
            priority: input.priority.unwrap_or_default(),
            due_date: input.due_date,
            category_ids: input.category_ids,
            created_at: now,
            updated_at: now,
            completed_at: None,
        });

        info!("Todo created: id={}, title={}", todo.id, todo.title);
        Ok(todo)
    }

    /// Replace the content of an item
    ///
    /// Priority, status and due date are only changed when given; the
    /// category list is always replaced.
    pub fn update(
        &self,
        identity: Option<&Identity>,
        id: i64,
        input: TodoInput,
    ) -> ResourceResult<Todo> {
        let categories = self.categories.read();
        let mut todos = self.todos.write();
        let mut todo = AccessGuard::load_owned(identity, id, |id| todos.get(id))?;
        validate_todo(&input)?;
        check_categories(&categories, identity, &input.category_ids)?;

        let now = Utc::now();
        todo.title = input.title;
        todo.description = input.description;
        if let Some(priority) = input.priority {
            todo.priority = priority;
        }
        if let Some(due_date) = input.due_date {
            todo.due_date = Some(due_date);
        }
        if let Some(status) = input.status {
            todo.set_status(status, now);
        }
        todo.category_ids = input.category_ids;
        todo.updated_at = now;

        if !todos.update(todo.clone()) {
            return Err(AuthError::NotFound.into());
        }
        info!("Todo updated: id={}", todo.id);
        Ok(todo)
    }

    /// Flip between `PENDING` and `COMPLETED`
    ///
    /// An `IN_PROGRESS` item becomes `COMPLETED`.
    pub fn toggle_status(&self, identity: Option<&Identity>, id: i64) -> ResourceResult<Todo> {
        let mut todos = self.todos.write();
        let mut todo = AccessGuard::load_owned(identity, id, |id| todos.get(id))?;
        let next = match todo.status {
            TodoStatus::Completed => TodoStatus::Pending,
            TodoStatus::Pending | TodoStatus::InProgress => TodoStatus::Completed,
        };
        todo.set_status(next, Utc::now());

        if !todos.update(todo.clone()) {
            return Err(AuthError::NotFound.into());
        }
        info!("Todo status toggled: id={}, status={}", todo.id, todo.status);
        Ok(todo)
    }

    pub fn delete(&self, identity: Option<&Identity>, id: i64) -> ResourceResult<()> {
        let mut todos = self.todos.write();
        AccessGuard::load_owned(identity, id, |id| todos.get(id))?;
        todos.remove(id);
        info!("Todo deleted: id={}", id);
        Ok(())
    }
}

/// Category operations
///
/// Name checks and in-use checks run under the category store's write lock,
/// together with the write they guard.
pub struct CategoryService {
    categories: Arc<OwnedStore<Category>>,
    todos: Arc<OwnedStore<Todo>>,
}

impl CategoryService {
    pub fn new(categories: Arc<OwnedStore<Category>>, todos: Arc<OwnedStore<Todo>>) -> Self {
        Self { categories, todos }
    }

    pub fn list(&self, identity: Option<&Identity>) -> ResourceResult<Vec<Category>> {
        let identity = AccessGuard::require_identity(identity)?;
        Ok(self.categories.read().list_owned(identity.subject_id))
    }

    pub fn get(&self, identity: Option<&Identity>, id: i64) -> ResourceResult<Category> {
        let categories = self.categories.read();
        Ok(AccessGuard::load_owned(identity, id, |id| categories.get(id))?)
    }

    /// Create a category; names are unique per owner
    pub fn create(
        &self,
        identity: Option<&Identity>,
        input: CategoryInput,
    ) -> ResourceResult<Category> {
        let identity = AccessGuard::require_identity(identity)?;
        validate_category(&input)?;
        let name = input.name.trim().to_string();

        let mut categories = self.categories.write();
        if name_taken(&categories, identity.subject_id, &name, None) {
            return Err(ResourceError::Conflict(
                "Category name already exists".to_string(),
            ));
        }
        let category = categories.insert(|id| Category {
            id,
            owner_id: identity.subject_id,
            name,
            color: input
                .color
                .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
            created_at: Utc::now(),
        });

        info!("Category created: id={}, name={}", category.id, category.name);
        Ok(category)
    }

    /// Rename or recolor a category; the color is kept when not given
    pub fn update(
        &self,
        identity: Option<&Identity>,
        id: i64,
        input: CategoryInput,
    ) -> ResourceResult<Category> {
        let mut categories = self.categories.write();
        let mut category = AccessGuard::load_owned(identity, id, |id| categories.get(id))?;
        validate_category(&input)?;
        let name = input.name.trim().to_string();
        if name_taken(&categories, category.owner_id, &name, Some(category.id)) {
            return Err(ResourceError::Conflict(
                "Category name already exists".to_string(),
            ));
        }

        category.name = name;
        if let Some(color) = input.color {
            category.color = color;
        }
        if !categories.update(category.clone()) {
            return Err(AuthError::NotFound.into());
        }
        info!("Category updated: id={}", category.id);
        Ok(category)
    }

    /// Delete a category no todo item refers to
    pub fn delete(&self, identity: Option<&Identity>, id: i64) -> ResourceResult<()> {
        let mut categories = self.categories.write();
        let category = AccessGuard::load_owned(identity, id, |id| categories.get(id))?;
        let in_use = self
            .todos
            .read()
            .any_owned(category.owner_id, |todo| todo.category_ids.contains(&id));
        if in_use {
            return Err(ResourceError::Conflict(
                "Category is in use and cannot be deleted".to_string(),
            ));
        }
        categories.remove(id);
        info!("Category deleted: id={}", id);
        Ok(())
    }
}

fn name_taken(categories: &Records<Category>, owner_id: i64, name: &str, except: Option<i64>) -> bool {
    categories.any_owned(owner_id, |c| c.name == name && Some(c.id) != except)
}
