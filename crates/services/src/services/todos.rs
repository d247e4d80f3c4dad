//! Manually ordered todo lists.

use std::collections::HashSet;

use db::models::todo::{CreateTodo, ReorderTodos, Todo, UpdateTodo};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TodoServiceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("todo text must not be empty")]
    EmptyText,
    #[error("todo not found")]
    NotFound,
    #[error("new order must list every todo exactly once")]
    InvalidOrder,
}

#[derive(Clone)]
pub struct TodoService {
    pool: SqlitePool,
}

impl TodoService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<Todo>, TodoServiceError> {
        Ok(Todo::find_by_owner(&self.pool, owner_id).await?)
    }

    /// Appends a todo after the owner's last one.
    pub async fn create(&self, owner_id: Uuid, data: &CreateTodo) -> Result<Todo, TodoServiceError> {
        let text = non_empty(&data.text)?;

        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        let position = Todo::next_position(&mut *tx, owner_id).await?;
        let todo = Todo::create(&mut *tx, Uuid::new_v4(), owner_id, text, position).await?;
        tx.commit().await?;

        info!(owner_id = %owner_id, todo_id = %todo.id, position, "Created todo");
        Ok(todo)
    }

    pub async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        data: &UpdateTodo,
    ) -> Result<Todo, TodoServiceError> {
        let text = data.text.as_deref().map(non_empty).transpose()?;
        Todo::update(&self.pool, owner_id, id, text, data.completed)
            .await?
            .ok_or(TodoServiceError::NotFound)
    }

    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), TodoServiceError> {
        if Todo::delete(&self.pool, owner_id, id).await? == 0 {
            return Err(TodoServiceError::NotFound);
        }
        info!(owner_id = %owner_id, todo_id = %id, "Deleted todo");
        Ok(())
    }

    /// Rewrites positions to `0..n` following `order.ids`.
    pub async fn reorder(
        &self,
        owner_id: Uuid,
        order: &ReorderTodos,
    ) -> Result<Vec<Todo>, TodoServiceError> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let current: Vec<Uuid> = Todo::find_by_owner(&mut *tx, owner_id)
            .await?
            .into_iter()
            .map(|todo| todo.id)
            .collect();
        validate_order(&current, &order.ids)?;

        for (position, id) in order.ids.iter().enumerate() {
            Todo::set_position(&mut *tx, owner_id, *id, position as i64).await?;
        }
        let todos = Todo::find_by_owner(&mut *tx, owner_id).await?;
        tx.commit().await?;

        info!(owner_id = %owner_id, count = todos.len(), "Reordered todos");
        Ok(todos)
    }
}

fn non_empty(text: &str) -> Result<&str, TodoServiceError> {
    let text = text.trim();
    if text.is_empty() {
        Err(TodoServiceError::EmptyText)
    } else {
        Ok(text)
    }
}

/// `requested` must be a permutation of `current`.
fn validate_order(current: &[Uuid], requested: &[Uuid]) -> Result<(), TodoServiceError> {
    if current.len() != requested.len() {
        return Err(TodoServiceError::InvalidOrder);
    }
    let current: HashSet<&Uuid> = current.iter().collect();
    let mut seen = HashSet::with_capacity(requested.len());
    for id in requested {
        if !current.contains(id) || !seen.insert(id) {
            return Err(TodoServiceError::InvalidOrder);
        }
    }
    Ok(())
}
