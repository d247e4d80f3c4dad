use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub text: String,
    pub completed: bool,
    pub position: i64, // Manual ordering, unique per owner
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateTodo {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct UpdateTodo {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

/// Full ordering of an owner's todos, first to last.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ReorderTodos {
    pub ids: Vec<Uuid>,
}

impl Todo {
    pub async fn find_by_owner<'e, E>(executor: E, owner_id: Uuid) -> Result<Vec<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Todo>(
            r#"SELECT id, owner_id, text, completed, position, created_at, updated_at
               FROM todos
               WHERE owner_id = $1
               ORDER BY position ASC, created_at DESC"#,
        )
        .bind(owner_id)
        .fetch_all(executor)
        .await
    }

    /// Position one past the owner's last todo, or 0 for an empty list.
    pub async fn next_position<'e, E>(executor: E, owner_id: Uuid) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM todos WHERE owner_id = $1",
        )
        .bind(owner_id)
        .fetch_one(executor)
        .await
    }

    pub async fn create<'e, E>(
        executor: E,
        id: Uuid,
        owner_id: Uuid,
        text: &str,
        position: i64,
    ) -> Result<Self, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Todo>(
            r#"INSERT INTO todos (id, owner_id, text, position)
               VALUES ($1, $2, $3, $4)
               RETURNING id, owner_id, text, completed, position, created_at, updated_at"#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(text)
        .bind(position)
        .fetch_one(executor)
        .await
    }

    /// Applies whichever fields are present. Returns `None` when the todo does
    /// not exist for this owner.
    pub async fn update(
        pool: &SqlitePool,
        owner_id: Uuid,
        id: Uuid,
        text: Option<&str>,
        completed: Option<bool>,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"UPDATE todos
               SET text = COALESCE($3, text),
                   completed = COALESCE($4, completed),
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1 AND owner_id = $2
               RETURNING id, owner_id, text, completed, position, created_at, updated_at"#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(text)
        .bind(completed)
        .fetch_optional(pool)
        .await
    }

    pub async fn set_position<'e, E>(
        executor: E,
        owner_id: Uuid,
        id: Uuid,
        position: i64,
    ) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE todos SET position = $3, updated_at = datetime('now', 'subsec') WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .bind(position)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(pool: &SqlitePool, owner_id: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
