use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Credentials posted to the login and register endpoints.
#[derive(Debug, Clone, Deserialize, TS)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl User {
    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"SELECT id, email, password_hash, created_at
               FROM users
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_email(
        pool: &SqlitePool,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"SELECT id, email, password_hash, created_at
               FROM users
               WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, email, password_hash)
               VALUES ($1, $2, $3)
               RETURNING id, email, password_hash, created_at"#,
        )
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DBService;

    #[tokio::test]
    async fn test_create_and_find_user() {
        let db = DBService::new_in_memory().await.unwrap();
        let id = Uuid::new_v4();
        User::create(&db.pool, id, "a@example.com", "hash").await.unwrap();

        let by_email = User::find_by_email(&db.pool, "a@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, id);
        assert!(User::find_by_id(&db.pool, Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let db = DBService::new_in_memory().await.unwrap();
        User::create(&db.pool, Uuid::new_v4(), "a@example.com", "hash")
            .await
            .unwrap();
        let err = User::create(&db.pool, Uuid::new_v4(), "a@example.com", "hash")
            .await
            .unwrap_err();
        assert!(
            err.as_database_error()
                .is_some_and(|e| e.is_unique_violation())
        );
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@example.com".to_string(),
            password_hash: "secret".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
