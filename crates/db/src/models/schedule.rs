use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

/// A persisted timetable block. Times are `HH:MM` wall-clock strings that
/// have already been validated and normalised by the schedule engine.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchedule {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
}

impl Schedule {
    /// All schedules of an owner, earliest first. `HH:MM` strings sort
    /// chronologically because both fields are zero padded.
    pub async fn find_by_owner<'e, E>(executor: E, owner_id: Uuid) -> Result<Vec<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Schedule>(
            r#"SELECT id, owner_id, title, start_time, end_time, color, created_at
               FROM schedules
               WHERE owner_id = $1
               ORDER BY start_time ASC, created_at ASC"#,
        )
        .bind(owner_id)
        .fetch_all(executor)
        .await
    }

    pub async fn create<'e, E>(
        executor: E,
        id: Uuid,
        owner_id: Uuid,
        data: &CreateSchedule,
        color: &str,
    ) -> Result<Self, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Schedule>(
            r#"INSERT INTO schedules (id, owner_id, title, start_time, end_time, color)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, owner_id, title, start_time, end_time, color, created_at"#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&data.title)
        .bind(&data.start_time)
        .bind(&data.end_time)
        .bind(color)
        .fetch_one(executor)
        .await
    }

    pub async fn delete(pool: &SqlitePool, owner_id: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DBService, models::user::User};

    async fn setup() -> (DBService, Uuid) {
        let db = DBService::new_in_memory().await.unwrap();
        let owner = User::create(&db.pool, Uuid::new_v4(), "owner@example.com", "hash")
            .await
            .unwrap();
        (db, owner.id)
    }

    fn block(title: &str, start: &str, end: &str) -> CreateSchedule {
        CreateSchedule {
            title: title.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_by_owner_sorts_by_start_time() {
        let (db, owner) = setup().await;
        Schedule::create(&db.pool, Uuid::new_v4(), owner, &block("Lunch", "12:00", "13:00"), "#00C49F")
            .await
            .unwrap();
        Schedule::create(&db.pool, Uuid::new_v4(), owner, &block("Standup", "09:00", "09:30"), "#0088FE")
            .await
            .unwrap();

        let titles: Vec<_> = Schedule::find_by_owner(&db.pool, owner)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Standup", "Lunch"]);
    }

    #[tokio::test]
    async fn test_delete_is_scoped_to_owner() {
        let (db, owner) = setup().await;
        let other = User::create(&db.pool, Uuid::new_v4(), "other@example.com", "hash")
            .await
            .unwrap();
        let schedule = Schedule::create(
            &db.pool,
            Uuid::new_v4(),
            owner,
            &block("Gym", "18:00", "19:00"),
            "#FFBB28",
        )
        .await
        .unwrap();

        assert_eq!(Schedule::delete(&db.pool, other.id, schedule.id).await.unwrap(), 0);
        assert_eq!(Schedule::find_by_owner(&db.pool, owner).await.unwrap().len(), 1);
        assert_eq!(Schedule::delete(&db.pool, owner, schedule.id).await.unwrap(), 1);
        assert!(Schedule::find_by_owner(&db.pool, owner).await.unwrap().is_empty());
    }
}
