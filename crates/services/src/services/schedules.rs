//! Persisted timetables: admission through the schedule engine, storage through sqlx.

use db::models::schedule::{CreateSchedule, Schedule};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::schedule_engine::{
    Face, FaceGeometry, ScheduleEngine, ScheduleEntry, ScheduleError, Sector, sectors_for_face,
};

#[derive(Debug, Error)]
pub enum ScheduleServiceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Rejected(#[from] ScheduleError),
    #[error("schedule not found")]
    NotFound,
}

#[derive(Clone)]
pub struct ScheduleService {
    pool: SqlitePool,
    engine: ScheduleEngine,
}

impl ScheduleService {
    pub fn new(pool: SqlitePool, engine: ScheduleEngine) -> Self {
        Self { pool, engine }
    }

    pub fn engine(&self) -> &ScheduleEngine {
        &self.engine
    }

    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<Schedule>, ScheduleServiceError> {
        Ok(Schedule::find_by_owner(&self.pool, owner_id).await?)
    }

    /// Validates `data` against the owner's current timetable and stores it.
    /// The read and the insert share one write-locked transaction, so a
    /// concurrent create sees this row and is rejected as an overlap.
    pub async fn create(
        &self,
        owner_id: Uuid,
        data: &CreateSchedule,
    ) -> Result<Schedule, ScheduleServiceError> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let existing = Schedule::find_by_owner(&mut *tx, owner_id).await?;
        let entries = to_entries(&existing)?;

        let admitted = match self.engine.admit(&entries, data) {
            Ok(admitted) => admitted,
            Err(e) => {
                debug!(owner_id = %owner_id, error = %e, "Schedule rejected");
                return Err(e.into());
            }
        };

        let id = Uuid::new_v4();
        let schedule =
            Schedule::create(&mut *tx, id, owner_id, &admitted.to_create(), &admitted.color)
                .await?;
        tx.commit().await?;

        info!(
            owner_id = %owner_id,
            schedule_id = %id,
            start_time = %schedule.start_time,
            end_time = %schedule.end_time,
            color = %schedule.color,
            "Created schedule"
        );
        Ok(schedule)
    }

    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), ScheduleServiceError> {
        let rows = Schedule::delete(&self.pool, owner_id, id).await?;
        if rows == 0 {
            return Err(ScheduleServiceError::NotFound);
        }
        info!(owner_id = %owner_id, schedule_id = %id, "Deleted schedule");
        Ok(())
    }

    /// Sectors to draw on one clock face for this owner.
    pub async fn face(
        &self,
        owner_id: Uuid,
        face: Face,
        geometry: FaceGeometry,
    ) -> Result<Vec<Sector>, ScheduleServiceError> {
        let schedules = Schedule::find_by_owner(&self.pool, owner_id).await?;
        let entries = to_entries(&schedules)?;
        Ok(sectors_for_face(&entries, face, geometry).collect())
    }
}

fn to_entries(schedules: &[Schedule]) -> Result<Vec<ScheduleEntry>, ScheduleError> {
    schedules.iter().map(ScheduleEntry::try_from).collect()
}
