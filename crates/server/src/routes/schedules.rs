use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::{delete, get},
};
use chrono::Timelike;
use db::models::schedule::{CreateSchedule, Schedule};
use deployment::Deployment;
use serde::{Deserialize, Serialize};
use services::services::schedule_engine::{
    Face, FaceGeometry, HandAngles, Sector, TimeOfDay, hand_angles,
};
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{
    DeploymentImpl,
    error::ApiError,
    extract::{Json, Path},
    middleware::CurrentUser,
};

/// One dial ready to draw, with the live clock hands.
#[derive(Debug, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct FaceView {
    pub face: Face,
    pub sectors: Vec<Sector>,
    pub hands: HandAngles,
}

/// GET /api/schedules
pub async fn list_schedules(
    State(deployment): State<DeploymentImpl>,
    CurrentUser(user): CurrentUser,
) -> Result<ResponseJson<ApiResponse<Vec<Schedule>>>, ApiError> {
    let schedules = deployment.schedules().list(user.id).await?;
    Ok(ResponseJson(ApiResponse::success(schedules)))
}

/// POST /api/schedules
pub async fn create_schedule(
    State(deployment): State<DeploymentImpl>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateSchedule>,
) -> Result<ResponseJson<ApiResponse<Schedule>>, ApiError> {
    let schedule = deployment.schedules().create(user.id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(schedule)))
}

/// DELETE /api/schedules/{id}
pub async fn delete_schedule(
    State(deployment): State<DeploymentImpl>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    deployment.schedules().delete(user.id, id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

/// GET /api/schedules/faces/{face}
pub async fn get_face(
    State(deployment): State<DeploymentImpl>,
    CurrentUser(user): CurrentUser,
    Path(face): Path<String>,
) -> Result<ResponseJson<ApiResponse<FaceView>>, ApiError> {
    let face: Face = face
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("unknown clock face {face:?}")))?;
    let sectors = deployment
        .schedules()
        .face(user.id, face, FaceGeometry::default())
        .await?;

    let now = chrono::Local::now();
    let now =
        TimeOfDay::new(now.hour() as u8, now.minute() as u8).unwrap_or(TimeOfDay::MIDNIGHT);

    Ok(ResponseJson(ApiResponse::success(FaceView {
        face,
        sectors,
        hands: hand_angles(now),
    })))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().nest(
        "/schedules",
        Router::new()
            .route("/", get(list_schedules).post(create_schedule))
            .route("/{id}", delete(delete_schedule))
            .route("/faces/{face}", get(get_face)),
    )
}
