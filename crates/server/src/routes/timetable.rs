//! Anonymous timetable drafts. The client holds the entries; the server only
//! applies the schedule rules to them.

use axum::{Router, response::Json as ResponseJson, routing::post};
use db::models::schedule::CreateSchedule;
use serde::{Deserialize, Serialize};
use services::services::schedule_engine::{
    Face, FaceGeometry, ScheduleEngine, ScheduleEntry, ScheduleError, Sector, sectors_for_face,
};
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{DeploymentImpl, error::ApiError, extract::Json};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct DraftEntry {
    pub id: Uuid,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub color: String,
}

impl TryFrom<&DraftEntry> for ScheduleEntry {
    type Error = ScheduleError;

    fn try_from(entry: &DraftEntry) -> Result<Self, Self::Error> {
        ScheduleEntry::parse(
            entry.id,
            entry.title.clone(),
            &entry.start_time,
            &entry.end_time,
            entry.color.clone(),
        )
    }
}

#[derive(Debug, Deserialize, TS)]
pub struct DraftRequest {
    #[serde(default)]
    pub entries: Vec<DraftEntry>,
    pub candidate: CreateSchedule,
}

#[derive(Debug, Deserialize, TS)]
pub struct RenderRequest {
    #[serde(default)]
    pub entries: Vec<DraftEntry>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct RenderedFaces {
    pub am: Vec<Sector>,
    pub pm: Vec<Sector>,
}

fn to_entries(entries: &[DraftEntry]) -> Result<Vec<ScheduleEntry>, ScheduleError> {
    entries.iter().map(ScheduleEntry::try_from).collect()
}

/// POST /api/timetable/draft
/// Admits `candidate` against the supplied entries and returns it with a fresh
/// id and color.
pub async fn draft(
    Json(payload): Json<DraftRequest>,
) -> Result<ResponseJson<ApiResponse<DraftEntry>>, ApiError> {
    let entries = to_entries(&payload.entries)?;
    let admitted = ScheduleEngine::draft().admit(&entries, &payload.candidate)?;
    let stored = admitted.to_create();

    Ok(ResponseJson(ApiResponse::success(DraftEntry {
        id: Uuid::new_v4(),
        title: stored.title,
        start_time: stored.start_time,
        end_time: stored.end_time,
        color: admitted.color,
    })))
}

/// POST /api/timetable/render
pub async fn render(
    Json(payload): Json<RenderRequest>,
) -> Result<ResponseJson<ApiResponse<RenderedFaces>>, ApiError> {
    let entries = to_entries(&payload.entries)?;
    let geometry = FaceGeometry::default();

    Ok(ResponseJson(ApiResponse::success(RenderedFaces {
        am: sectors_for_face(&entries, Face::Am, geometry).collect(),
        pm: sectors_for_face(&entries, Face::Pm, geometry).collect(),
    })))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().nest(
        "/timetable",
        Router::new()
            .route("/draft", post(draft))
            .route("/render", post(render)),
    )
}
