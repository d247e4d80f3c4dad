use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use deployment::Deployment;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{DeploymentImpl, error::ApiError};

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct HealthStatus {
    pub database_ok: bool,
    pub migrations_applied: usize,
    pub summary: String,
}

/// GET /api/health
pub async fn health(
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<HealthStatus>>, ApiError> {
    let result = deployment.validate_database().await?;

    Ok(ResponseJson(ApiResponse::success(HealthStatus {
        database_ok: result.is_ok(),
        migrations_applied: result.migrations_applied,
        summary: result.summary(),
    })))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().route("/health", get(health))
}
