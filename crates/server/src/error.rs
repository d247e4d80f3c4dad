use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use deployment::DeploymentError;
use serde::Serialize;
use services::services::{
    auth::AuthError,
    schedule_engine::ScheduleError,
    schedules::ScheduleServiceError,
    todos::TodoServiceError,
};
use thiserror::Error;
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Schedule(#[from] ScheduleServiceError),
    #[error(transparent)]
    Todo(#[from] TodoServiceError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Deployment(#[from] DeploymentError),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Json(#[from] JsonRejection),
    #[error(transparent)]
    Path(#[from] PathRejection),
}

impl From<ScheduleError> for ApiError {
    fn from(err: ScheduleError) -> Self {
        ApiError::Schedule(ScheduleServiceError::Rejected(err))
    }
}

/// Machine-readable detail attached to rejected requests.
#[derive(Debug, Serialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApiErrorData {
    Overlap {
        #[serde(rename = "conflictId")]
        conflict_id: Uuid,
        #[serde(rename = "conflictTitle")]
        conflict_title: String,
    },
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Schedule(err) => match err {
                ScheduleServiceError::Rejected(ScheduleError::Overlap { .. }) => {
                    StatusCode::CONFLICT
                }
                ScheduleServiceError::Rejected(_) => StatusCode::BAD_REQUEST,
                ScheduleServiceError::NotFound => StatusCode::NOT_FOUND,
                ScheduleServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Todo(err) => match err {
                TodoServiceError::EmptyText | TodoServiceError::InvalidOrder => {
                    StatusCode::BAD_REQUEST
                }
                TodoServiceError::NotFound => StatusCode::NOT_FOUND,
                TodoServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::Unauthenticated => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::EmailTaken => StatusCode::CONFLICT,
                AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                AuthError::Database(_)
                | AuthError::Token(_)
                | AuthError::Hash(_)
                | AuthError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) | ApiError::Json(_) | ApiError::Path(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Deployment(_) | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_data(&self) -> Option<ApiErrorData> {
        match self {
            ApiError::Schedule(ScheduleServiceError::Rejected(ScheduleError::Overlap {
                id,
                title,
            })) => Some(ApiErrorData::Overlap {
                conflict_id: *id,
                conflict_title: title.clone(),
            }),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            ApiResponse::<(), ApiErrorData>::error("internal server error")
        } else {
            let message = self.to_string();
            match self.error_data() {
                Some(data) => ApiResponse::error_with_data(&message, data),
                None => ApiResponse::error(&message),
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let overlap: ApiError = ScheduleError::Overlap {
            id: Uuid::new_v4(),
            title: "Meeting".to_string(),
        }
        .into();
        assert_eq!(overlap.status(), StatusCode::CONFLICT);
        assert!(overlap.error_data().is_some());

        let format: ApiError = ScheduleError::Format("9am".to_string()).into();
        assert_eq!(format.status(), StatusCode::BAD_REQUEST);
        assert!(format.error_data().is_none());

        assert_eq!(
            ApiError::from(AuthError::Unauthenticated).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(TodoServiceError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("unknown clock face".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
