use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::{get, patch, put},
};
use db::models::todo::{CreateTodo, ReorderTodos, Todo, UpdateTodo};
use deployment::Deployment;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{
    DeploymentImpl,
    error::ApiError,
    extract::{Json, Path},
    middleware::CurrentUser,
};

/// GET /api/todos
pub async fn list_todos(
    State(deployment): State<DeploymentImpl>,
    CurrentUser(user): CurrentUser,
) -> Result<ResponseJson<ApiResponse<Vec<Todo>>>, ApiError> {
    let todos = deployment.todos().list(user.id).await?;
    Ok(ResponseJson(ApiResponse::success(todos)))
}

/// POST /api/todos
pub async fn create_todo(
    State(deployment): State<DeploymentImpl>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateTodo>,
) -> Result<ResponseJson<ApiResponse<Todo>>, ApiError> {
    let todo = deployment.todos().create(user.id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(todo)))
}

/// PATCH /api/todos/{id}
pub async fn update_todo(
    State(deployment): State<DeploymentImpl>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTodo>,
) -> Result<ResponseJson<ApiResponse<Todo>>, ApiError> {
    let todo = deployment.todos().update(user.id, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(todo)))
}

/// DELETE /api/todos/{id}
pub async fn delete_todo(
    State(deployment): State<DeploymentImpl>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    deployment.todos().delete(user.id, id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

/// PUT /api/todos/order
/// Body lists every todo id in the new order.
pub async fn reorder_todos(
    State(deployment): State<DeploymentImpl>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ReorderTodos>,
) -> Result<ResponseJson<ApiResponse<Vec<Todo>>>, ApiError> {
    let todos = deployment.todos().reorder(user.id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(todos)))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().nest(
        "/todos",
        Router::new()
            .route("/", get(list_todos).post(create_todo))
            .route("/order", put(reorder_todos))
            .route("/{id}", patch(update_todo).delete(delete_todo)),
    )
}
