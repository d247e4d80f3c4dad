use axum::Router;
use tower_http::trace::TraceLayer;

use crate::DeploymentImpl;

pub mod auth;
pub mod health;
pub mod schedules;
pub mod timetable;
pub mod todos;

pub fn router(deployment: DeploymentImpl) -> Router {
    let api_routes = Router::new()
        .merge(health::router(&deployment))
        .merge(auth::router(&deployment))
        .merge(schedules::router(&deployment))
        .merge(timetable::router(&deployment))
        .merge(todos::router(&deployment));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(deployment)
}
