use async_trait::async_trait;
use db::DBService;
use services::services::{
    auth::AuthService,
    config::{Config, ConfigError},
    database_validator::{DatabaseValidationError, DatabaseValidator, ValidationResult},
    schedules::ScheduleService,
    todos::TodoService,
};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] DatabaseValidationError),
}

/// Everything a request handler may reach: storage and the services built on
/// it. Constructed once at startup and cloned into the router state.
#[async_trait]
pub trait Deployment: Clone + Send + Sync + 'static {
    async fn new(config: Config) -> Result<Self, DeploymentError>;

    fn config(&self) -> &Config;

    fn db(&self) -> &DBService;

    fn schedules(&self) -> &ScheduleService;

    fn todos(&self) -> &TodoService;

    fn auth(&self) -> &AuthService;

    async fn validate_database(&self) -> Result<ValidationResult, DeploymentError> {
        let result = DatabaseValidator::new(self.db().pool.clone())
            .validate()
            .await?;
        if !result.is_ok() {
            warn!(summary = %result.summary(), "Database validation failed");
        }
        Ok(result)
    }
}
