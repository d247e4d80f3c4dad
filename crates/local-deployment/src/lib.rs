use std::sync::Arc;

use async_trait::async_trait;
use db::DBService;
use deployment::{Deployment, DeploymentError};
use services::services::{
    auth::AuthService,
    config::Config,
    schedule_engine::{Palette, ScheduleEngine},
    schedules::ScheduleService,
    todos::TodoService,
};
use tracing::info;

/// Single-process deployment backed by a local SQLite file.
#[derive(Clone)]
pub struct LocalDeployment {
    config: Arc<Config>,
    db: DBService,
    schedules: ScheduleService,
    todos: TodoService,
    auth: AuthService,
}

#[async_trait]
impl Deployment for LocalDeployment {
    async fn new(config: Config) -> Result<Self, DeploymentError> {
        let db = match config.database_url.as_deref() {
            Some("sqlite::memory:") => DBService::new_in_memory().await?,
            Some(url) => DBService::new(url).await?,
            None => DBService::new(&DBService::default_url()).await?,
        };

        let engine = ScheduleEngine::new(Palette::standard(), config.color_policy);
        let schedules = ScheduleService::new(db.pool.clone(), engine);
        let todos = TodoService::new(db.pool.clone());
        let auth = AuthService::new(
            db.pool.clone(),
            config.jwt_secret.clone(),
            config.bcrypt_cost,
        );

        info!(
            environment = %config.environment,
            color_policy = %config.color_policy,
            "Deployment initialised"
        );

        Ok(Self {
            config: Arc::new(config),
            db,
            schedules,
            todos,
            auth,
        })
    }

    fn config(&self) -> &Config {
        &self.config
    }

    fn db(&self) -> &DBService {
        &self.db
    }

    fn schedules(&self) -> &ScheduleService {
        &self.schedules
    }

    fn todos(&self) -> &TodoService {
        &self.todos
    }

    fn auth(&self) -> &AuthService {
        &self.auth
    }
}

#[cfg(test)]
mod tests {
    use services::services::schedule_engine::ColorPolicy;

    use super::*;

    #[tokio::test]
    async fn test_in_memory_deployment_validates() {
        let config = Config {
            database_url: Some("sqlite::memory:".to_string()),
            color_policy: ColorPolicy::RoundRobin,
            ..Config::default()
        };
        let deployment = LocalDeployment::new(config).await.unwrap();
        assert!(deployment.validate_database().await.unwrap().is_ok());
        assert_eq!(
            deployment.schedules().engine().color_policy(),
            ColorPolicy::RoundRobin
        );
    }
}
