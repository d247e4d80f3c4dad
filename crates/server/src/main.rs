use anyhow::Context;
use deployment::Deployment;
use server::{DeploymentImpl, routes};
use services::services::config::Config;
use tracing_subscriber::{EnvFilter, prelude::*};
use utils::sentry::{self as sentry_utils, sentry_layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,server=debug,services=debug,db=info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .with(sentry_layer())
        .init();

    let config = Config::from_env().context("invalid configuration")?;
    sentry_utils::init_once(&config.environment.to_string());

    let addr = format!("{}:{}", config.host, config.port);
    let deployment = DeploymentImpl::new(config).await?;

    let validation = deployment.validate_database().await?;
    if !validation.is_ok() {
        anyhow::bail!(validation.summary());
    }
    tracing::info!("{}", validation.summary());

    let app = routes::router(deployment);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server running on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {e}");
    }
    tracing::info!("Shutting down");
}
