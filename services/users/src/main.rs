use std::net::SocketAddr;

use anyhow::Context as _;
use tracing::info;

use devenv_core::tracing::init_tracing;
use devenv_users::config::UsersConfig;
use devenv_users::infra::db::connect;
use devenv_users::metrics::{Metrics, MetricsConfig};
use devenv_users::router::build_router;
use devenv_users::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = UsersConfig::from_env().context("failed to load configuration")?;
    info!(db = ?config.db, "configuration loaded");

    let db = connect(&config.db)
        .await
        .context("failed to connect to database")?;
    info!(host = %config.db.host, name = %config.db.name, "database reachable");

    let metrics =
        Metrics::install(&MetricsConfig::default()).context("failed to install metrics recorder")?;
    let _upkeep = metrics.spawn_upkeep();

    let router = build_router(AppState::new(db), metrics);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("users service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
