use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router over a freshly seeded store, named after `config.service.name`.
pub fn build_app(config: &AppConfig) -> Router {
    let state = AppState::seeded(&config.service.name);
    routes::build_router(state, build_cors())
}

fn bind_addr(config: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = config.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {raw}: {e}")))
}

/// Bind and serve until the process is killed.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    run_with_shutdown(config, std::future::pending()).await
}

/// Bind and serve; stop accepting connections once `shutdown` resolves and
/// return after in-flight requests complete.
pub async fn run_with_shutdown<F>(config: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = bind_addr(&config)?;
    let app = build_app(&config);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })?;
    info!(%addr, service = %config.service.name, "starting user directory");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!(%addr, "user directory stopped");
    Ok(())
}
