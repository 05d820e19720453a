//! HTTP server command

use crate::console::CliConsole;
use crate::server::{AppState, build_app};
use aula_core::config::PipelineConfig;
use aula_core::engine::EngineRouter;
use aula_core::orchestrator::Orchestrator;
use aula_core::rate_limit::SlidingWindowLimiter;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const PURGE_INTERVAL: Duration = Duration::from_secs(300);

pub async fn run(console: &CliConsole, config: PipelineConfig, addr: &str) -> anyhow::Result<()> {
    let router = EngineRouter::from_env(config.timeouts())?;
    let limiter = SlidingWindowLimiter::new();
    spawn_purge(limiter.clone());

    let state = Arc::new(AppState {
        orchestrator: Orchestrator::new(router, config),
        limiter,
    });
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    console.success(&format!("Listening on http://{}", listener.local_addr()?));
    info!(addr, "aula server started");

    axum::serve(listener, app).await?;
    Ok(())
}

fn spawn_purge(limiter: SlidingWindowLimiter) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = limiter.purge_expired(Instant::now());
            if purged > 0 {
                debug!(purged, remaining = limiter.len(), "purged expired rate-limit windows");
            }
        }
    });
}
