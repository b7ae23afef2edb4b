//! REST facade over the CMS northbound client.
//!
//! Thin HTTP layer: every route maps 1:1 onto one client operation.
//! The binary owns the session lifecycle (login at startup, periodic
//! refresh, logout at shutdown); handlers never touch authentication.

// Axum takes extractors by value and requires `async` handlers even
// when they never await.
#![allow(clippy::needless_pass_by_value, clippy::unused_async)]

mod error;
mod routes;
mod state;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cmsgate_api::CmsClient;
use cmsgate_config::Settings;

use crate::state::AppState;

/// How often the controller session is refreshed. CMS expires idle
/// sessions well past this, so a fixed cadence is enough.
const REAUTH_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    if let Err(err) = run().await {
        error!("{err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    let timeout = Duration::from_secs(settings.timeout_secs);
    let nodes = settings.node_list();

    let cms = Arc::new(CmsClient::new(
        &settings.ip,
        &settings.username,
        settings.password,
        timeout,
    )?);

    // A dead controller means a useless gateway; refuse to start.
    cms.login().await?;
    info!(controller = %cms.endpoint(), user = cms.username(), "authenticated");

    if !nodes.is_empty() {
        info!(?nodes, "fronting nodes");
    }

    tokio::spawn(refresh_session(Arc::clone(&cms)));

    let app = routes::router(AppState {
        cms: Arc::clone(&cms),
    });
    let listener = TcpListener::bind(&settings.listen).await?;
    info!(addr = %settings.listen, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The session would expire on its own, but an explicit logout
    // keeps the controller's session table clean.
    if let Err(err) = cms.logout().await {
        warn!("logout on shutdown failed: {err}");
    }
    Ok(())
}

/// Re-login on a fixed cadence so the session never idles out. A
/// failed refresh is logged and retried on the next tick; requests in
/// between fail fast with the stale session.
async fn refresh_session(cms: Arc<CmsClient>) {
    let mut ticker = tokio::time::interval(REAUTH_INTERVAL);
    // The first tick completes immediately; the startup login covers it.
    ticker.tick().await;
    loop {
        ticker.tick().await;
        match cms.reauthenticate().await {
            Ok(()) => info!("controller session refreshed"),
            Err(err) => error!("session refresh failed: {err}"),
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to install ctrl-c handler: {err}");
    }
    info!("shutdown requested");
}
