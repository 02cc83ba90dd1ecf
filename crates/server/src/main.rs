//! Votely entry point.
//!
//! Loads configuration, hydrates the store and keeps the services alive until
//! a shutdown signal arrives.

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use votely_common::{AppError, AppResult, Config};
use votely_common::config::LoggingConfig;
use votely_core::{PollOrder, Services};
use votely_db::Database;

/// Number of polls listed per ordering in the startup summary.
const SUMMARY_LEN: usize = 3;

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, shutting down...");
        },
        () = terminate => {
            info!("Received SIGTERM, shutting down...");
        },
    }
}

async fn log_summary(services: &Services) -> AppResult<()> {
    info!(
        users = services.users.count_users().await?,
        polls = services.polls.count_polls().await?,
        votes = services.votes.count_votes().await?,
        "Store ready"
    );

    for order in PollOrder::ALL {
        let polls = services.polls.get_polls(order).await?;
        for (rank, poll) in polls.iter().take(SUMMARY_LEN).enumerate() {
            info!(
                %order,
                rank = rank + 1,
                poll_id = %poll.id,
                title = %poll.title,
                votes = poll.vote_count(),
                "Poll listing"
            );
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    info!("Starting votely...");

    let db = match &config.store.seed_path {
        Some(path) => Database::from_seed_file(path)
            .await
            .inspect_err(AppError::log)
            .with_context(|| format!("failed to hydrate store from {}", path.display()))?,
        None => {
            warn!("No seed file configured, starting with an empty store");
            Database::new()
        }
    };

    let services = Services::new(Arc::new(db), &config.store);
    log_summary(&services).await.inspect_err(AppError::log)?;

    shutdown_signal().await;
    info!("Stopped");
    Ok(())
}
