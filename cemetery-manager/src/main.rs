//! Cemetery Manager Main Entry Point
//!
//! Opens the cemetery database, applies migrations and reports how many
//! graves and bodies it holds.

use cemetery_manager::{AppError, Dependencies, LogFormat, ManagerConfig, ReadinessSummary};
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cemetery_manager=info,cemetery_repository=info"));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init(),
    }

    info!(
        service_name = "cemetery-manager",
        service_version = env!("CARGO_PKG_VERSION"),
        log_format = ?format,
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = ManagerConfig::from_env()?;
    init_tracing(config.log_format);

    info!("Starting cemetery manager");

    let deps = match Dependencies::new(&config).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let summary =
        ReadinessSummary::collect(deps.graves.as_ref(), deps.cemetery.as_ref()).await?;
    summary.log();

    deps.pool.close().await;
    Ok(())
}
