//! Index Admin Main Entry Point
//!
//! Ensures the configured search index exists with the definition on
//! disk, then waits until the server reports the index ready.

use dotenv::dotenv;
use index_admin::{AdminError, Dependencies};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("index_admin=info,index_admin_repository=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    info!(
        service_name = "index-admin",
        service_version = env!("CARGO_PKG_VERSION"),
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), AdminError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    info!("Starting search index admin");

    // Initialize dependencies
    let deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    // Cancel the polling loops on ctrl-c
    let shutdown = deps.shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal");
            shutdown.cancel();
        }
    });

    if let Err(e) = deps
        .service
        .ensure_index(&deps.index_name, &deps.definition)
        .await
    {
        error!(error = %e, index = %deps.index_name, "Failed to ensure search index");
        return Err(e.into());
    }

    match deps.service.wait_for_ready(&deps.index_name).await {
        Ok(definition) => {
            info!(
                index = %deps.index_name,
                definition = %definition,
                "Search index is ready"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, index = %deps.index_name, "Search index did not become ready");
            Err(e.into())
        }
    }
}
