#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
#![warn(clippy::expect_used)]

use config::ServerConfig;
use errors::ApplicationError;
use router::setup_router;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod errors;
mod model;
mod router;
mod state;

#[cfg(test)]
mod test;

#[tokio::main]
async fn main() -> Result<(), ApplicationError> {
    if let Err(e) = run().await {
        // Print the error using Display
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run() -> Result<(), ApplicationError> {
    setup_tracing();

    let config = ServerConfig::from_env()?;

    // Ensure data directory exists
    std::fs::create_dir_all(&config.data_dir).map_err(|e| {
        ApplicationError::Internal(format!("Failed to create data directory: {}", e))
    })?;

    // Create the schema before accepting requests
    let db = config.db_config();
    info!("Setting up notes database at {:?}", db.path);
    notes_core::open_db(&db.path).map_err(|e| {
        ApplicationError::Internal(format!("Failed to open notes database: {}", e))
    })?;
    info!("Notes database ready");

    let app = setup_router(db);

    let address = config.address();
    info!("Starting server on {}", address);

    let listener = TcpListener::bind(address)
        .await
        .map_err(ApplicationError::from)?;

    info!(
        "Listening on: {}",
        listener.local_addr().map_err(ApplicationError::from)?
    );

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(ApplicationError::CannotServe)?;
    Ok(())
}

fn setup_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{crate_name}=debug,notes_core=debug,tower_http=debug",
                    crate_name = env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
