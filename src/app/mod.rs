mod router;
pub mod server;
mod state;
pub mod tracing;

pub use router::main_router;
pub use state::AppState;

use crate::config;
use crate::error::ServiceError;
use tokio_util::sync::CancellationToken;

/// Application entry point. Initializes tracing, configuration, collaborators
/// and starts the server.
pub async fn run() -> Result<(), ServiceError> {
    // Handle healthcheck subcommand (for Docker healthcheck in distroless image)
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        match crate::healthcheck().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1)
            }
        }
    }

    tracing::init_tracing();
    ::tracing::info!("FEVER baseline prediction service");

    let settings = config::get_configuration()?;
    ::tracing::info!("Loaded settings");

    let app_state = AppState::from_settings(&settings).await?;
    let app = main_router(app_state);

    server::serve(app, settings.http_port, CancellationToken::new()).await
}
