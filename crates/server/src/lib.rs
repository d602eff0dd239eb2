//! Server-side relay for the blog front-end.
//!
//! Three handlers reshape calls to the blog backend for page rendering, and a
//! proxy rule forwards everything under `/api/v1/` to the backend untouched.

use tokio::{net::TcpListener, signal};
use tracing::info;

pub mod config;
pub mod error;
pub mod handlers;
pub mod proxy;
pub mod router;
pub mod state;

use config::Config;
use state::AppState;

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let address = config.bind();
    info!(
        upstream = %config.upstream(),
        silent_failures = config.silent_failures(),
        "Starting server..."
    );

    let app = router::build_router(AppState::new(config)?);

    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
