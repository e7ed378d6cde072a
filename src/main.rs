use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tokio::signal;

use incident_notification_service::config::Settings;
use incident_notification_service::mail::{
    MailRepository, SendgridMailRepository, StaticTokenProvider, TokenProvider,
};
use incident_notification_service::server::{create_app, AppState};
use incident_notification_service::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::new()?;

    // Initialize tracing
    init_telemetry(&settings.logging)?;
    tracing::info!("Configuration loaded");

    // Mail repository is a process-wide singleton shared by every request
    let token_provider = settings
        .sendgrid
        .api_key
        .as_ref()
        .cloned()
        .map(|key| Arc::new(StaticTokenProvider::from_secret(key)) as Arc<dyn TokenProvider>);
    if token_provider.is_none() {
        tracing::warn!("No SendGrid API key configured, mail will be sent unauthenticated");
    }

    let mail: Arc<dyn MailRepository> =
        Arc::new(SendgridMailRepository::new(&settings.sendgrid, token_provider)?);
    tracing::info!(
        blocklisted = settings.sendgrid.blocklist.len(),
        "Mail repository initialized"
    );

    // Create application state
    let state = AppState::new(settings.clone(), mail);

    // Create Axum app
    let app = create_app(state);

    // Start server
    let addr = settings.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal_handler())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal_handler() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
