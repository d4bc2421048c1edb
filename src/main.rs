use anyhow::{Context, Result};

use local_service_connect::{app, config, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let settings = config::Settings::from_env()?;

    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        simulated_latency_ms = settings.simulated_latency.as_millis() as u64,
        "Starting Local Service Connect"
    );

    if settings.mock_profile_store_fail {
        tracing::warn!("Mock profile store will fail every commit");
    }

    let state = app::AppState::with_mock_backends(settings.clone());
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&settings.server_addr)
        .await
        .with_context(|| format!("Failed to bind {}", settings.server_addr))?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
