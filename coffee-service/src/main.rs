use coffee_service::config::CoffeeConfig;
use coffee_service::services::metrics::init_metrics;
use coffee_service::startup::Application;
use coffee_service::SERVICE_NAME;
use service_core::observability::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Telemetry comes up before anything else and never blocks startup
    let otlp_endpoint = std::env::var("OTLP_ENDPOINT")
        .ok()
        .filter(|e| !e.is_empty());
    match init_tracing(SERVICE_NAME, "info", otlp_endpoint.as_deref()) {
        Ok(()) => match &otlp_endpoint {
            Some(endpoint) => tracing::info!(%endpoint, "Telemetry configured with OTLP export"),
            None => tracing::info!("Telemetry configured without span export"),
        },
        Err(e) => tracing::error!(error = %e, "Failed to configure OTLP telemetry"),
    }

    init_metrics();

    let config = CoffeeConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let application = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    tracing::info!("Starting {} on port {}", SERVICE_NAME, application.port());
    let result = application.run_until_stopped().await;

    shutdown_tracing();

    result.map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
