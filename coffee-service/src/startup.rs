//! Application startup and lifecycle management.

use crate::config::CoffeeConfig;
use crate::handlers::{coffee, health};
use crate::services::providers::openai::OpenAiProvider;
use crate::services::providers::CompletionProvider;
use crate::services::QuestionService;
use axum::middleware::from_fn;
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{http_request_span, request_id_middleware};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: CoffeeConfig,
    pub questions: QuestionService,
}

impl AppState {
    pub fn new(config: CoffeeConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        let questions = QuestionService::new(provider, config.completion.clone());
        Self { config, questions }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(coffee::root))
        .route("/ask-coffee", post(coffee::ask_coffee))
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics_endpoint))
        .layer(TraceLayer::new_for_http().make_span_with(http_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: CoffeeConfig) -> Result<Self, AppError> {
        let provider = OpenAiProvider::new(config.openai.clone()).map_err(|e| {
            tracing::error!("Failed to initialize OpenAI provider: {}", e);
            AppError::ConfigError(anyhow::anyhow!("OpenAI provider initialization error: {}", e))
        })?;
        let provider: Arc<dyn CompletionProvider> = Arc::new(provider);

        tracing::info!(
            model = %config.completion.model,
            base_url = %config.openai.base_url,
            "Initialized OpenAI completion provider"
        );

        let address = config.common.address();
        let state = AppState::new(config, provider);

        // port 0 = random port for testing
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Coffee service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}
