//! Application startup and lifecycle management.

use crate::config::{ProviderKind, RelayConfig};
use crate::handlers;
use crate::middleware::http_metrics_middleware;
use crate::services::init_metrics;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::mock::MockTextProvider;
use crate::services::providers::TextProvider;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::tracing::{request_id_middleware, REQUEST_ID_HEADER};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// Built once at startup; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    pub text_provider: Arc<dyn TextProvider>,
}

impl AppState {
    pub fn new(text_provider: Arc<dyn TextProvider>) -> Self {
        Self { text_provider }
    }
}

/// Construct the provider selected by configuration.
pub fn build_text_provider(config: &RelayConfig) -> Result<Arc<dyn TextProvider>, AppError> {
    let provider: Arc<dyn TextProvider> = match config.provider {
        ProviderKind::Gemini => {
            if config.google.api_key.is_empty() {
                tracing::warn!("GEMINI_API_KEY is not set; provider calls will fail");
            }

            let gemini_config = GeminiConfig {
                api_key: config.google.api_key.clone(),
                model: config.google.model.clone(),
            };
            Arc::new(GeminiTextProvider::new(gemini_config).map_err(|e| {
                tracing::error!("Failed to initialize Gemini provider: {}", e);
                AppError::ConfigError(anyhow::Error::new(e))
            })?)
        }
        ProviderKind::Mock => {
            tracing::info!("Mock provider selected, no requests will leave this process");
            Arc::new(MockTextProvider::default())
        }
    };

    tracing::info!(
        provider = provider.name(),
        model = %provider.model(),
        "Initialized text provider"
    );

    Ok(provider)
}

/// Build the HTTP router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    init_metrics();

    Router::new()
        .route(
            "/health",
            get(handlers::health_check).fallback(handlers::not_found),
        )
        .route(
            "/test-ai",
            get(handlers::test_ai).fallback(handlers::not_found),
        )
        .route("/chat", post(handlers::chat).fallback(handlers::not_found))
        .route(
            "/metrics",
            get(handlers::metrics_endpoint).fallback(handlers::not_found),
        )
        .route_layer(from_fn(http_metrics_middleware))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let text_provider = build_text_provider(&config)?;
        Self::build_with_provider(config, text_provider).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: RelayConfig,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        let app = build_router(AppState::new(text_provider));

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("GenAI Learning Backend running on port {}", port);
        tracing::info!("Health check: http://localhost:{}/health", port);
        tracing::info!("Test AI: http://localhost:{}/test-ai", port);
        tracing::info!("Chat endpoint: http://localhost:{}/chat", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
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
