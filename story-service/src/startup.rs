//! Application startup and lifecycle management.
//!
//! Wires the story handler to its provider, builds the HTTP router (landing
//! page, `/ask`, health and metrics) and runs it until a shutdown signal.

use crate::config::{HttpConfig, StoryConfig};
use crate::handlers::{
    health::{health_check, readiness_check},
    metrics::metrics,
    story::ask,
};
use crate::services::providers::{StoryProvider, TemplateStoryProvider};
use crate::services::StoryHandler;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, get_service, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id, request_id_middleware, security_headers_middleware,
};
use service_core::observability::init_metrics;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub story_handler: StoryHandler,
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(story_handler: StoryHandler, metrics: PrometheusHandle) -> Self {
        Self {
            story_handler,
            metrics,
        }
    }
}

/// Build the HTTP router serving the landing page and the story API.
pub fn build_router(state: AppState, http: &HttpConfig) -> Router {
    let index = http.static_dir.join("index.html");

    Router::new()
        .route("/", get_service(ServeFile::new(index)))
        .route("/ask", post(ask))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .nest_service("/static", ServeDir::new(&http.static_dir))
        .layer(DefaultBodyLimit::max(http.max_body_bytes))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    request_id = %request_id(request.headers()).unwrap_or("-"),
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
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
    /// Build the application with the templated story provider.
    pub async fn build(config: StoryConfig) -> Result<Self, AppError> {
        Self::build_with_provider(config, Arc::new(TemplateStoryProvider::new())).await
    }

    /// Build the application around a caller-supplied provider.
    pub async fn build_with_provider(
        config: StoryConfig,
        provider: Arc<dyn StoryProvider>,
    ) -> Result<Self, AppError> {
        let story_handler = StoryHandler::new(provider, config.generation.timeout());
        let state = AppState::new(story_handler, init_metrics());

        tracing::info!(
            timeout_secs = config.generation.timeout_secs,
            static_dir = %config.http.static_dir.display(),
            "Initialized story handler"
        );

        // Port 0 = random port for testing
        let addr = config.common.socket_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Story service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state, &config.http),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })?;

        tracing::info!("Service shutdown complete");
        Ok(())
    }
}

/// Resolve on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
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
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
