use service_core::observability::init_tracing;
use story_service::config::StoryConfig;
use story_service::handlers::health::SERVICE_NAME;
use story_service::startup::Application;
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = StoryConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        SERVICE_NAME,
        &config.observability.log_level,
        config.observability.otlp_endpoint.as_deref(),
    );

    let service_span = tracing::info_span!(
        "service",
        service = SERVICE_NAME,
        version = env!("CARGO_PKG_VERSION"),
    );

    async move {
        let app = Application::build(config).await?;
        app.run_until_stopped().await?;
        Ok::<(), anyhow::Error>(())
    }
    .instrument(service_span)
    .await
}
