use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use moodscribe::application::services::{
    AudioAcquirer, ClassifierFailurePolicy, MoodPipeline, TagClassifier, TranscriptionService,
};
use moodscribe::infrastructure::audio::TranscriptionEngineFactory;
use moodscribe::infrastructure::http::ReqwestFetcher;
use moodscribe::infrastructure::llm::OpenAiChatClient;
use moodscribe::infrastructure::observability::{TracingConfig, init_tracing};
use moodscribe::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        &settings.logging.level,
        settings.logging.json,
    ));

    let pipeline = Arc::new(build_pipeline(&settings)?);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server host/port")?;

    let router = create_router(AppState::new(pipeline, settings));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = %environment, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn build_pipeline(settings: &Settings) -> anyhow::Result<MoodPipeline> {
    let allow_list = settings.fetch_allow_list();
    if allow_list.is_empty() {
        tracing::warn!("No fetch hosts allowed; audioUrl requests will be rejected");
    }

    let fetcher = Arc::new(
        ReqwestFetcher::new(Duration::from_secs(settings.fetch.timeout_secs))
            .context("Failed to build fetch client")?,
    );
    let acquirer = AudioAcquirer::new(
        fetcher,
        allow_list,
        settings.audio.max_bytes,
        settings.buffer_mode(),
    );

    let engine = TranscriptionEngineFactory::create(settings.transcription_engine_config())
        .context("Failed to create transcription engine")?;

    let llm_client = Arc::new(
        OpenAiChatClient::new(
            settings.provider.api_key.clone(),
            settings.provider.base_url.clone(),
            settings.classifier.model.clone(),
            Duration::from_secs(settings.classifier.timeout_secs),
        )
        .context("Failed to create classification client")?,
    );
    let classifier = TagClassifier::new(
        llm_client,
        settings.classifier.temperature,
        settings.classifier.max_tokens,
    );

    let failure_policy: ClassifierFailurePolicy = settings.classifier.failure_policy.into();
    tracing::info!(
        transcription_provider = ?settings.transcription.provider,
        classifier_model = %settings.classifier.model,
        failure_policy = ?failure_policy,
        "Pipeline configured"
    );

    Ok(MoodPipeline::new(
        acquirer,
        TranscriptionService::new(engine),
        classifier,
        failure_policy,
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
