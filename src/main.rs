use std::sync::Arc;

use tokio::net::TcpListener;

use medrelay::application::services::InterpretationService;
use medrelay::infrastructure::audio::DeepgramEngine;
use medrelay::infrastructure::llm::GeminiClient;
use medrelay::infrastructure::observability::{TracingConfig, init_tracing};
use medrelay::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;

    init_tracing(&TracingConfig::from_env());

    let transcription_engine = Arc::new(DeepgramEngine::new(
        settings.deepgram.api_key.clone(),
        settings.deepgram.base_url.clone(),
        Some(settings.deepgram.model.clone()),
    ));

    let llm_client = Arc::new(GeminiClient::new(
        settings.gemini.api_key.clone(),
        settings.gemini.base_url.clone(),
        Some(settings.gemini.model.clone()),
    ));

    let interpretation_service = Arc::new(InterpretationService::new(
        transcription_engine,
        llm_client,
    ));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let state = AppState {
        interpretation_service,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
