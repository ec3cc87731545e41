use std::sync::Arc;

use tokio::net::TcpListener;

use audiorecap::application::services::SummaryService;
use audiorecap::infrastructure::clients::{ChatGptClient, WhisperClient};
use audiorecap::infrastructure::observability::{TracingConfig, init_tracing};
use audiorecap::infrastructure::persistence::{PgSummaryRepository, create_pool};
use audiorecap::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(
        TracingConfig::new(
            settings.environment.to_string(),
            settings.logging.json_format,
        ),
        settings.server.port,
    );

    if settings.openai_api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set; AI capability calls will fail");
    }

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;
    let repository = Arc::new(PgSummaryRepository::new(pool));

    let transcriber = Arc::new(WhisperClient::new(
        settings.whisper.host.clone(),
        settings.openai_api_key.clone(),
        settings.whisper.model.clone(),
        settings.whisper.timeout_ms,
    ));

    let summarizer = Arc::new(ChatGptClient::new(
        settings.chatgpt.host.clone(),
        settings.openai_api_key.clone(),
        settings.chatgpt.model.clone(),
        settings.chatgpt.timeout_ms,
    ));

    let summary_service = Arc::new(SummaryService::new(transcriber, summarizer, repository));

    let router = create_router(AppState { summary_service });

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!(address = %addr, "audiorecap is starting");

    let listener = TcpListener::bind(addr.as_str()).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("SIGINT signal, audiorecap is stopping"),
        _ = terminate => tracing::info!("SIGTERM signal, audiorecap is stopping"),
    }
}
