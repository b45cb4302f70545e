use clap::Parser;
use gita_advisor::api::{AppState, build_router};
use gita_advisor::config::{Config, OracleBackend};
use gita_advisor::corpus::loader::load_corpus;
use gita_advisor::oracles::Oracles;
use gita_advisor::recommend::engine::RecommendationEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let level = if config.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    // 1. Corpus (read-only for the process lifetime):
    let corpus = load_corpus(&config.data_path)?;
    if corpus.is_empty() {
        tracing::warn!("Corpus is empty, every query will return no verses");
    }

    // 2. Oracles:
    let oracles = match config.oracle_backend {
        OracleBackend::Local => {
            tracing::info!("Using in-process oracles");
            Oracles::local()
        }
        OracleBackend::Remote => {
            tracing::info!(
                "Using remote oracles at {} (emotion: {}, similarity: {})",
                config.inference_url,
                config.emotion_model,
                config.similarity_model
            );
            Oracles::remote(config.remote_settings())?
        }
    };

    // 3. HTTP Router:
    let engine = RecommendationEngine::new(oracles);
    let app = build_router(AppState::new(corpus, engine));

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
