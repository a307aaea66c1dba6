use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use screener::config::Config;
use screener::extraction::LibraryExtractor;
use screener::llm_client::{LanguageModel, LlmClient};
use screener::routes::build_router;
use screener::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    // The server still starts without a key; analysis requests fail until one is set.
    let model: Option<Arc<dyn LanguageModel>> = match &config.api_key {
        Some(key) => {
            let llm = LlmClient::new(
                key.clone(),
                config.api_base.clone(),
                config.model.clone(),
            )?;
            info!("LLM client initialized (model: {})", llm.model_name());
            Some(Arc::new(llm) as Arc<dyn LanguageModel>)
        }
        None => {
            warn!("No Google Generative AI API key configured; /api/analyze will return errors");
            None
        }
    };

    let state = AppState {
        config: config.clone(),
        model,
        extractor: Arc::new(LibraryExtractor::new(config.max_upload_bytes)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
