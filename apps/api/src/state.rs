use std::sync::Arc;

use crate::config::Config;
use crate::extraction::DocumentExtractor;
use crate::llm_client::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no API credential is configured; `/api/analyze` then answers 500.
    pub model: Option<Arc<dyn LanguageModel>>,
    /// Pluggable extractor. Default: `LibraryExtractor`.
    pub extractor: Arc<dyn DocumentExtractor>,
}
