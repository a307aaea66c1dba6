// Resume screening: prompt building, the model call, and sanitizing the
// model's free-text answer into an `AnalysisResult`.
// All model calls go through llm_client, never directly.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod sanitizer;
