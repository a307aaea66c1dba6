//! Rust client for the screener API.
//!
//! `HttpScreeningClient` talks to `/api/parse` and `/api/analyze`;
//! `flow::run_screening` drives the two calls through the explicit
//! `ScreeningFlow` state machine. The `screen` binary is a thin CLI over both.

pub mod flow;
pub mod http;
pub mod report;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::client::flow::FlowError;
use crate::screening::models::AnalysisResult;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} (status {status})")]
    Server { status: u16, message: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),
}

/// A resume file as the client sends it.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    /// Reads a file from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }
}

/// The two server calls the flow depends on. Implemented over HTTP by
/// `HttpScreeningClient`; faked in flow tests.
#[async_trait]
pub trait ScreeningBackend: Send + Sync {
    async fn parse_document(&self, file: &ResumeFile) -> Result<String, ClientError>;

    async fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, ClientError>;
}
