use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use crate::client::{ClientError, ResumeFile, ScreeningBackend};
use crate::documents::handlers::ParseResponse;
use crate::screening::models::{AnalysisResult, AnalyzeRequest};

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for a running screener server.
#[derive(Clone)]
pub struct HttpScreeningClient {
    client: Client,
    base_url: String,
}

impl HttpScreeningClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Turns a non-2xx response into `ClientError::Server`, preferring the
/// message from the JSON error envelope over the raw body.
async fn error_from(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    ClientError::Server { status, message }
}

#[async_trait]
impl ScreeningBackend for HttpScreeningClient {
    async fn parse_document(&self, file: &ResumeFile) -> Result<String, ClientError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new().part("file", part);

        debug!("Uploading {} ({} bytes)", file.file_name, file.bytes.len());
        let response = self
            .client
            .post(self.url("/api/parse"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from(response).await);
        }
        Ok(response.json::<ParseResponse>().await?.text)
    }

    async fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, ClientError> {
        let body = AnalyzeRequest {
            resume_text: Some(resume_text.to_string()),
            job_description: Some(job_description.to_string()),
        };

        let response = self
            .client
            .post(self.url("/api/analyze"))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from(response).await);
        }
        Ok(response.json::<AnalysisResult>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn pdf_file() -> ResumeFile {
        ResumeFile {
            file_name: "resume.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.4 fake".to_vec(),
        }
    }

    #[tokio::test]
    async fn test_parse_uploads_file_field() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/parse")
                    .body_contains("name=\"file\"")
                    .body_contains("filename=\"resume.pdf\"");
                then.status(200).json_body(json!({"text": "Jane Doe"}));
            })
            .await;

        let client = HttpScreeningClient::new(&server.base_url()).unwrap();
        let text = client.parse_document(&pdf_file()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "Jane Doe");
    }

    #[tokio::test]
    async fn test_analyze_sends_camel_case_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/analyze").json_body(json!({
                    "resumeText": "Jane Doe",
                    "jobDescription": "Python developer"
                }));
                then.status(200).json_body(json!({
                    "score": 55,
                    "strengths": [],
                    "missingSkills": ["AWS"],
                    "suggestions": []
                }));
            })
            .await;

        let client = HttpScreeningClient::new(&format!("{}/", server.base_url())).unwrap();
        let result = client.analyze("Jane Doe", "Python developer").await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.score, 55);
        assert_eq!(result.missing_skills, vec!["AWS".to_string()]);
    }

    #[tokio::test]
    async fn test_error_envelope_message_is_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/analyze");
                then.status(502).json_body(json!({
                    "error": {"code": "NON_JSON_OUTPUT", "message": "AI returned non-JSON content. Please try again."}
                }));
            })
            .await;

        let client = HttpScreeningClient::new(&server.base_url()).unwrap();
        match client.analyze("r", "j").await.unwrap_err() {
            ClientError::Server { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "AI returned non-JSON content. Please try again.");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_plain_text_error_body_is_kept() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/parse");
                then.status(500).body("Failed to parse file");
            })
            .await;

        let client = HttpScreeningClient::new(&server.base_url()).unwrap();
        let err = client.parse_document(&pdf_file()).await.unwrap_err();
        assert!(matches!(err, ClientError::Server { status: 500, ref message } if message == "Failed to parse file"));
    }
}
