//! Analysis orchestration: Prompt Builder → model call → Result Sanitizer.

use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::LanguageModel;
use crate::screening::models::{AnalysisResult, AnalyzeRequest};
use crate::screening::prompts::build_screening_prompt;
use crate::screening::sanitizer::sanitize_model_output;

/// Both texts, checked to be present and non-blank.
#[derive(Debug)]
pub struct ScreeningInputs {
    pub resume_text: String,
    pub job_description: String,
}

impl AnalyzeRequest {
    pub fn into_inputs(self) -> Result<ScreeningInputs, AppError> {
        match (non_blank(self.resume_text), non_blank(self.job_description)) {
            (Some(resume_text), Some(job_description)) => Ok(ScreeningInputs {
                resume_text,
                job_description,
            }),
            _ => Err(AppError::Validation(
                "Both resumeText and jobDescription are required.".to_string(),
            )),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Runs one screening against the model and returns the validated result.
pub async fn analyze_resume(
    model: &dyn LanguageModel,
    inputs: &ScreeningInputs,
) -> Result<AnalysisResult, AppError> {
    let prompt = build_screening_prompt(&inputs.resume_text, &inputs.job_description);

    info!(
        "Screening resume ({} chars) against job description ({} chars) with {}",
        inputs.resume_text.len(),
        inputs.job_description.len(),
        model.model_name()
    );

    let raw = model.generate(&prompt.system, &prompt.prompt).await?;
    debug!("Model returned {} chars", raw.len());

    let result = sanitize_model_output(&raw)?;
    info!("Screening complete: score={}", result.score);
    Ok(result)
}
