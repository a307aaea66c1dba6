//! Axum route handler for the Analysis API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::screening::analyzer::analyze_resume;
use crate::screening::models::{AnalysisResult, AnalyzeRequest};
use crate::state::AppState;

/// POST /api/analyze
///
/// Inputs are checked before the credential, and both before any model call.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(request) = payload?;
    let inputs = request.into_inputs()?;

    let model = state.model.as_ref().ok_or(AppError::MissingCredential)?;

    let result = analyze_resume(model.as_ref(), &inputs).await?;
    Ok(Json(result))
}
