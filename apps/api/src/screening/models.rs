use serde::{Deserialize, Serialize};

/// The structured screening verdict returned by `/api/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0 – 100
    pub score: u32,
    pub strengths: Vec<String>,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Request body for `/api/analyze`. Fields are optional at the serde level so
/// that a missing field is reported as a validation error rather than a
/// deserialization rejection.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

/// Human-readable bucket for a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Strong,
    Moderate,
    Partial,
    Low,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            85.. => ScoreBand::Excellent,
            70..=84 => ScoreBand::Strong,
            55..=69 => ScoreBand::Moderate,
            40..=54 => ScoreBand::Partial,
            _ => ScoreBand::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent match",
            ScoreBand::Strong => "Strong match",
            ScoreBand::Moderate => "Moderate match",
            ScoreBand::Partial => "Partial match",
            ScoreBand::Low => "Low match",
        }
    }
}
