//! Prompt Builder for resume screening. Pure and deterministic: the same
//! inputs always produce the same system instruction and prompt.

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, TEXT_FENCE};

const SCREENER_PERSONA: &str = "You are an expert technical recruiter and resume screener. \
    Compare a resume to a job description and score the match objectively.";

const SCHEMA_AND_RULES: &str = r#"Required JSON schema (no additional keys):
{
  "score": number between 0 and 100,
  "strengths": string[],
  "missingSkills": string[],
  "suggestions": string[]
}

Instructions:
- Score based on relevance of skills, experience, tools, and responsibilities.
- strengths: concrete and specific matches.
- missingSkills: important skills from the job description that are not clearly present in the resume.
- suggestions: actionable, brief improvements to increase the score.
- Output ONLY the JSON object and ensure it is strictly valid JSON."#;

/// A system instruction plus user prompt, ready for `LanguageModel::generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningPrompt {
    pub system: String,
    pub prompt: String,
}

/// Embeds both texts verbatim between `"""` fences under fixed headings.
pub fn build_screening_prompt(resume_text: &str, job_description: &str) -> ScreeningPrompt {
    ScreeningPrompt {
        system: format!("{SCREENER_PERSONA} {JSON_ONLY_SYSTEM}"),
        prompt: format!(
            "{SCHEMA_AND_RULES}\n\nResume:\n{TEXT_FENCE}\n{resume_text}\n{TEXT_FENCE}\n\n\
             Job Description:\n{TEXT_FENCE}\n{job_description}\n{TEXT_FENCE}\n"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_both_texts_verbatim() {
        let p = build_screening_prompt("Jane Doe\n  Rust, Go", "Looking for a Python developer");
        assert!(p
            .prompt
            .contains("Resume:\n\"\"\"\nJane Doe\n  Rust, Go\n\"\"\""));
        assert!(p
            .prompt
            .contains("Job Description:\n\"\"\"\nLooking for a Python developer\n\"\"\""));
    }

    #[test]
    fn test_prompt_describes_schema() {
        let p = build_screening_prompt("r", "j");
        for key in ["\"score\"", "\"strengths\"", "\"missingSkills\"", "\"suggestions\""] {
            assert!(p.prompt.contains(key), "schema should mention {key}");
        }
    }

    #[test]
    fn test_system_forbids_prose_and_fences() {
        let p = build_screening_prompt("r", "j");
        assert!(p.system.contains("recruiter"));
        assert!(p.system.contains("No prose, no markdown, no code fences."));
    }

    #[test]
    fn test_placeholder_like_text_is_not_substituted() {
        let p = build_screening_prompt("{job_description}", "{resume_text}");
        assert!(p.prompt.contains("Resume:\n\"\"\"\n{job_description}\n"));
        assert!(p.prompt.contains("Job Description:\n\"\"\"\n{resume_text}\n"));
    }

    #[test]
    fn test_builder_is_deterministic() {
        assert_eq!(
            build_screening_prompt("resume", "jd"),
            build_screening_prompt("resume", "jd")
        );
    }
}
