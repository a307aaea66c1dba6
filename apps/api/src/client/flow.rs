//! The client-side screening flow as an explicit state machine.
//!
//! ```text
//! Idle ──begin──▶ Parsing ──parsed──▶ Analyzing ──analyzed──▶ Done
//!                    │                    │
//!                    └──fail──▶ Failed ◀──┘
//! ```
//!
//! `Done` and `Failed` accept `begin` again (user resubmits). `Parsing` and
//! `Analyzing` refuse it: only one step is ever in flight. There is no retry.

use thiserror::Error;

use crate::client::{ClientError, ResumeFile, ScreeningBackend};
use crate::screening::models::AnalysisResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FlowState {
    #[default]
    Idle,
    Parsing,
    Analyzing {
        resume_text: String,
    },
    Done {
        resume_text: String,
        result: AnalysisResult,
    },
    Failed {
        step: FlowStep,
        message: String,
    },
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            FlowState::Idle => "idle",
            FlowState::Parsing => "parsing",
            FlowState::Analyzing { .. } => "analyzing",
            FlowState::Done { .. } => "done",
            FlowState::Failed { .. } => "failed",
        }
    }
}

/// Which server call a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    Parse,
    Analyze,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("a screening step is already in progress")]
    Busy,

    #[error("cannot {event} while {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ScreeningFlow {
    state: FlowState,
}

impl ScreeningFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, FlowState::Parsing | FlowState::Analyzing { .. })
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self, has_file: bool, job_description: &str) -> bool {
        !self.is_busy() && has_file && !job_description.trim().is_empty()
    }

    pub fn begin(&mut self) -> Result<(), FlowError> {
        if self.is_busy() {
            return Err(FlowError::Busy);
        }
        self.state = FlowState::Parsing;
        Ok(())
    }

    pub fn parsed(&mut self, resume_text: String) -> Result<(), FlowError> {
        match self.state {
            FlowState::Parsing => {
                self.state = FlowState::Analyzing { resume_text };
                Ok(())
            }
            _ => Err(self.invalid("finish parsing")),
        }
    }

    pub fn analyzed(&mut self, result: AnalysisResult) -> Result<(), FlowError> {
        match std::mem::take(&mut self.state) {
            FlowState::Analyzing { resume_text } => {
                self.state = FlowState::Done {
                    resume_text,
                    result,
                };
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("finish analyzing"))
            }
        }
    }

    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), FlowError> {
        let step = match self.state {
            FlowState::Parsing => FlowStep::Parse,
            FlowState::Analyzing { .. } => FlowStep::Analyze,
            _ => return Err(self.invalid("fail")),
        };
        self.state = FlowState::Failed {
            step,
            message: message.into(),
        };
        Ok(())
    }

    /// Clears a shown error.
    pub fn dismiss(&mut self) {
        if matches!(self.state, FlowState::Failed { .. }) {
            self.state = FlowState::Idle;
        }
    }

    /// The file or job description changed: any previous outcome is stale.
    pub fn inputs_changed(&mut self) {
        if !self.is_busy() {
            self.state = FlowState::Idle;
        }
    }

    fn invalid(&self, event: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            state: self.state.name(),
            event,
        }
    }
}

/// Runs parse then analyze, reporting every state change to `observe`.
///
/// Text from the parse step is handed straight to the analyze step; the
/// document is parsed exactly once per run.
pub async fn run_screening<B, F>(
    backend: &B,
    flow: &mut ScreeningFlow,
    file: &ResumeFile,
    job_description: &str,
    mut observe: F,
) -> Result<AnalysisResult, ClientError>
where
    B: ScreeningBackend + ?Sized,
    F: FnMut(&FlowState),
{
    if file.bytes.is_empty() {
        return Err(ClientError::InvalidInput(
            "Please select a PDF or DOCX file.".to_string(),
        ));
    }
    if !flow.can_submit(true, job_description) {
        if flow.is_busy() {
            return Err(FlowError::Busy.into());
        }
        return Err(ClientError::InvalidInput(
            "Please paste the job description.".to_string(),
        ));
    }

    flow.begin()?;
    observe(flow.state());

    let resume_text = match backend.parse_document(file).await {
        Ok(text) => text,
        Err(e) => {
            flow.fail(e.to_string())?;
            observe(flow.state());
            return Err(e);
        }
    };

    flow.parsed(resume_text.clone())?;
    observe(flow.state());

    match backend.analyze(&resume_text, job_description).await {
        Ok(result) => {
            flow.analyzed(result.clone())?;
            observe(flow.state());
            Ok(result)
        }
        Err(e) => {
            flow.fail(e.to_string())?;
            observe(flow.state());
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            score: 71,
            strengths: vec!["Python".to_string()],
            missing_skills: vec!["AWS".to_string()],
            suggestions: vec!["Quantify impact".to_string()],
        }
    }

    fn sample_file() -> ResumeFile {
        ResumeFile {
            file_name: "resume.docx".to_string(),
            content_type: "application/octet-stream".to_string(),
            bytes: b"PK\x03\x04".to_vec(),
        }
    }

    /// Records the order of calls and can fail either step.
    struct FakeBackend {
        calls: Mutex<Vec<String>>,
        fail_parse: bool,
        fail_analyze: bool,
    }

    impl FakeBackend {
        fn new(fail_parse: bool, fail_analyze: bool) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_parse,
                fail_analyze,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ScreeningBackend for FakeBackend {
        async fn parse_document(&self, file: &ResumeFile) -> Result<String, ClientError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("parse:{}", file.file_name));
            if self.fail_parse {
                return Err(ClientError::Server {
                    status: 400,
                    message: "Unsupported file type".to_string(),
                });
            }
            Ok("Jane Doe\nPython developer".to_string())
        }

        async fn analyze(
            &self,
            resume_text: &str,
            _job_description: &str,
        ) -> Result<AnalysisResult, ClientError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("analyze:{}", resume_text.len()));
            if self.fail_analyze {
                return Err(ClientError::Server {
                    status: 502,
                    message: "AI returned non-JSON content. Please try again.".to_string(),
                });
            }
            Ok(sample_result())
        }
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut flow = ScreeningFlow::new();
        assert_eq!(flow.state(), &FlowState::Idle);

        flow.begin().unwrap();
        assert_eq!(flow.state(), &FlowState::Parsing);
        assert!(flow.is_busy());

        flow.parsed("text".to_string()).unwrap();
        assert_eq!(flow.state().name(), "analyzing");

        flow.analyzed(sample_result()).unwrap();
        match flow.state() {
            FlowState::Done {
                resume_text,
                result,
            } => {
                assert_eq!(resume_text, "text");
                assert_eq!(result.score, 71);
            }
            other => panic!("expected Done, got {other:?}"),
        }
        assert!(!flow.is_busy());
    }

    #[test]
    fn test_begin_refused_while_in_flight() {
        let mut flow = ScreeningFlow::new();
        flow.begin().unwrap();
        assert_eq!(flow.begin(), Err(FlowError::Busy));

        flow.parsed("text".to_string()).unwrap();
        assert_eq!(flow.begin(), Err(FlowError::Busy));
        assert!(!flow.can_submit(true, "Python developer"));
    }

    #[test]
    fn test_out_of_order_events_are_rejected() {
        let mut flow = ScreeningFlow::new();
        assert_eq!(
            flow.parsed("text".to_string()),
            Err(FlowError::InvalidTransition {
                state: "idle",
                event: "finish parsing"
            })
        );

        flow.begin().unwrap();
        assert!(flow.analyzed(sample_result()).is_err());
        assert_eq!(flow.state(), &FlowState::Parsing);
    }

    #[test]
    fn test_failure_records_step_and_dismisses_to_idle() {
        let mut flow = ScreeningFlow::new();
        flow.begin().unwrap();
        flow.parsed("text".to_string()).unwrap();
        flow.fail("upstream down").unwrap();

        assert_eq!(
            flow.state(),
            &FlowState::Failed {
                step: FlowStep::Analyze,
                message: "upstream down".to_string()
            }
        );

        flow.dismiss();
        assert_eq!(flow.state(), &FlowState::Idle);
    }

    #[test]
    fn test_resubmit_allowed_after_done_or_failed() {
        let mut flow = ScreeningFlow::new();
        flow.begin().unwrap();
        flow.fail("bad file").unwrap();
        assert!(flow.can_submit(true, "jd"));
        flow.begin().unwrap();
        assert_eq!(flow.state(), &FlowState::Parsing);
    }

    #[test]
    fn test_input_change_clears_stale_result() {
        let mut flow = ScreeningFlow::new();
        flow.begin().unwrap();
        flow.parsed("text".to_string()).unwrap();
        flow.analyzed(sample_result()).unwrap();

        flow.inputs_changed();
        assert_eq!(flow.state(), &FlowState::Idle);
    }

    #[test]
    fn test_submit_requires_file_and_job_description() {
        let flow = ScreeningFlow::new();
        assert!(!flow.can_submit(false, "jd"));
        assert!(!flow.can_submit(true, "   "));
        assert!(flow.can_submit(true, "jd"));
    }

    #[tokio::test]
    async fn test_run_parses_once_then_analyzes() {
        let backend = FakeBackend::new(false, false);
        let mut flow = ScreeningFlow::new();
        let mut seen = Vec::new();

        let result = run_screening(&backend, &mut flow, &sample_file(), "Python role", |s| {
            seen.push(s.name())
        })
        .await
        .unwrap();

        assert_eq!(result, sample_result());
        assert_eq!(seen, vec!["parsing", "analyzing", "done"]);
        assert_eq!(
            backend.calls(),
            vec!["parse:resume.docx".to_string(), "analyze:25".to_string()]
        );
    }

    #[tokio::test]
    async fn test_parse_failure_halts_before_analysis() {
        let backend = FakeBackend::new(true, false);
        let mut flow = ScreeningFlow::new();
        let mut seen = Vec::new();

        let err = run_screening(&backend, &mut flow, &sample_file(), "Python role", |s| {
            seen.push(s.name())
        })
        .await
        .unwrap_err();

        assert!(matches!(err, ClientError::Server { status: 400, .. }));
        assert_eq!(seen, vec!["parsing", "failed"]);
        assert_eq!(backend.calls(), vec!["parse:resume.docx".to_string()]);
        assert!(matches!(
            flow.state(),
            FlowState::Failed {
                step: FlowStep::Parse,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_analyze_failure_is_reported_without_retry() {
        let backend = FakeBackend::new(false, true);
        let mut flow = ScreeningFlow::new();

        let err = run_screening(&backend, &mut flow, &sample_file(), "Python role", |_| {})
            .await
            .unwrap_err();

        assert!(err.to_string().contains("non-JSON"));
        assert_eq!(backend.calls().len(), 2);
        assert!(matches!(
            flow.state(),
            FlowState::Failed {
                step: FlowStep::Analyze,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_blank_job_description_makes_no_requests() {
        let backend = FakeBackend::new(false, false);
        let mut flow = ScreeningFlow::new();

        let err = run_screening(&backend, &mut flow, &sample_file(), "  ", |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::InvalidInput(_)));
        assert!(backend.calls().is_empty());
        assert_eq!(flow.state(), &FlowState::Idle);
    }
}
