/*
[INPUT]:  InputDraft edits, submission triggers, backend completions
[OUTPUT]: Per-task session state (draft, in-flight flag, result, error, advice)
[POS]:    Session domain layer - one generic session for all three tasks
[UPDATE]: When submission guards or completion handling change
*/

pub mod overlay;
pub mod state_machine;

pub use overlay::{OverlayState, RecommendationOverlay};
pub use state_machine::{SessionAction, SessionStateMachine, SessionStatus, StateError};

use agri_predict_adapter::{
    AgriError, ImageFile, InputDraft, Payload, PredictionResult, RecommendRequest, TaskKind,
};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Why a trigger was refused. Refusals never change session state.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a submission is already in flight")]
    AlreadySubmitting,

    #[error(transparent)]
    Input(#[from] AgriError),

    #[error("no prediction to explain")]
    NoResult,

    #[error("advice already requested or shown")]
    AdviceUnavailable,

    #[error("{0} does not take an image")]
    NotAnImageTask(TaskKind),

    #[error(transparent)]
    State(#[from] StateError),
}

/// Work handed to the runtime when a submission is accepted
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub generation: u64,
    pub payload: Payload,
}

/// Work handed to the runtime when advice is requested
#[derive(Debug, Clone)]
pub struct ExplainTicket {
    pub generation: u64,
    pub request: RecommendRequest,
}

/// State for one task page.
///
/// Transitions are driven by `begin_*` (user triggers) and `complete_*`
/// (backend completions). Completions are matched against the generation of
/// the trigger that produced them; anything superseded is dropped.
#[derive(Debug)]
pub struct TaskSession {
    id: Uuid,
    draft: InputDraft,
    machine: SessionStateMachine,
    result: Option<PredictionResult>,
    error: Option<String>,
    overlay: RecommendationOverlay,
    generation: u64,
}

impl TaskSession {
    /// Fresh session with an empty form
    pub fn new(task: TaskKind) -> Self {
        Self::with_draft(InputDraft::empty(task))
    }

    pub fn with_draft(draft: InputDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            draft,
            machine: SessionStateMachine::default(),
            result: None,
            error: None,
            overlay: RecommendationOverlay::default(),
            generation: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn task(&self) -> TaskKind {
        self.draft.task()
    }

    pub fn draft(&self) -> &InputDraft {
        &self.draft
    }

    pub fn status(&self) -> SessionStatus {
        self.machine.state()
    }

    pub fn is_submitting(&self) -> bool {
        self.status() == SessionStatus::Submitting
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    /// User-facing message of the last failed submission
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn overlay(&self) -> &RecommendationOverlay {
        &self.overlay
    }

    /// Edit one form field. Allowed in every state, including while
    /// submitting; the in-flight payload was already built.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), SessionError> {
        self.draft.set_field(name, value)?;
        Ok(())
    }

    /// Choose a new leaf image.
    ///
    /// Outside `Submitting` this also clears the previous result, error and
    /// advice, returning the session to `Idle`.
    pub fn select_file(&mut self, file: ImageFile) -> Result<(), SessionError> {
        let task = self.task();
        let InputDraft::Disease(draft) = &mut self.draft else {
            return Err(SessionError::NotAnImageTask(task));
        };
        draft.file = Some(file);

        if self.machine.can_transition(SessionAction::Reset) {
            self.machine.transition(SessionAction::Reset)?;
            self.result = None;
            self.error = None;
            self.overlay.reset();
        }
        Ok(())
    }

    /// Build the payload the current draft would submit
    pub fn validate(&self) -> Result<Payload, AgriError> {
        self.draft.to_payload()
    }

    /// Whether a submit control should be enabled
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.validate().is_ok()
    }

    /// Enter `Submitting`. Refused while already submitting or when the
    /// draft does not transform into a payload.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SessionError> {
        if !self.machine.can_transition(SessionAction::Submit) {
            debug!(session = %self.id, "submit ignored, already in flight");
            return Err(SessionError::AlreadySubmitting);
        }
        let payload = self.validate()?;

        self.machine.transition(SessionAction::Submit)?;
        self.generation += 1;
        self.result = None;
        self.error = None;
        self.overlay.reset();

        info!(session = %self.id, task = %self.task(), generation = self.generation, "submitting");
        Ok(SubmitTicket {
            generation: self.generation,
            payload,
        })
    }

    /// Apply a prediction outcome. Returns false when it was superseded.
    pub fn complete_submit(
        &mut self,
        generation: u64,
        outcome: Result<PredictionResult, AgriError>,
    ) -> bool {
        if generation != self.generation {
            debug!(session = %self.id, generation, current = self.generation, "discarding stale prediction");
            return false;
        }
        let action = match outcome {
            Ok(_) => SessionAction::Resolve,
            Err(_) => SessionAction::Reject,
        };
        if let Err(err) = self.machine.transition(action) {
            debug!(session = %self.id, generation, error = %err, "discarding duplicate prediction");
            return false;
        }
        match outcome {
            Ok(result) => {
                info!(session = %self.id, task = %self.task(), "prediction succeeded");
                self.result = Some(result);
                self.error = None;
            }
            Err(err) => {
                match std::error::Error::source(&err) {
                    Some(source) => {
                        warn!(session = %self.id, task = %self.task(), error = %source, "prediction failed")
                    }
                    None => warn!(session = %self.id, task = %self.task(), error = %err, "prediction failed"),
                }
                self.result = None;
                self.error = Some(err.to_string());
            }
        }
        true
    }

    /// Request advice for the current result
    pub fn begin_explain(&mut self) -> Result<ExplainTicket, SessionError> {
        let result = match (self.status(), self.result.as_ref()) {
            (SessionStatus::Succeeded, Some(result)) => result,
            _ => return Err(SessionError::NoResult),
        };
        let request = RecommendRequest::for_result(&self.draft, result);
        let generation = self.overlay.begin().ok_or(SessionError::AdviceUnavailable)?;
        info!(session = %self.id, task = %self.task(), "requesting advice");
        Ok(ExplainTicket {
            generation,
            request,
        })
    }

    /// Apply an advice outcome. Failures never touch the session's own
    /// status or error slot.
    pub fn complete_explain(&mut self, generation: u64, outcome: Result<String, AgriError>) -> bool {
        self.overlay.complete(generation, outcome)
    }
}
