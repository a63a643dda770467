/*
[INPUT]:  User "get advice" triggers and recommendation call outcomes
[OUTPUT]: Hidden/Requesting/Shown advice state with stale-call protection
[POS]:    Session domain logic - recommendation sub-session
[UPDATE]: When advice display or retry rules change
*/

use tracing::{debug, warn};

use agri_predict_adapter::AgriError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayState {
    Hidden,
    Requesting,
    Shown(String),
}

/// Advice sub-session owned by a succeeded task session.
///
/// Failures return to `Hidden` and are only logged. `Shown` is final: the
/// trigger is gone until the owning session submits again.
#[derive(Debug)]
pub struct RecommendationOverlay {
    state: OverlayState,
    generation: u64,
    last_failure: Option<String>,
}

impl Default for RecommendationOverlay {
    fn default() -> Self {
        Self {
            state: OverlayState::Hidden,
            generation: 0,
            last_failure: None,
        }
    }
}

impl RecommendationOverlay {
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn advice(&self) -> Option<&str> {
        match &self.state {
            OverlayState::Shown(text) => Some(text),
            _ => None,
        }
    }

    /// Diagnostics only; never rendered
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Whether the "get advice" trigger is available
    pub fn can_request(&self) -> bool {
        self.state == OverlayState::Hidden
    }

    /// Enter `Requesting`, returning the generation the completion must carry
    pub fn begin(&mut self) -> Option<u64> {
        if !self.can_request() {
            return None;
        }
        self.generation += 1;
        self.state = OverlayState::Requesting;
        Some(self.generation)
    }

    /// Apply a completion. Returns false when the call was superseded.
    pub fn complete(&mut self, generation: u64, outcome: Result<String, AgriError>) -> bool {
        if generation != self.generation || self.state != OverlayState::Requesting {
            debug!(generation, current = self.generation, "discarding stale recommendation");
            return false;
        }
        match outcome {
            Ok(text) => {
                self.state = OverlayState::Shown(text);
            }
            Err(err) => {
                let detail = match std::error::Error::source(&err) {
                    Some(source) => format!("{err}: {source}"),
                    None => err.to_string(),
                };
                warn!(error = %detail, "recommendation failed");
                self.last_failure = Some(detail);
                self.state = OverlayState::Hidden;
            }
        }
        true
    }

    /// Back to `Hidden`; any in-flight call becomes stale
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = OverlayState::Hidden;
        self.last_failure = None;
    }
}
