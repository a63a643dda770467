/*
[INPUT]:  A TaskSession, a shared PredictionBackend, user triggers
[OUTPUT]: Spawned backend calls and in-order application of their completions
[POS]:    Runtime layer - owner of one task page while it is open
[UPDATE]: When completion delivery or page lifetime rules change
*/

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use agri_predict_adapter::{AgriError, PredictionBackend, PredictionResult, TransportError};

use crate::session::{ExplainTicket, SessionError, SubmitTicket, TaskSession};

/// Completion of a spawned backend call
#[derive(Debug)]
pub enum SessionEvent {
    PredictionCompleted {
        generation: u64,
        outcome: Result<PredictionResult, AgriError>,
    },
    RecommendationCompleted {
        generation: u64,
        outcome: Result<String, AgriError>,
    },
}

/// What applying one event did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageUpdate {
    Prediction { applied: bool },
    Recommendation { applied: bool },
}

/// One open task page.
///
/// Triggers return as soon as the call is spawned. Dropping the page closes
/// the completion channel, so calls still in flight finish unobserved.
pub struct TaskPage {
    session: TaskSession,
    backend: Arc<dyn PredictionBackend>,
    tx: mpsc::UnboundedSender<SessionEvent>,
    rx: mpsc::UnboundedReceiver<SessionEvent>,
    in_flight: usize,
}

impl TaskPage {
    pub fn new(session: TaskSession, backend: Arc<dyn PredictionBackend>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session,
            backend,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn session(&self) -> &TaskSession {
        &self.session
    }

    /// Form edits go straight to the session
    pub fn session_mut(&mut self) -> &mut TaskSession {
        &mut self.session
    }

    /// Number of spawned calls whose completion has not been applied yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start a prediction for the current draft
    pub fn submit(&mut self) -> Result<(), SessionError> {
        let SubmitTicket {
            generation,
            payload,
        } = self.session.begin_submit()?;
        let task = payload.task();
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let outcome = run_guarded(
                async move { backend.submit(&payload).await },
                |source| AgriError::PredictionUnavailable { task, source },
            )
            .await;
            let event = SessionEvent::PredictionCompleted {
                generation,
                outcome,
            };
            if tx.send(event).is_err() {
                debug!(generation, "page closed, dropping prediction");
            }
        });
        Ok(())
    }

    /// Ask for advice on the current result
    pub fn explain(&mut self) -> Result<(), SessionError> {
        let ExplainTicket {
            generation,
            request,
        } = self.session.begin_explain()?;
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let outcome = run_guarded(
                async move { backend.explain(&request).await },
                |source| AgriError::RecommendationUnavailable { source },
            )
            .await;
            let event = SessionEvent::RecommendationCompleted {
                generation,
                outcome,
            };
            if tx.send(event).is_err() {
                debug!(generation, "page closed, dropping advice");
            }
        });
        Ok(())
    }

    /// Wait for the next completion and apply it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_event(&mut self) -> Option<PageUpdate> {
        if self.in_flight == 0 {
            return None;
        }
        let event = self.rx.recv().await?;
        self.in_flight -= 1;
        Some(self.apply(event))
    }

    /// Apply completions until nothing is in flight
    pub async fn settle(&mut self) {
        while self.next_event().await.is_some() {}
    }

    fn apply(&mut self, event: SessionEvent) -> PageUpdate {
        match event {
            SessionEvent::PredictionCompleted {
                generation,
                outcome,
            } => PageUpdate::Prediction {
                applied: self.session.complete_submit(generation, outcome),
            },
            SessionEvent::RecommendationCompleted {
                generation,
                outcome,
            } => PageUpdate::Recommendation {
                applied: self.session.complete_explain(generation, outcome),
            },
        }
    }
}

/// Run a backend call in its own task so a panic still produces an outcome
/// and every spawned call sends exactly one completion.
async fn run_guarded<T, F>(
    call: F,
    interrupted: impl FnOnce(TransportError) -> AgriError,
) -> Result<T, AgriError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, AgriError>> + Send + 'static,
{
    match tokio::spawn(call).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(error = %err, "backend call interrupted");
            Err(interrupted(TransportError::Interrupted(err.to_string())))
        }
    }
}
