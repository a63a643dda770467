/*
[INPUT]:  Test scenarios needing a controllable backend
[OUTPUT]: Scripted PredictionBackend with call counters and release gates
[POS]:    Test infrastructure - shared across session integration tests
[UPDATE]: When the backend trait gains a method
*/

//! Common test utilities for agri-predict-session tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use agri_predict_adapter::{
    AgriError, Payload, PredictionBackend, PredictionResult, RecommendRequest, TaskKind,
    TransportError, YieldPrediction,
};
use agri_predict_session::TaskSession;
use async_trait::async_trait;
use tokio::sync::Semaphore;

/// Fake backend. Yield predictions report the call number as the yield so
/// tests can tell which completion was applied.
pub struct ScriptedBackend {
    submits: AtomicUsize,
    explains: AtomicUsize,
    fail_predictions: AtomicBool,
    fail_explains: AtomicBool,
    gated: bool,
    submit_gate: Semaphore,
    explain_gate: Semaphore,
}

impl ScriptedBackend {
    fn build(gated: bool) -> Arc<Self> {
        Arc::new(Self {
            submits: AtomicUsize::new(0),
            explains: AtomicUsize::new(0),
            fail_predictions: AtomicBool::new(false),
            fail_explains: AtomicBool::new(false),
            gated,
            submit_gate: Semaphore::new(0),
            explain_gate: Semaphore::new(0),
        })
    }

    /// Calls answer immediately
    pub fn instant() -> Arc<Self> {
        Self::build(false)
    }

    /// Calls wait for `release_*`
    pub fn gated() -> Arc<Self> {
        Self::build(true)
    }

    pub fn release_submit(&self) {
        self.submit_gate.add_permits(1);
    }

    pub fn release_explain(&self) {
        self.explain_gate.add_permits(1);
    }

    pub fn submits(&self) -> usize {
        self.submits.load(Ordering::SeqCst)
    }

    pub fn explains(&self) -> usize {
        self.explains.load(Ordering::SeqCst)
    }

    pub fn fail_predictions(&self, fail: bool) {
        self.fail_predictions.store(fail, Ordering::SeqCst);
    }

    pub fn fail_explains(&self, fail: bool) {
        self.fail_explains.store(fail, Ordering::SeqCst);
    }

    async fn pass(&self, gate: &Semaphore) {
        if self.gated {
            gate.acquire().await.expect("gate closed").forget();
        }
    }
}

fn api_error(code: u16) -> TransportError {
    TransportError::Api {
        code,
        message: "scripted failure".to_string(),
    }
}

#[async_trait]
impl PredictionBackend for ScriptedBackend {
    async fn submit(&self, payload: &Payload) -> agri_predict_adapter::Result<PredictionResult> {
        let call = self.submits.fetch_add(1, Ordering::SeqCst) + 1;
        self.pass(&self.submit_gate).await;
        if self.fail_predictions.load(Ordering::SeqCst) {
            return Err(AgriError::PredictionUnavailable {
                task: payload.task(),
                source: api_error(500),
            });
        }
        Ok(PredictionResult::Yield(YieldPrediction {
            predicted_yield: call as f64,
            unit: "tonnes/ha".to_string(),
            db_id: None,
        }))
    }

    async fn explain(&self, request: &RecommendRequest) -> agri_predict_adapter::Result<String> {
        let call = self.explains.fetch_add(1, Ordering::SeqCst) + 1;
        self.pass(&self.explain_gate).await;
        if self.fail_explains.load(Ordering::SeqCst) {
            return Err(AgriError::RecommendationUnavailable {
                source: api_error(502),
            });
        }
        Ok(format!("advice #{call} for {}", request.task_type))
    }
}

/// Yield session with every required field filled
pub fn filled_yield_session() -> TaskSession {
    let mut session = TaskSession::new(TaskKind::YieldPrediction);
    for (name, value) in [
        ("crop", "wheat"),
        ("area", "2.5"),
        ("rainfall", "640"),
        ("temperature", "22"),
        ("season", "rabi"),
        ("ph", "7.1"),
        ("fertilizer_level", "90"),
    ] {
        session.set_field(name, value).expect("known field");
    }
    session
}
