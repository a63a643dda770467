/*
[INPUT]:  Payloads and recommendation requests
[OUTPUT]: Async prediction/advice calls behind a swappable trait
[POS]:    Seam between session logic and the HTTP client
[UPDATE]: When a session needs a new backend call
*/

use async_trait::async_trait;

use crate::http::{AgriClient, Result};
use crate::types::{Payload, PredictionResult, RecommendRequest};

/// Backend calls a task session depends on.
///
/// `AgriClient` is the production implementation; tests substitute fakes.
#[async_trait]
pub trait PredictionBackend: Send + Sync {
    /// Run one prediction. Failures are `PredictionUnavailable`.
    async fn submit(&self, payload: &Payload) -> Result<PredictionResult>;

    /// Explain a prediction. Failures are `RecommendationUnavailable`.
    async fn explain(&self, request: &RecommendRequest) -> Result<String>;
}

#[async_trait]
impl PredictionBackend for AgriClient {
    async fn submit(&self, payload: &Payload) -> Result<PredictionResult> {
        AgriClient::submit(self, payload).await
    }

    async fn explain(&self, request: &RecommendRequest) -> Result<String> {
        self.recommend(request).await
    }
}
