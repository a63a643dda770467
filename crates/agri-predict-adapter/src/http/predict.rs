/*
[INPUT]:  Typed payloads (multipart image or JSON field sets)
[OUTPUT]: Typed prediction results, or PredictionUnavailable
[POS]:    HTTP layer - the three prediction endpoints
[UPDATE]: When adding a prediction task or changing its transport
*/

use crate::http::{AgriClient, AgriError, Result, TransportError};
use crate::types::{
    DiseasePrediction, Encoding, ImageFile, IrrigationPrediction, IrrigationRequest, Payload,
    PredictionResult, TaskKind, YieldPrediction, YieldRequest,
};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

impl AgriClient {
    /// Dispatch a payload to its task's endpoint
    pub async fn submit(&self, payload: &Payload) -> Result<PredictionResult> {
        let task = payload.task();
        debug!(task = %task, endpoint = task.endpoint(), encoding = ?task.encoding(), "dispatching prediction");
        match payload {
            Payload::Disease(file) => self.predict_disease(file).await.map(PredictionResult::Disease),
            Payload::Irrigation(req) => self
                .predict_irrigation(req)
                .await
                .map(PredictionResult::Irrigation),
            Payload::Yield(req) => self.predict_yield(req).await.map(PredictionResult::Yield),
        }
    }

    /// Classify a leaf image
    ///
    /// POST /predict/disease/ (multipart, field `file`)
    pub async fn predict_disease(&self, file: &ImageFile) -> Result<DiseasePrediction> {
        let task = TaskKind::DiseaseDetection;
        let outcome: std::result::Result<DiseasePrediction, TransportError> = async {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)?;
            let form = Form::new().part("file", part);
            let builder = self.request(Method::POST, task.endpoint())?.multipart(form);
            self.send_json(builder).await
        }
        .await;
        outcome.map_err(|source| unavailable(task, source))
    }

    /// Predict soil moisture and an irrigation recommendation
    ///
    /// POST /predict/irrigation/
    pub async fn predict_irrigation(&self, req: &IrrigationRequest) -> Result<IrrigationPrediction> {
        self.post_prediction(TaskKind::IrrigationPrediction, req).await
    }

    /// Predict crop yield
    ///
    /// POST /predict/yield/
    pub async fn predict_yield(&self, req: &YieldRequest) -> Result<YieldPrediction> {
        self.post_prediction(TaskKind::YieldPrediction, req).await
    }

    async fn post_prediction<B, T>(&self, task: TaskKind, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug_assert_eq!(task.encoding(), Encoding::Json);
        let outcome: std::result::Result<T, TransportError> = async {
            let builder = self.request(Method::POST, task.endpoint())?.json(body);
            self.send_json(builder).await
        }
        .await;
        outcome.map_err(|source| unavailable(task, source))
    }
}

fn unavailable(task: TaskKind, source: TransportError) -> AgriError {
    debug!(task = %task, error = %source, "prediction call failed");
    AgriError::PredictionUnavailable { task, source }
}
