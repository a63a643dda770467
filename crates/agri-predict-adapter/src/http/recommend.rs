/*
[INPUT]:  Task label, draft snapshot and completed prediction
[OUTPUT]: Free-text agronomist advice, or RecommendationUnavailable
[POS]:    HTTP layer - recommendation endpoint
[UPDATE]: When the recommendation request or response shape changes
*/

use crate::http::{AgriClient, AgriError, Result, TransportError};
use crate::types::{InputDraft, PredictionResult, RecommendRequest, RecommendResponse};
use reqwest::Method;
use tracing::debug;

impl RecommendRequest {
    /// Build the advice request for a completed prediction
    pub fn for_result(draft: &InputDraft, result: &PredictionResult) -> Self {
        Self {
            task_type: result.task().label().to_string(),
            inputs: draft.snapshot(),
            prediction: result.to_value(),
        }
    }
}

impl AgriClient {
    /// Ask the recommendation service to explain a prediction
    ///
    /// POST /ai/recommend
    pub async fn recommend(&self, req: &RecommendRequest) -> Result<String> {
        debug!(task_type = %req.task_type, "requesting recommendation");
        let outcome: std::result::Result<RecommendResponse, TransportError> = async {
            let builder = self.request(Method::POST, "/ai/recommend")?.json(req);
            self.send_json(builder).await
        }
        .await;
        outcome
            .map(|response| response.recommendation)
            .map_err(|source| AgriError::RecommendationUnavailable { source })
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{AgriClient, AgriError, ClientConfig};
    use crate::types::{
        DiseaseDraft, DiseasePrediction, ImageFile, InputDraft, PredictionResult,
        RecommendRequest,
    };
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn disease_context() -> (InputDraft, PredictionResult) {
        let draft = InputDraft::Disease(DiseaseDraft {
            file: Some(ImageFile::new("tomato.jpg", vec![7, 7, 7])),
        });
        let result = PredictionResult::Disease(DiseasePrediction {
            predicted_class: "Tomato___Leaf_Mold".to_string(),
            confidence: 0.73,
            db_id: None,
        });
        (draft, result)
    }

    #[test]
    fn test_request_for_result() {
        let (draft, result) = disease_context();
        let req = RecommendRequest::for_result(&draft, &result);
        assert_eq!(req.task_type, "Disease Detection");
        assert_eq!(req.inputs, json!({ "image": "tomato.jpg" }));
        assert_eq!(req.prediction["predicted_class"], "Tomato___Leaf_Mold");
    }

    #[tokio::test]
    async fn test_recommend_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ai/recommend"))
            .and(body_json(json!({
                "task_type": "Disease Detection",
                "inputs": { "image": "tomato.jpg" },
                "prediction": { "predicted_class": "Tomato___Leaf_Mold", "confidence": 0.73 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "recommendation": "Improve airflow and remove affected leaves."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AgriClient::with_config(ClientConfig::with_base_url(server.uri()))
            .expect("client init");
        let (draft, result) = disease_context();
        let advice = client
            .recommend(&RecommendRequest::for_result(&draft, &result))
            .await
            .expect("recommend");
        assert_eq!(advice, "Improve airflow and remove affected leaves.");
    }

    #[tokio::test]
    async fn test_recommend_failure_is_recommendation_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ai/recommend"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = AgriClient::with_config(ClientConfig::with_base_url(server.uri()))
            .expect("client init");
        let (draft, result) = disease_context();
        let err = client
            .recommend(&RecommendRequest::for_result(&draft, &result))
            .await
            .expect_err("500 should fail");
        assert!(matches!(err, AgriError::RecommendationUnavailable { .. }));
    }
}
