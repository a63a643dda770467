/*
[INPUT]:  Backend response schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with deserialization support
[POS]:    Data layer - type definitions for backend communication
[UPDATE]: When backend response schema changes
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::TaskKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseasePrediction {
    pub predicted_class: String,
    /// Probability in [0, 1]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationPrediction {
    pub recommendation: String,
    pub predicted_moisture: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldPrediction {
    pub predicted_yield: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_id: Option<String>,
}

/// Typed response of a prediction call, tagged by task
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResult {
    Disease(DiseasePrediction),
    Irrigation(IrrigationPrediction),
    Yield(YieldPrediction),
}

impl PredictionResult {
    pub fn task(&self) -> TaskKind {
        match self {
            PredictionResult::Disease(_) => TaskKind::DiseaseDetection,
            PredictionResult::Irrigation(_) => TaskKind::IrrigationPrediction,
            PredictionResult::Yield(_) => TaskKind::YieldPrediction,
        }
    }

    /// JSON form sent as `prediction` to the recommendation service
    pub fn to_value(&self) -> Value {
        let value = match self {
            PredictionResult::Disease(result) => serde_json::to_value(result),
            PredictionResult::Irrigation(result) => serde_json::to_value(result),
            PredictionResult::Yield(result) => serde_json::to_value(result),
        };
        value.unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendation: String,
}

/// Banner returned by the backend root route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    #[serde(default)]
    pub available_routes: Vec<String>,
}
