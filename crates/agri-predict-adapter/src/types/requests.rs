/*
[INPUT]:  Validated draft values
[OUTPUT]: Typed Rust request bodies with serialization support
[POS]:    Data layer - type definitions for backend communication
[UPDATE]: When backend request schema changes
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::draft::ImageFile;
use super::enums::{Crop, Season, TaskKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationRequest {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub soil_type: Option<String>,
    pub ph: Option<f64>,
    pub ec: Option<f64>,
    pub previous_moisture: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldRequest {
    pub crop: Crop,
    pub area: f64,
    pub rainfall: f64,
    pub temperature: f64,
    pub season: Season,
    pub soil_type: Option<String>,
    pub ph: f64,
    pub fertilizer_level: f64,
}

/// Request body for one prediction call, built fresh per submission
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Disease(ImageFile),
    Irrigation(IrrigationRequest),
    Yield(YieldRequest),
}

impl Payload {
    pub fn task(&self) -> TaskKind {
        match self {
            Payload::Disease(_) => TaskKind::DiseaseDetection,
            Payload::Irrigation(_) => TaskKind::IrrigationPrediction,
            Payload::Yield(_) => TaskKind::YieldPrediction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub task_type: String,
    pub inputs: Value,
    pub prediction: Value,
}
