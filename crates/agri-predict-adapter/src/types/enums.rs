/*
[INPUT]:  Backend schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - task descriptors and enumerated form choices
[UPDATE]: When a task, crop or season is added
*/

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Request body encoding used by a task's endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Multipart,
    Json,
}

/// The three prediction workflows.
///
/// Each variant fixes its endpoint, body encoding, the label sent as
/// `task_type` to the recommendation service, and the generic message shown
/// when a prediction call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    DiseaseDetection,
    IrrigationPrediction,
    YieldPrediction,
}

impl TaskKind {
    pub const ALL: [TaskKind; 3] = [
        TaskKind::DiseaseDetection,
        TaskKind::IrrigationPrediction,
        TaskKind::YieldPrediction,
    ];

    pub fn endpoint(self) -> &'static str {
        match self {
            TaskKind::DiseaseDetection => "/predict/disease/",
            TaskKind::IrrigationPrediction => "/predict/irrigation/",
            TaskKind::YieldPrediction => "/predict/yield/",
        }
    }

    pub fn encoding(self) -> Encoding {
        match self {
            TaskKind::DiseaseDetection => Encoding::Multipart,
            TaskKind::IrrigationPrediction | TaskKind::YieldPrediction => Encoding::Json,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskKind::DiseaseDetection => "Disease Detection",
            TaskKind::IrrigationPrediction => "Irrigation Prediction",
            TaskKind::YieldPrediction => "Yield Prediction",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            TaskKind::DiseaseDetection => "Failed to analyze image. Please try again.",
            TaskKind::IrrigationPrediction => {
                "Failed to get recommendation. Please check your inputs."
            }
            TaskKind::YieldPrediction => "Failed to predict yield. Please check your inputs.",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    #[default]
    Rice,
    Wheat,
    Maize,
    Cotton,
    Sugarcane,
}

impl Crop {
    pub fn as_str(self) -> &'static str {
        match self {
            Crop::Rice => "rice",
            Crop::Wheat => "wheat",
            Crop::Maize => "maize",
            Crop::Cotton => "cotton",
            Crop::Sugarcane => "sugarcane",
        }
    }
}

impl FromStr for Crop {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rice" => Ok(Crop::Rice),
            "wheat" => Ok(Crop::Wheat),
            "maize" => Ok(Crop::Maize),
            "cotton" => Ok(Crop::Cotton),
            "sugarcane" => Ok(Crop::Sugarcane),
            other => Err(format!("unknown crop: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    #[default]
    Kharif,
    Rabi,
    Summer,
    Winter,
    WholeYear,
}

impl Season {
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Kharif => "kharif",
            Season::Rabi => "rabi",
            Season::Summer => "summer",
            Season::Winter => "winter",
            Season::WholeYear => "whole_year",
        }
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "kharif" => Ok(Season::Kharif),
            "rabi" => Ok(Season::Rabi),
            "summer" => Ok(Season::Summer),
            "winter" => Ok(Season::Winter),
            "whole_year" => Ok(Season::WholeYear),
            other => Err(format!("unknown season: {other}")),
        }
    }
}
