/*
[INPUT]:  Raw form field values as entered by the user
[OUTPUT]: Per-task input drafts and the selected image handle
[POS]:    Data layer - user-editable input state before transformation
[UPDATE]: When a form field is added or removed
*/

use serde::Serialize;
use serde_json::{Map, Value, json};
use std::path::Path;

use super::enums::{Crop, Season, TaskKind};
use crate::http::{AgriError, Result};

/// Image selected for disease detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Wrap raw bytes, inferring the content type from the file extension
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read an image from disk
    pub async fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiseaseDraft {
    pub file: Option<ImageFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IrrigationDraft {
    pub temperature: String,
    pub humidity: String,
    pub rainfall: String,
    pub soil_type: String,
    pub ph: String,
    pub ec: String,
    pub previous_moisture: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct YieldDraft {
    pub crop: Crop,
    pub area: String,
    pub rainfall: String,
    pub temperature: String,
    pub season: Season,
    pub soil_type: String,
    pub ph: String,
    pub fertilizer_level: String,
}

/// Current field values of one task's form, tagged by task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputDraft {
    Disease(DiseaseDraft),
    Irrigation(IrrigationDraft),
    Yield(YieldDraft),
}

impl InputDraft {
    /// Empty draft for a task, with the form's default choices preselected
    pub fn empty(task: TaskKind) -> Self {
        match task {
            TaskKind::DiseaseDetection => InputDraft::Disease(DiseaseDraft::default()),
            TaskKind::IrrigationPrediction => InputDraft::Irrigation(IrrigationDraft::default()),
            TaskKind::YieldPrediction => InputDraft::Yield(YieldDraft::default()),
        }
    }

    pub fn task(&self) -> TaskKind {
        match self {
            InputDraft::Disease(_) => TaskKind::DiseaseDetection,
            InputDraft::Irrigation(_) => TaskKind::IrrigationPrediction,
            InputDraft::Yield(_) => TaskKind::YieldPrediction,
        }
    }

    /// Snapshot sent as `inputs` to the recommendation service.
    ///
    /// Disease sends only the file name; the numeric forms send their fields
    /// as entered.
    pub fn snapshot(&self) -> Value {
        match self {
            InputDraft::Disease(draft) => {
                let image = draft
                    .file
                    .as_ref()
                    .map(|file| Value::String(file.file_name.clone()))
                    .unwrap_or(Value::Null);
                json!({ "image": image })
            }
            InputDraft::Irrigation(draft) => {
                serde_json::to_value(draft).unwrap_or_else(|_| Value::Object(Map::new()))
            }
            InputDraft::Yield(draft) => {
                serde_json::to_value(draft).unwrap_or_else(|_| Value::Object(Map::new()))
            }
        }
    }

    /// Set one form field by its wire name, as a form change handler would.
    ///
    /// Numeric fields take raw text and are only parsed at submission;
    /// `crop` and `season` must name one of their choices.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let task = self.task();
        let value = value.into();
        let unknown = || AgriError::UnknownField {
            task,
            field: name.to_string(),
        };
        let slot = match self {
            InputDraft::Disease(_) => return Err(unknown()),
            InputDraft::Irrigation(draft) => match name {
                "temperature" => &mut draft.temperature,
                "humidity" => &mut draft.humidity,
                "rainfall" => &mut draft.rainfall,
                "soil_type" => &mut draft.soil_type,
                "ph" => &mut draft.ph,
                "ec" => &mut draft.ec,
                "previous_moisture" => &mut draft.previous_moisture,
                _ => return Err(unknown()),
            },
            InputDraft::Yield(draft) => match name {
                "crop" => {
                    draft.crop = value.parse().map_err(|_| AgriError::InvalidInput {
                        field: "crop",
                        value: value.clone(),
                    })?;
                    return Ok(());
                }
                "season" => {
                    draft.season = value.parse().map_err(|_| AgriError::InvalidInput {
                        field: "season",
                        value: value.clone(),
                    })?;
                    return Ok(());
                }
                "area" => &mut draft.area,
                "rainfall" => &mut draft.rainfall,
                "temperature" => &mut draft.temperature,
                "soil_type" => &mut draft.soil_type,
                "ph" => &mut draft.ph,
                "fertilizer_level" => &mut draft.fertilizer_level,
                _ => return Err(unknown()),
            },
        };
        *slot = value;
        Ok(())
    }
}

impl From<DiseaseDraft> for InputDraft {
    fn from(draft: DiseaseDraft) -> Self {
        InputDraft::Disease(draft)
    }
}

impl From<IrrigationDraft> for InputDraft {
    fn from(draft: IrrigationDraft) -> Self {
        InputDraft::Irrigation(draft)
    }
}

impl From<YieldDraft> for InputDraft {
    fn from(draft: YieldDraft) -> Self {
        InputDraft::Yield(draft)
    }
}
