/*
[INPUT]:  InputDraft as entered by the user
[OUTPUT]: Typed Payload ready for dispatch, or the first input error
[POS]:    Transform layer - validation and numeric parsing before dispatch
[UPDATE]: When form fields or their required/optional status change
*/

use crate::http::{AgriError, Result};
use crate::types::{
    DiseaseDraft, InputDraft, IrrigationDraft, IrrigationRequest, Payload, YieldDraft,
    YieldRequest,
};

impl InputDraft {
    /// Validate the draft and build the request body for its task.
    ///
    /// Fields are checked in form order; the first failure is returned.
    pub fn to_payload(&self) -> Result<Payload> {
        match self {
            InputDraft::Disease(draft) => disease_payload(draft),
            InputDraft::Irrigation(draft) => irrigation_payload(draft),
            InputDraft::Yield(draft) => yield_payload(draft),
        }
    }
}

fn disease_payload(draft: &DiseaseDraft) -> Result<Payload> {
    let file = draft
        .file
        .clone()
        .ok_or(AgriError::MissingInput { field: "file" })?;
    Ok(Payload::Disease(file))
}

fn irrigation_payload(draft: &IrrigationDraft) -> Result<Payload> {
    Ok(Payload::Irrigation(IrrigationRequest {
        temperature: required("temperature", &draft.temperature)?,
        humidity: required("humidity", &draft.humidity)?,
        rainfall: required("rainfall", &draft.rainfall)?,
        soil_type: optional_text(&draft.soil_type),
        ph: optional("ph", &draft.ph)?,
        ec: optional("ec", &draft.ec)?,
        previous_moisture: required("previous_moisture", &draft.previous_moisture)?,
    }))
}

fn yield_payload(draft: &YieldDraft) -> Result<Payload> {
    Ok(Payload::Yield(YieldRequest {
        crop: draft.crop,
        area: required("area", &draft.area)?,
        rainfall: required("rainfall", &draft.rainfall)?,
        temperature: required("temperature", &draft.temperature)?,
        season: draft.season,
        soil_type: optional_text(&draft.soil_type),
        ph: required("ph", &draft.ph)?,
        fertilizer_level: required("fertilizer_level", &draft.fertilizer_level)?,
    }))
}

fn required(field: &'static str, raw: &str) -> Result<f64> {
    optional(field, raw)?.ok_or(AgriError::MissingInput { field })
}

fn optional(field: &'static str, raw: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(AgriError::InvalidInput {
            field,
            value: raw.to_string(),
        }),
    }
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
