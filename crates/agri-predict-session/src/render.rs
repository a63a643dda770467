/*
[INPUT]:  PredictionResult values and outgoing payloads
[OUTPUT]: Display strings for the result card and dry-run output
[POS]:    Presentation layer - read-only formatting
[UPDATE]: When a result card shows a new field
*/

use std::fmt;

use agri_predict_adapter::{Payload, PredictionResult};

/// Confidence in [0, 1] as a percentage: 0.8765 -> "87.65%"
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// Soil moisture: 42.0 -> "42.0%"
pub fn format_moisture(moisture: f64) -> String {
    format!("{moisture:.1}%")
}

pub fn format_yield(value: f64, unit: &str) -> String {
    format!("{value:.2} {unit}")
}

/// Result card for one prediction
pub struct ResultView<'a>(pub &'a PredictionResult);

impl fmt::Display for ResultView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            PredictionResult::Disease(result) => {
                writeln!(f, "Disease:    {}", result.predicted_class)?;
                write!(f, "Confidence: {}", format_confidence(result.confidence))
            }
            PredictionResult::Irrigation(result) => {
                writeln!(f, "Recommendation:     {}", result.recommendation)?;
                write!(
                    f,
                    "Predicted moisture: {}",
                    format_moisture(result.predicted_moisture)
                )
            }
            PredictionResult::Yield(result) => write!(
                f,
                "Predicted yield: {}",
                format_yield(result.predicted_yield, &result.unit)
            ),
        }
    }
}

/// What a dry run would send, without the image bytes
pub fn payload_summary(payload: &Payload) -> String {
    let body = match payload {
        Payload::Disease(file) => Ok(format!(
            "file={} ({}, {} bytes)",
            file.file_name,
            file.content_type,
            file.bytes.len()
        )),
        Payload::Irrigation(request) => serde_json::to_string_pretty(request),
        Payload::Yield(request) => serde_json::to_string_pretty(request),
    };
    let task = payload.task();
    match body {
        Ok(body) => format!("POST {} ({})\n{}", task.endpoint(), task.label(), body),
        Err(err) => format!("POST {} ({})\n<unserializable: {err}>", task.endpoint(), task.label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_predict_adapter::{
        Crop, DiseasePrediction, ImageFile, IrrigationPrediction, Season, YieldPrediction,
        YieldRequest,
    };

    #[test]
    fn test_number_formats() {
        assert_eq!(format_confidence(0.8765), "87.65%");
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(format_moisture(42.0), "42.0%");
        assert_eq!(format_moisture(18.26), "18.3%");
        assert_eq!(format_yield(3.456, "tonnes/ha"), "3.46 tonnes/ha");
    }

    #[test]
    fn test_result_cards() {
        let disease = PredictionResult::Disease(DiseasePrediction {
            predicted_class: "Tomato___Late_blight".to_string(),
            confidence: 0.8765,
            db_id: Some("66f0".to_string()),
        });
        let card = ResultView(&disease).to_string();
        assert!(card.contains("Tomato___Late_blight"));
        assert!(card.ends_with("87.65%"));

        let irrigation = PredictionResult::Irrigation(IrrigationPrediction {
            recommendation: "No irrigation needed".to_string(),
            predicted_moisture: 42.0,
            db_id: None,
        });
        assert!(ResultView(&irrigation).to_string().ends_with("42.0%"));

        let crop = PredictionResult::Yield(YieldPrediction {
            predicted_yield: 3.456,
            unit: "tonnes/ha".to_string(),
            db_id: None,
        });
        assert_eq!(
            ResultView(&crop).to_string(),
            "Predicted yield: 3.46 tonnes/ha"
        );
    }

    #[test]
    fn test_rendering_keeps_stored_value() {
        let result = PredictionResult::Yield(YieldPrediction {
            predicted_yield: 3.456,
            unit: "t/ha".to_string(),
            db_id: None,
        });
        let _ = ResultView(&result).to_string();
        let PredictionResult::Yield(inner) = &result else {
            unreachable!()
        };
        assert_eq!(inner.predicted_yield, 3.456);
    }

    #[test]
    fn test_payload_summary() {
        let disease = Payload::Disease(ImageFile::new("leaf.png", vec![0; 16]));
        assert_eq!(
            payload_summary(&disease),
            "POST /predict/disease/ (Disease Detection)\nfile=leaf.png (image/png, 16 bytes)"
        );

        let crop = Payload::Yield(YieldRequest {
            crop: Crop::Wheat,
            area: 2.0,
            rainfall: 640.0,
            temperature: 22.5,
            season: Season::Rabi,
            soil_type: None,
            ph: 7.1,
            fertilizer_level: 90.0,
        });
        let summary = payload_summary(&crop);
        assert!(summary.starts_with("POST /predict/yield/ (Yield Prediction)"));
        assert!(summary.contains("\"season\": \"rabi\""));
        assert!(summary.contains("\"soil_type\": null"));
    }
}
