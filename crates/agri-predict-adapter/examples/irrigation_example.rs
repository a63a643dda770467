/*
[INPUT]:  Hard-coded irrigation form values
[OUTPUT]: Irrigation prediction and agronomist advice printed to stdout
[POS]:    Examples - direct client usage without a session
[UPDATE]: When the irrigation request shape changes
*/

use agri_predict_adapter::*;

/// Example: transform a draft, predict, then ask for advice.
///
/// Expects a backend on http://localhost:8000.
#[tokio::main]
async fn main() {
    println!("=== Irrigation Prediction Example ===\n");

    let client = match AgriClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    let draft = InputDraft::Irrigation(IrrigationDraft {
        temperature: "31.5".to_string(),
        humidity: "48".to_string(),
        rainfall: "0".to_string(),
        soil_type: "Sandy".to_string(),
        ph: "6.9".to_string(),
        ec: String::new(),
        previous_moisture: "19".to_string(),
    });

    let payload = match draft.to_payload() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("✗ Input error: {}", e);
            return;
        }
    };

    let result = match client.submit(&payload).await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("✗ {}", e);
            return;
        }
    };
    println!("✓ Prediction: {:?}", result);

    match client
        .recommend(&RecommendRequest::for_result(&draft, &result))
        .await
    {
        Ok(advice) => println!("\n{}", advice),
        Err(e) => println!("✗ Advice unavailable: {}", e),
    }
}
