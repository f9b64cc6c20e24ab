use pneuscope_core::{AssessRequest, BatchEntry};
use pneuscope_probe::Prediction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub audio: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples_per_second: Option<f64>,
}

impl From<PredictRequest> for AssessRequest {
    fn from(req: PredictRequest) -> Self {
        AssessRequest {
            samples: req.audio,
            samples_per_second: req.samples_per_second,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub items: Vec<PredictRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemError {
    #[serde(rename = "type")]
    pub error_type: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchItemResult {
    pub index: usize,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Prediction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ItemError>,
}

impl From<BatchEntry> for BatchItemResult {
    fn from(entry: BatchEntry) -> Self {
        match entry.result {
            Ok(prediction) => BatchItemResult {
                index: entry.index,
                success: true,
                prediction: Some(prediction),
                error: None,
            },
            Err(e) => BatchItemResult {
                index: entry.index,
                success: false,
                prediction: None,
                error: Some(ItemError {
                    error_type: e.kind(),
                    message: e.to_string(),
                }),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<BatchItemResult>,
}

impl From<Vec<BatchEntry>> for BatchResponse {
    fn from(entries: Vec<BatchEntry>) -> Self {
        let results: Vec<BatchItemResult> = entries.into_iter().map(Into::into).collect();
        let succeeded = results.iter().filter(|r| r.success).count();

        BatchResponse {
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}
