use serde::{Deserialize, Serialize};

use super::types::{Prediction, RiskLevel};

pub const MAX_BATCH_ROWS: usize = 100;

/// One email pulled from an uploaded CSV. `id` is the line's position among
/// the non-blank lines of the file, header excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRow {
    pub id: u64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: u64,
    pub processed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<u64>,
    pub spam_count: u64,
    pub ham_count: u64,
    /// Fraction (0–1) over successful rows.
    pub avg_confidence: f64,
}

/// Per-row outcome. Only `status == "success"` rows carry a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItemResult {
    pub id: serde_json::Value,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Prediction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspicious_keywords_count: Option<u32>,
}

impl BatchItemResult {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// The service echoes ids back as it received them; numeric ids are the
    /// only ones this client ever sends.
    pub fn row_id(&self) -> Option<u64> {
        self.id.as_u64()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    pub summary: BatchSummary,
    pub results: Vec<BatchItemResult>,
}
