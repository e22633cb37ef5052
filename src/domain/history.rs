use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{Prediction, RiskLevel};

/// A persisted single-email scan, stored in the shape the history blob has
/// always used (camelCase keys, millisecond ids).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    pub prediction: Prediction,
    /// Fraction (0–1).
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub email_text: String,
    pub timestamp: DateTime<Utc>,
}

/// Fields supplied by a finished scan; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewScan {
    pub prediction: Prediction,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub email_text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HistoryStats {
    pub total: usize,
    pub spam_count: usize,
    pub ham_count: usize,
    pub avg_confidence_percent: f64,
}
