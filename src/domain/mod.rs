pub mod batch;
pub mod history;
pub mod types;

pub use batch::{BatchItemResult, BatchResponse, BatchRow, BatchSummary, MAX_BATCH_ROWS};
pub use history::{HistoryEntry, HistoryStats, NewScan};
pub use types::{
    ClassificationResult, HealthReport, HealthStatus, ModelComparison, ModelVote, Patterns,
    Prediction, RiskLevel, SpamIndicators, WordImportance, WordLean,
};
