use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::{BatchResponse, BatchRow, ClassificationResult, HealthStatus};

/// The last single scan, with the input it was produced for.
#[derive(Debug, Clone)]
pub struct CurrentResult {
    pub result: ClassificationResult,
    pub email_text: String,
    pub timestamp: DateTime<Utc>,
}

pub type SharedHealth = Arc<RwLock<HealthStatus>>;

/// Session state shared by the command handlers.
#[derive(Default)]
pub struct AppState {
    current: Option<CurrentResult>,
    csv_rows: Option<Vec<BatchRow>>,
    batch: Option<BatchResponse>,
    health: SharedHealth,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_result(&self) -> Option<&CurrentResult> {
        self.current.as_ref()
    }

    pub fn set_current_result(&mut self, current: CurrentResult) {
        self.current = Some(current);
    }

    pub fn csv_rows(&self) -> &[BatchRow] {
        self.csv_rows.as_deref().unwrap_or_default()
    }

    /// Replaces the ingested rows wholesale and forgets the old batch reply.
    pub fn set_csv_rows(&mut self, rows: Vec<BatchRow>) {
        self.csv_rows = Some(rows);
        self.batch = None;
    }

    pub fn batch_results(&self) -> Option<&BatchResponse> {
        self.batch.as_ref()
    }

    pub fn set_batch_results(&mut self, batch: BatchResponse) {
        self.batch = Some(batch);
    }

    pub fn health(&self) -> HealthStatus {
        *self.health.read()
    }

    pub fn health_handle(&self) -> SharedHealth {
        self.health.clone()
    }
}
