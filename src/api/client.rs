use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::{
    BatchResponse, BatchRow, ClassificationResult, HealthReport, HealthStatus, MAX_BATCH_ROWS,
};

use super::{
    error::ApiError,
    types::{BatchRequest, Envelope, PredictRequest},
};

pub const EMPTY_EMAIL_MESSAGE: &str = "Please enter email text to check.";
pub const EMPTY_BATCH_MESSAGE: &str = "Please select a valid CSV file first";
pub const OVERSIZED_BATCH_MESSAGE: &str = "Maximum 100 emails allowed per batch";

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub base: Url,
    pub health: Url,
    pub predict: Url,
    pub batch: Url,
}

impl Endpoints {
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            health: base.join("api/health/")?,
            predict: base.join("api/predict/")?,
            batch: base.join("api/predict-batch/")?,
            base,
        })
    }
}

#[derive(Clone)]
pub struct SpamApiClient {
    http: Client,
    endpoints: Arc<Endpoints>,
}

impl SpamApiClient {
    pub fn new(http: Client, endpoints: Endpoints) -> Self {
        Self {
            http,
            endpoints: Arc::new(endpoints),
        }
    }

    pub fn base_url(&self) -> &str {
        self.endpoints.base.as_str().trim_end_matches('/')
    }

    /// Never fails: any problem just degrades the indicator.
    pub async fn check_health(&self) -> HealthStatus {
        match self.fetch_health().await {
            Ok(report) => HealthStatus::from_report(&report),
            Err(err) => {
                tracing::debug!(target: "api", error = %err, "health check failed");
                HealthStatus::Offline
            }
        }
    }

    async fn fetch_health(&self) -> Result<HealthReport, ApiError> {
        let response = self.http.get(self.endpoints.health.clone()).send().await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| ApiError::Transport(Box::new(err)))
    }

    pub async fn predict(&self, text: &str) -> Result<ClassificationResult, ApiError> {
        let email_text = text.trim();
        if email_text.is_empty() {
            return Err(ApiError::Validation(EMPTY_EMAIL_MESSAGE.into()));
        }

        let response = self
            .http
            .post(self.endpoints.predict.clone())
            .json(&PredictRequest { email_text })
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        let result = decode_reply(status, &body)?;
        tracing::info!(target: "api", chars = email_text.len(), "prediction received");
        Ok(result)
    }

    pub async fn predict_batch(&self, rows: &[BatchRow]) -> Result<BatchResponse, ApiError> {
        if rows.is_empty() {
            return Err(ApiError::Validation(EMPTY_BATCH_MESSAGE.into()));
        }
        if rows.len() > MAX_BATCH_ROWS {
            return Err(ApiError::Validation(OVERSIZED_BATCH_MESSAGE.into()));
        }

        let response = self
            .http
            .post(self.endpoints.batch.clone())
            .json(&BatchRequest { emails: rows })
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        let batch: BatchResponse = decode_reply(status, &body)?;
        tracing::info!(
            target: "api",
            total = batch.summary.total,
            processed = batch.summary.processed,
            "batch prediction received"
        );
        Ok(batch)
    }
}

/// Unparsable bodies are transport failures whatever the HTTP status; a
/// parsed body is only accepted with a 2xx status and `status == "success"`.
fn decode_reply<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ApiError> {
    let envelope: Envelope =
        serde_json::from_slice(body).map_err(|err| ApiError::Transport(Box::new(err)))?;
    if !status.is_success() || !envelope.is_success() {
        tracing::warn!(
            target: "api",
            http_status = status.as_u16(),
            message = envelope.message.as_deref().unwrap_or("-"),
            "service rejected request"
        );
        return Err(ApiError::Application {
            message: envelope.message,
        });
    }
    serde_json::from_slice(body).map_err(|err| ApiError::Transport(Box::new(err)))
}
