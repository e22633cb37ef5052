use serde::{Deserialize, Serialize};

use crate::domain::BatchRow;

#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub email_text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct BatchRequest<'a> {
    pub emails: &'a [BatchRow],
}

/// Fields every reply carries next to its payload.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}
