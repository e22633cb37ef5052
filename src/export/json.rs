use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    domain::{
        BatchResponse, ModelComparison, Patterns, Prediction, RiskLevel, SpamIndicators,
        WordImportance,
    },
    state::CurrentResult,
    view::model::CLOUD_SIZE,
};

pub fn batch_results_json(response: &BatchResponse) -> Result<String> {
    Ok(serde_json::to_string_pretty(response)?)
}

#[derive(Debug, Serialize)]
struct ExportedResult<'a> {
    timestamp: DateTime<Utc>,
    email_analyzed: &'a str,
    prediction: Prediction,
    confidence: f64,
    risk_level: RiskLevel,
    spam_indicators: &'a SpamIndicators,
    safety_recommendations: &'a [String],
    word_importance: &'a [WordImportance],
    patterns: &'a Patterns,
    model_comparison: Option<&'a ModelComparison>,
    email_length: u64,
    cleaned_length: u64,
}

/// Single-result download; word importance is cut to the cloud's leading words.
pub fn result_json(current: &CurrentResult) -> Result<String> {
    let result = &current.result;
    let words = &result.word_importance[..result.word_importance.len().min(CLOUD_SIZE)];
    let export = ExportedResult {
        timestamp: current.timestamp,
        email_analyzed: &current.email_text,
        prediction: result.prediction,
        confidence: result.confidence,
        risk_level: result.risk_level,
        spam_indicators: &result.spam_indicators,
        safety_recommendations: &result.safety_recommendations,
        word_importance: words,
        patterns: &result.patterns,
        model_comparison: result.model_comparison.as_ref(),
        email_length: result.email_length,
        cleaned_length: result.cleaned_length,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}
