use std::fmt;

use serde::{Deserialize, Serialize};

/// Spam/ham label. Anything that is not "spam" (case-insensitive) reads as ham.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Prediction {
    Spam,
    Ham,
}

impl Prediction {
    pub fn is_spam(self) -> bool {
        matches!(self, Prediction::Spam)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Prediction::Spam => "spam",
            Prediction::Ham => "ham",
        }
    }
}

impl From<String> for Prediction {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("spam") {
            Prediction::Spam
        } else {
            Prediction::Ham
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-assessed risk. Unrecognised values fall back to `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }

    /// Lower-case class used to tag recommendations and table badges.
    pub fn css_class(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl From<String> for RiskLevel {
    fn from(value: String) -> Self {
        match value.trim() {
            "Medium" => RiskLevel::Medium,
            "High" => RiskLevel::High,
            "Critical" => RiskLevel::Critical,
            _ => RiskLevel::Low,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpamIndicators {
    pub url_count: u32,
    pub caps_percentage: f64,
    pub exclamation_count: u32,
    pub money_terms: Vec<String>,
    pub urgency_words: Vec<String>,
    pub suspicious_keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum WordLean {
    Spam,
    Ham,
}

impl WordLean {
    pub fn as_str(self) -> &'static str {
        match self {
            WordLean::Spam => "spam",
            WordLean::Ham => "ham",
        }
    }
}

impl From<String> for WordLean {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("spam") {
            WordLean::Spam
        } else {
            WordLean::Ham
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordImportance {
    pub word: String,
    pub importance: f64,
    #[serde(rename = "type")]
    pub lean: WordLean,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Patterns {
    pub urls: Vec<String>,
    pub email_addresses: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub dollar_amounts: Vec<String>,
    pub ip_addresses: Vec<String>,
    pub percentages: Vec<String>,
}

/// One model's vote. `confidence` is already a percent (0–100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVote {
    pub model_name: String,
    pub prediction: Prediction,
    pub confidence: f64,
}

/// `agreement` is a percent (0–100).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelComparison {
    #[serde(default)]
    pub agreement: f64,
    #[serde(default)]
    pub models: Vec<ModelVote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_models: Option<u32>,
}

/// Successful single prediction. `confidence` is a fraction (0–1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub prediction: Prediction,
    pub confidence: f64,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub email_length: u64,
    #[serde(default)]
    pub cleaned_length: u64,
    #[serde(default)]
    pub spam_indicators: SpamIndicators,
    #[serde(default)]
    pub safety_recommendations: Vec<String>,
    #[serde(default)]
    pub word_importance: Vec<WordImportance>,
    #[serde(default)]
    pub patterns: Patterns,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_comparison: Option<ModelComparison>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub models_loaded: bool,
}

/// What the status indicator shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthStatus {
    #[default]
    Unknown,
    Online,
    Degraded,
    Offline,
}

impl HealthStatus {
    pub fn from_report(report: &HealthReport) -> Self {
        if report.status == "healthy" && report.models_loaded {
            HealthStatus::Online
        } else {
            HealthStatus::Degraded
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Unknown => "Checking...",
            HealthStatus::Online => "Online ✓",
            HealthStatus::Degraded => "Models Not Loaded",
            HealthStatus::Offline => "Offline ✗",
        }
    }
}
