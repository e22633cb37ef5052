//! Display-ready values derived from service replies. Nothing here does I/O.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::domain::{
    BatchResponse, BatchRow, ClassificationResult, HistoryEntry, HistoryStats, ModelComparison,
    Patterns, Prediction, RiskLevel, WordImportance, WordLean,
};

/// Number of leading words highlighted in the cloud.
pub const CLOUD_SIZE: usize = 10;
const HISTORY_PREVIEW_CHARS: usize = 150;
const TABLE_PREVIEW_CHARS: usize = 50;

/// `round(confidence * 100, 2)`.
pub fn confidence_percent(confidence: f64) -> f64 {
    (confidence * 100.0 * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    ExtremelyHigh,
    High,
    Moderate,
    Low,
}

impl ConfidenceTier {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 95.0 {
            ConfidenceTier::ExtremelyHigh
        } else if percent >= 85.0 {
            ConfidenceTier::High
        } else if percent >= 70.0 {
            ConfidenceTier::Moderate
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfidenceTier::ExtremelyHigh => "🌟 Extremely High Confidence",
            ConfidenceTier::High => "✓ High Confidence",
            ConfidenceTier::Moderate => "⚡ Moderate Confidence",
            ConfidenceTier::Low => "⚠ Low Confidence",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            ConfidenceTier::ExtremelyHigh => "very-high",
            ConfidenceTier::High => "high",
            ConfidenceTier::Moderate => "medium",
            ConfidenceTier::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskDisplay {
    pub class: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
}

impl From<RiskLevel> for RiskDisplay {
    fn from(level: RiskLevel) -> Self {
        let (icon, label) = match level {
            RiskLevel::Low => ("✅", "Low Risk"),
            RiskLevel::Medium => ("⚠️", "Medium Risk"),
            RiskLevel::High => ("🔴", "High Risk"),
            RiskLevel::Critical => ("🚨", "Critical Risk"),
        };
        Self {
            class: level.css_class(),
            icon,
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub title: &'static str,
    pub body: String,
}

impl Explanation {
    pub fn new(is_spam: bool, percent: f64) -> Self {
        let high = percent > 90.0;
        match (is_spam, high) {
            (true, true) => Self {
                title: "🚨 High Confidence Spam Detection",
                body: format!(
                    "This email has been classified as SPAM with very high confidence ({percent:.2}%). \
                     The message likely contains promotional language, urgency indicators, suspicious links, \
                     or other common spam patterns. It's recommended to delete this email and not interact with it."
                ),
            },
            (true, false) => Self {
                title: "⚠️ Potential Spam Detected",
                body: format!(
                    "This email has been classified as SPAM with moderate confidence ({percent:.2}%). \
                     While the model suggests this might be spam, please use your judgment. \
                     Check for suspicious links, urgent language, or requests for personal information."
                ),
            },
            (false, true) => Self {
                title: "✅ Legitimate Email (High Confidence)",
                body: format!(
                    "This email has been classified as LEGITIMATE with very high confidence ({percent:.2}%). \
                     The message appears to be genuine communication without spam indicators. \
                     However, always verify sender identity and be cautious with links."
                ),
            },
            (false, false) => Self {
                title: "✓ Likely Legitimate Email",
                body: format!(
                    "This email has been classified as LEGITIMATE with moderate confidence ({percent:.2}%). \
                     The message appears safe, but please verify the sender and content before taking any action, \
                     especially if it contains links or requests for information."
                ),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgreementLevel {
    Consensus,
    Strong,
    Moderate,
    Disagreement,
}

impl AgreementLevel {
    pub fn from_percent(agreement: f64) -> Self {
        if agreement >= 100.0 {
            AgreementLevel::Consensus
        } else if agreement >= 75.0 {
            AgreementLevel::Strong
        } else if agreement >= 50.0 {
            AgreementLevel::Moderate
        } else {
            AgreementLevel::Disagreement
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AgreementLevel::Consensus => "✅ All models agree on the prediction",
            AgreementLevel::Strong => "👍 Strong model consensus",
            AgreementLevel::Moderate => "⚠️ Moderate agreement between models",
            AgreementLevel::Disagreement => "❌ Models disagree significantly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSummary {
    pub url_count: u32,
    pub caps_percentage: f64,
    pub exclamation_count: u32,
    pub money_terms: usize,
    pub urgency_words: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordBar {
    pub word: String,
    pub lean: WordLean,
    pub importance: f64,
    /// |importance| relative to the largest |importance|, in [0, 1].
    pub relative: f64,
}

impl WordBar {
    pub fn font_size_px(&self) -> f64 {
        14.0 + self.relative * 16.0
    }

    pub fn bar_percent(&self) -> f64 {
        self.relative * 100.0
    }
}

/// Scales every word against the largest absolute importance, keeping the
/// order the service gave.
pub fn scale_words(words: &[WordImportance]) -> Vec<WordBar> {
    let max = words
        .iter()
        .map(|w| w.importance.abs())
        .fold(0.0_f64, f64::max);
    words
        .iter()
        .map(|w| WordBar {
            word: w.word.clone(),
            lean: w.lean,
            importance: w.importance,
            relative: if max > 0.0 { w.importance.abs() / max } else { 0.0 },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternGroup {
    pub label: &'static str,
    pub items: Vec<String>,
}

fn pattern_groups(patterns: &Patterns) -> Vec<PatternGroup> {
    vec![
        PatternGroup {
            label: "URLs",
            items: patterns.urls.clone(),
        },
        PatternGroup {
            label: "Email Addresses",
            items: patterns.email_addresses.clone(),
        },
        PatternGroup {
            label: "Phone Numbers",
            items: patterns.phone_numbers.clone(),
        },
        PatternGroup {
            label: "Dollar Amounts",
            items: patterns.dollar_amounts.clone(),
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelCard {
    pub name: String,
    pub prediction: Prediction,
    pub label: &'static str,
    /// Already a percent as sent by the service.
    pub confidence_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub agreement_percent: f64,
    pub level: AgreementLevel,
    pub models: Vec<ModelCard>,
}

impl ComparisonView {
    /// `None` when there is nothing to compare.
    pub fn new(comparison: &ModelComparison) -> Option<Self> {
        if comparison.models.is_empty() {
            return None;
        }
        Some(Self {
            agreement_percent: comparison.agreement,
            level: AgreementLevel::from_percent(comparison.agreement),
            models: comparison
                .models
                .iter()
                .map(|m| ModelCard {
                    name: m.model_name.clone(),
                    prediction: m.prediction,
                    label: if m.prediction.is_spam() { "🚫 SPAM" } else { "✅ HAM" },
                    confidence_percent: m.confidence,
                })
                .collect(),
        })
    }
}

/// A safety recommendation tagged with the risk class of its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub class: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultViewModel {
    pub is_spam: bool,
    pub badge_icon: &'static str,
    pub badge_text: &'static str,
    pub confidence_percent: f64,
    pub tier: ConfidenceTier,
    pub risk: RiskDisplay,
    pub explanation: Explanation,
    pub email_length: u64,
    pub cleaned_length: u64,
    pub indicators: IndicatorSummary,
    pub keywords: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub words: Vec<WordBar>,
    pub patterns: Vec<PatternGroup>,
    pub comparison: Option<ComparisonView>,
}

impl ResultViewModel {
    pub fn new(result: &ClassificationResult) -> Self {
        let is_spam = result.prediction.is_spam();
        let confidence_percent = confidence_percent(result.confidence);
        let indicators = &result.spam_indicators;
        Self {
            is_spam,
            badge_icon: if is_spam { "⚠️" } else { "✅" },
            badge_text: if is_spam { "SPAM DETECTED" } else { "LEGITIMATE EMAIL" },
            confidence_percent,
            tier: ConfidenceTier::from_percent(confidence_percent),
            risk: RiskDisplay::from(result.risk_level),
            explanation: Explanation::new(is_spam, confidence_percent),
            email_length: result.email_length,
            cleaned_length: result.cleaned_length,
            indicators: IndicatorSummary {
                url_count: indicators.url_count,
                caps_percentage: indicators.caps_percentage,
                exclamation_count: indicators.exclamation_count,
                money_terms: indicators.money_terms.len(),
                urgency_words: indicators.urgency_words.len(),
            },
            keywords: indicators
                .suspicious_keywords
                .iter()
                .map(|k| k.to_uppercase())
                .collect(),
            recommendations: result
                .safety_recommendations
                .iter()
                .map(|text| Recommendation {
                    class: result.risk_level.css_class(),
                    text: text.clone(),
                })
                .collect(),
            words: scale_words(&result.word_importance),
            patterns: pattern_groups(&result.patterns),
            comparison: result.model_comparison.as_ref().and_then(ComparisonView::new),
        }
    }

    /// The leading words by position, as the cloud shows them.
    pub fn word_cloud(&self) -> &[WordBar] {
        &self.words[..self.words.len().min(CLOUD_SIZE)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummaryView {
    pub total: u64,
    pub processed: u64,
    pub spam_count: u64,
    pub ham_count: u64,
    pub avg_confidence_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchTableRow {
    /// 1-based position in the service's result list.
    pub position: usize,
    pub text: String,
    pub preview: String,
    pub prediction: Prediction,
    pub confidence_percent: f64,
    pub risk_level: RiskLevel,
    pub url_count: u32,
    pub suspicious_keywords_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchViewModel {
    pub summary: BatchSummaryView,
    pub rows: Vec<BatchTableRow>,
}

impl BatchViewModel {
    /// Failed rows are skipped; email text is looked up by id in `inputs`.
    pub fn new(response: &BatchResponse, inputs: &[BatchRow]) -> Self {
        let summary = &response.summary;
        let rows = response
            .results
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_success())
            .map(|(index, r)| {
                let text = r
                    .row_id()
                    .and_then(|id| inputs.iter().find(|row| row.id == id))
                    .map(|row| row.text.clone())
                    .unwrap_or_default();
                BatchTableRow {
                    position: index + 1,
                    preview: preview(&text, TABLE_PREVIEW_CHARS),
                    text,
                    prediction: r.prediction.unwrap_or(Prediction::Ham),
                    confidence_percent: r.confidence.unwrap_or(0.0) * 100.0,
                    risk_level: r.risk_level.unwrap_or_default(),
                    url_count: r.url_count.unwrap_or(0),
                    suspicious_keywords_count: r.suspicious_keywords_count.unwrap_or(0),
                }
            })
            .collect();
        Self {
            summary: BatchSummaryView {
                total: summary.total,
                processed: summary.processed,
                spam_count: summary.spam_count,
                ham_count: summary.ham_count,
                avg_confidence_percent: summary.avg_confidence * 100.0,
            },
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryItemView {
    pub id: i64,
    pub is_spam: bool,
    pub badge: &'static str,
    pub time_ago: String,
    pub preview: String,
    pub confidence_percent: f64,
    pub risk_level: RiskLevel,
    pub length: usize,
}

impl HistoryItemView {
    pub fn new(entry: &HistoryEntry, now: DateTime<Utc>, tz: Tz) -> Self {
        let is_spam = entry.prediction.is_spam();
        Self {
            id: entry.id,
            is_spam,
            badge: if is_spam { "⚠️ SPAM" } else { "✅ LEGITIMATE" },
            time_ago: time_ago(entry.timestamp, now, tz),
            preview: preview(&entry.email_text, HISTORY_PREVIEW_CHARS),
            confidence_percent: entry.confidence * 100.0,
            risk_level: entry.risk_level,
            length: entry.email_text.chars().count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub stats: HistoryStats,
    pub items: Vec<HistoryItemView>,
}

impl DashboardView {
    pub fn new(entries: &[HistoryEntry], stats: HistoryStats, now: DateTime<Utc>, tz: Tz) -> Self {
        Self {
            stats,
            items: entries
                .iter()
                .map(|e| HistoryItemView::new(e, now, tz))
                .collect(),
        }
    }
}

pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> String {
    let seconds = (now - timestamp).num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let plural = |n: i64| if n > 1 { "s" } else { "" };

    if seconds < 60 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} minute{} ago", plural(minutes))
    } else if hours < 24 {
        format!("{hours} hour{} ago", plural(hours))
    } else if days < 7 {
        format!("{days} day{} ago", plural(days))
    } else {
        timestamp.with_timezone(&tz).format("%Y-%m-%d").to_string()
    }
}

/// First `max` characters, with an ellipsis when something was cut.
pub fn preview(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::domain::{BatchItemResult, BatchSummary, ModelVote, SpamIndicators};

    fn result(prediction: Prediction, confidence: f64) -> ClassificationResult {
        ClassificationResult {
            prediction,
            confidence,
            risk_level: RiskLevel::High,
            email_length: 100,
            cleaned_length: 60,
            spam_indicators: SpamIndicators {
                suspicious_keywords: vec!["winner".into(), "free".into()],
                money_terms: vec!["$100".into()],
                ..Default::default()
            },
            safety_recommendations: vec![],
            word_importance: vec![],
            patterns: Patterns::default(),
            model_comparison: None,
        }
    }

    fn comparison(agreement: f64) -> ModelComparison {
        ModelComparison {
            agreement,
            models: vec![ModelVote {
                model_name: "svm".into(),
                prediction: Prediction::Spam,
                confidence: 88.5,
            }],
            total_models: Some(1),
        }
    }

    #[test]
    fn confidence_rounds_to_two_decimals() {
        assert_eq!(confidence_percent(0.9567), 95.67);
        assert_eq!(confidence_percent(0.123456), 12.35);
        assert_eq!(confidence_percent(1.0), 100.0);
        assert_eq!(confidence_percent(0.0), 0.0);
    }

    #[test]
    fn tiers_follow_fixed_thresholds() {
        assert_eq!(ConfidenceTier::from_percent(95.0), ConfidenceTier::ExtremelyHigh);
        assert_eq!(ConfidenceTier::from_percent(94.99), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_percent(85.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_percent(70.0), ConfidenceTier::Moderate);
        assert_eq!(ConfidenceTier::from_percent(69.99), ConfidenceTier::Low);
    }

    #[test]
    fn tier_is_derived_from_rounded_percent() {
        let vm = ResultViewModel::new(&result(Prediction::Spam, 0.94996));
        assert_eq!(vm.confidence_percent, 95.0);
        assert_eq!(vm.tier, ConfidenceTier::ExtremelyHigh);
    }

    #[test]
    fn explanation_matrix() {
        assert_eq!(Explanation::new(true, 95.0).title, "🚨 High Confidence Spam Detection");
        assert_eq!(Explanation::new(true, 90.0).title, "⚠️ Potential Spam Detected");
        assert_eq!(Explanation::new(false, 99.0).title, "✅ Legitimate Email (High Confidence)");
        assert_eq!(Explanation::new(false, 60.0).title, "✓ Likely Legitimate Email");
        assert!(Explanation::new(false, 60.5).body.contains("(60.50%)"));
    }

    #[test]
    fn agreement_descriptions() {
        let describe = |agreement| {
            ComparisonView::new(&comparison(agreement))
                .unwrap()
                .level
                .description()
        };
        assert_eq!(describe(100.0), "✅ All models agree on the prediction");
        assert_eq!(describe(75.0), "👍 Strong model consensus");
        assert_eq!(describe(60.0), "⚠️ Moderate agreement between models");
        assert_eq!(describe(10.0), "❌ Models disagree significantly");
    }

    #[test]
    fn empty_comparison_is_hidden() {
        let mut r = result(Prediction::Ham, 0.8);
        r.model_comparison = Some(ModelComparison::default());
        assert!(ResultViewModel::new(&r).comparison.is_none());
    }

    #[test]
    fn model_confidence_stays_a_percent() {
        let mut r = result(Prediction::Spam, 0.5);
        r.model_comparison = Some(comparison(100.0));
        let vm = ResultViewModel::new(&r);
        assert_eq!(vm.confidence_percent, 50.0);
        assert_eq!(vm.comparison.unwrap().models[0].confidence_percent, 88.5);
    }

    #[test]
    fn word_scale_guards_empty_and_zero() {
        assert!(scale_words(&[]).is_empty());
        let zero = scale_words(&[WordImportance {
            word: "meh".into(),
            importance: 0.0,
            lean: WordLean::Ham,
        }]);
        assert_eq!(zero[0].relative, 0.0);
        assert_eq!(zero[0].font_size_px(), 14.0);
    }

    #[test]
    fn word_scale_is_relative_to_max_abs_and_keeps_order() {
        let words: Vec<WordImportance> = [1.0, -4.0, 2.0]
            .iter()
            .enumerate()
            .map(|(i, importance)| WordImportance {
                word: format!("w{i}"),
                importance: *importance,
                lean: if *importance > 0.0 { WordLean::Spam } else { WordLean::Ham },
            })
            .collect();
        let bars = scale_words(&words);
        assert_eq!(bars.iter().map(|b| b.word.as_str()).collect::<Vec<_>>(), ["w0", "w1", "w2"]);
        assert_eq!(bars[1].relative, 1.0);
        assert_eq!(bars[0].bar_percent(), 25.0);
        assert_eq!(bars[1].font_size_px(), 30.0);
    }

    #[test]
    fn cloud_takes_first_ten_by_position() {
        let mut r = result(Prediction::Spam, 0.9);
        r.word_importance = (0..15)
            .map(|i| WordImportance {
                word: format!("w{i}"),
                importance: i as f64,
                lean: WordLean::Spam,
            })
            .collect();
        let vm = ResultViewModel::new(&r);
        assert_eq!(vm.words.len(), 15);
        assert_eq!(vm.word_cloud().len(), CLOUD_SIZE);
        assert_eq!(vm.word_cloud()[0].word, "w0");
    }

    #[test]
    fn keywords_are_uppercased() {
        let vm = ResultViewModel::new(&result(Prediction::Spam, 0.9));
        assert_eq!(vm.keywords, vec!["WINNER", "FREE"]);
        assert_eq!(vm.indicators.money_terms, 1);
        assert_eq!(vm.risk.label, "High Risk");
    }

    #[test]
    fn recommendations_carry_the_risk_class() {
        let mut r = result(Prediction::Spam, 0.9);
        r.risk_level = RiskLevel::Critical;
        r.safety_recommendations = vec!["Do not reply".into(), "Report it".into()];
        let vm = ResultViewModel::new(&r);
        assert_eq!(
            vm.recommendations,
            vec![
                Recommendation {
                    class: "critical",
                    text: "Do not reply".into()
                },
                Recommendation {
                    class: "critical",
                    text: "Report it".into()
                },
            ]
        );
    }

    #[test]
    fn batch_view_skips_failed_rows_and_numbers_by_position() {
        let response = BatchResponse {
            summary: BatchSummary {
                total: 2,
                processed: 1,
                failed: Some(1),
                spam_count: 1,
                ham_count: 0,
                avg_confidence: 0.975,
            },
            results: vec![
                BatchItemResult {
                    id: serde_json::json!(1),
                    status: "error".into(),
                    message: Some("boom".into()),
                    prediction: None,
                    confidence: None,
                    risk_level: None,
                    email_length: None,
                    url_count: None,
                    suspicious_keywords_count: None,
                },
                BatchItemResult {
                    id: serde_json::json!(2),
                    status: "success".into(),
                    message: None,
                    prediction: Some(Prediction::Spam),
                    confidence: Some(0.975),
                    risk_level: Some(RiskLevel::Critical),
                    email_length: Some(70),
                    url_count: Some(2),
                    suspicious_keywords_count: Some(4),
                },
            ],
        };
        let inputs = vec![
            BatchRow {
                id: 1,
                text: "broken".into(),
            },
            BatchRow {
                id: 2,
                text: "x".repeat(60),
            },
        ];

        let vm = BatchViewModel::new(&response, &inputs);
        assert_eq!(vm.rows.len(), 1);
        assert_eq!(vm.rows[0].position, 2);
        assert_eq!(vm.rows[0].preview, format!("{}...", "x".repeat(50)));
        assert_eq!(vm.summary.avg_confidence_percent, 97.5);
    }

    #[test]
    fn relative_times() {
        let tz = chrono_tz::UTC;
        let now = Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap();
        assert_eq!(time_ago(now - Duration::seconds(30), now, tz), "Just now");
        assert_eq!(time_ago(now - Duration::minutes(1), now, tz), "1 minute ago");
        assert_eq!(time_ago(now - Duration::minutes(5), now, tz), "5 minutes ago");
        assert_eq!(time_ago(now - Duration::hours(3), now, tz), "3 hours ago");
        assert_eq!(time_ago(now - Duration::days(2), now, tz), "2 days ago");
        assert_eq!(time_ago(now - Duration::days(9), now, tz), "2026-05-01");
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        assert_eq!(preview("héllo", 10), "héllo");
        assert_eq!(preview("ééééé", 3), "ééé...");
    }
}
