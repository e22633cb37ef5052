use chrono_tz::Tz;

use crate::{state::CurrentResult, view::model::ResultViewModel};

const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: Arial, sans-serif; padding: 40px; background: white; color: #333; }
.header { text-align: center; margin-bottom: 30px; border-bottom: 3px solid #000; padding-bottom: 20px; }
.header h1 { font-size: 28px; color: #000; margin-bottom: 10px; }
.timestamp { color: #666; font-size: 14px; }
.prediction-box { background: #f0f0f0; padding: 20px; border-radius: 8px; margin: 20px 0; border-left: 5px solid var(--verdict); }
.prediction-label { font-size: 18px; font-weight: bold; color: var(--verdict); margin-bottom: 10px; }
.confidence { font-size: 24px; font-weight: bold; color: #000; }
.section { margin: 25px 0; page-break-inside: avoid; }
.section h2 { font-size: 18px; color: #000; margin-bottom: 15px; border-bottom: 2px solid #ddd; padding-bottom: 5px; }
.details-grid { display: grid; grid-template-columns: 200px 1fr; gap: 10px; margin: 15px 0; }
.detail-label { font-weight: bold; color: #555; }
.indicator-item { background: #f9f9f9; padding: 12px; margin: 8px 0; border-radius: 5px; border-left: 3px solid #666; }
.recommendation { background: #fff8dc; padding: 12px; margin: 8px 0; border-radius: 5px; border-left: 3px solid #ffa500; }
.risk-low { color: #00a832; } .risk-medium { color: #d88a00; } .risk-high, .risk-critical { color: #cc0000; }
.very-high, .high { color: #000; } .medium { color: #555; } .low { color: #888; }
.cloud span { display: inline-block; margin: 4px 8px; font-weight: bold; }
.cloud .spam { color: #cc0000; } .cloud .ham { color: #008a2a; }
.keyword { display: inline-block; background: #ffe0e0; padding: 5px 10px; margin: 4px; border-radius: 4px; font-weight: bold; color: #cc0000; }
.footer { margin-top: 40px; padding-top: 20px; border-top: 2px solid #ddd; text-align: center; color: #666; font-size: 12px; }
@media print { body { padding: 20px; } .no-print { display: none; } }
"#;

/// Standalone printable document for the current result.
pub fn printable_report(current: &CurrentResult, tz: Tz) -> String {
    let result = &current.result;
    let vm = ResultViewModel::new(result);
    let indicators = &result.spam_indicators;
    let (verdict, color) = if vm.is_spam {
        ("SPAM 🚫", "#ff0040")
    } else {
        ("LEGITIMATE ✅", "#00ff41")
    };
    let generated = current
        .timestamp
        .with_timezone(&tz)
        .format("%Y-%m-%d %H:%M:%S %Z");

    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Spam Detection Report</title>\n<style>");
    html.push_str(STYLE);
    html.push_str(&format!(":root {{ --verdict: {color}; }}\n</style>\n</head>\n<body>\n"));

    html.push_str(&format!(
        "<div class=\"header\"><h1>📧 Email Spam Detection Report</h1>\
         <p class=\"timestamp\">Generated on: {generated}</p></div>\n"
    ));
    html.push_str(&format!(
        "<div class=\"prediction-box\"><div class=\"prediction-label\">Classification: {verdict}</div>\
         <div class=\"confidence {}\">Confidence: {:.2}% ({})</div>\
         <div style=\"margin-top: 10px; color: #666;\">Risk Level: <strong class=\"risk-{}\">{} {}</strong></div></div>\n",
        vm.tier.class(),
        vm.confidence_percent,
        vm.tier.label(),
        vm.risk.class,
        vm.risk.icon,
        vm.risk.label
    ));

    html.push_str(&format!(
        "<div class=\"section\"><h2>📊 Email Details</h2><div class=\"details-grid\">\
         <div class=\"detail-label\">Original Length:</div><div>{} characters</div>\
         <div class=\"detail-label\">Processed Length:</div><div>{} characters</div></div></div>\n",
        result.email_length, result.cleaned_length
    ));

    html.push_str(&format!(
        "<div class=\"section\"><h2>🔍 Spam Indicators</h2>\
         <div class=\"indicator-item\"><strong>URLs Detected:</strong> {}</div>\
         <div class=\"indicator-item\"><strong>Capitalization:</strong> {:.1}%</div>\
         <div class=\"indicator-item\"><strong>Exclamation Marks:</strong> {}</div>\
         <div class=\"indicator-item\"><strong>Money Terms:</strong> {}</div>\
         <div class=\"indicator-item\"><strong>Urgency Words:</strong> {}</div></div>\n",
        indicators.url_count,
        indicators.caps_percentage,
        indicators.exclamation_count,
        indicators.money_terms.len(),
        indicators.urgency_words.len()
    ));

    if !indicators.suspicious_keywords.is_empty() {
        html.push_str("<div class=\"section\"><h2>🚨 Suspicious Keywords</h2><div>");
        for keyword in &indicators.suspicious_keywords {
            html.push_str(&format!("<span class=\"keyword\">{}</span>", escape_html(keyword)));
        }
        html.push_str("</div></div>\n");
    }

    if !vm.word_cloud().is_empty() {
        html.push_str("<div class=\"section\"><h2>🔤 Key Words</h2><div class=\"cloud\">");
        for word in vm.word_cloud() {
            html.push_str(&format!(
                "<span class=\"{}\" style=\"font-size: {:.0}px;\">{}</span>",
                word.lean.as_str(),
                word.font_size_px(),
                escape_html(&word.word)
            ));
        }
        html.push_str("</div></div>\n");
    }

    if !vm.recommendations.is_empty() {
        html.push_str("<div class=\"section\"><h2>🛡️ Safety Recommendations</h2>");
        for rec in &vm.recommendations {
            html.push_str(&format!(
                "<div class=\"recommendation risk-{}\">{}</div>",
                rec.class,
                escape_html(&rec.text)
            ));
        }
        html.push_str("</div>\n");
    }

    if let Some(comparison) = &vm.comparison {
        html.push_str(&format!(
            "<div class=\"section\"><h2>🤖 Model Comparison</h2>\
             <p><strong>Model Agreement:</strong> {}% ({})</p><div style=\"margin-top: 15px;\">",
            comparison.agreement_percent,
            escape_html(comparison.level.description())
        ));
        for card in &comparison.models {
            html.push_str(&format!(
                "<div class=\"indicator-item\"><strong>{}:</strong> {} ({}% confidence)</div>",
                escape_html(&card.name),
                card.prediction.as_str().to_uppercase(),
                card.confidence_percent
            ));
        }
        html.push_str("</div></div>\n");
    }

    html.push_str(
        "<div class=\"footer\"><p>Email Spam Detection System</p>\
         <p>This report was automatically generated from the spam detection service response</p></div>\n\
         <div class=\"no-print\" style=\"text-align: center; margin-top: 30px;\">\
         <button onclick=\"window.print()\">Print / Save as PDF</button></div>\n</body>\n</html>\n",
    );
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
