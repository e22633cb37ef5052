use crate::{
    domain::{BatchResponse, BatchRow},
    view::model::BatchViewModel,
};

const HEADER: &str = "ID,Email Preview,Prediction,Confidence,Risk Level,URLs,Suspicious Keywords\n";
const PREVIEW_CHARS: usize = 100;

/// Successful rows only, numbered by their position in the service reply.
pub fn batch_results_csv(response: &BatchResponse, inputs: &[BatchRow]) -> String {
    let table = BatchViewModel::new(response, inputs);
    let mut csv = String::from(HEADER);
    for row in &table.rows {
        let preview: String = row.text.chars().take(PREVIEW_CHARS).collect();
        csv.push_str(&format!(
            "{},{},{},{:.1}%,{},{},{}\n",
            row.position,
            quote(&preview),
            row.prediction,
            row.confidence_percent,
            row.risk_level,
            row.url_count,
            row.suspicious_keywords_count
        ));
    }
    csv
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
