use std::path::Path;

use thiserror::Error;

use crate::domain::{BatchRow, MAX_BATCH_ROWS};

/// Header substrings that mark the email column. Matching is by substring,
/// so a header such as "contentious" or "content-type" also qualifies.
const EMAIL_COLUMN_HINTS: [&str; 4] = ["email", "text", "message", "content"];

pub const CSV_TEMPLATE: &str = "email\n\"Enter your email text here\"\n\"Another email text\"\n";
pub const CSV_TEMPLATE_FILENAME: &str = "email_batch_template.csv";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("CSV must have a column named \"email\", \"text\", \"message\", or \"content\"")]
    Schema,
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub async fn read_csv_file(path: &Path) -> Result<Vec<BatchRow>, IngestError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| IngestError::Io {
            path: path.display().to_string(),
            source,
        })?;
    let rows = parse_csv(&text)?;
    tracing::info!(target: "ingest", file = %path.display(), rows = rows.len(), "loaded emails from CSV");
    Ok(rows)
}

/// Plain comma splitting: quoted fields containing commas are split too.
pub fn parse_csv(text: &str) -> Result<Vec<BatchRow>, IngestError> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect();

    let Some(header) = lines.first() else {
        return Err(IngestError::Schema);
    };
    let column = email_column(header).ok_or(IngestError::Schema)?;

    let rows = lines
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(position, line)| {
            let cell = line.split(',').nth(column)?.trim();
            if cell.is_empty() {
                return None;
            }
            let text = strip_quotes(cell);
            Some(BatchRow {
                id: position as u64,
                text: text.to_string(),
            })
        })
        .take(MAX_BATCH_ROWS)
        .collect();
    Ok(rows)
}

fn email_column(header: &str) -> Option<usize> {
    header
        .to_lowercase()
        .split(',')
        .map(str::trim)
        .position(|cell| EMAIL_COLUMN_HINTS.iter().any(|hint| cell.contains(hint)))
}

fn strip_quotes(cell: &str) -> &str {
    let cell = cell.strip_prefix('"').unwrap_or(cell);
    cell.strip_suffix('"').unwrap_or(cell)
}
