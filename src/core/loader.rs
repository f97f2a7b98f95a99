use crate::domain::model::{Dataset, Row};
use crate::utils::error::{ChartError, Result};

pub const YEAR_COLUMN: &str = "year";

/// Parses comma-separated UTF-8 bytes with a header row into a typed [`Dataset`].
///
/// The `year` column must be present and every value must parse as an integer;
/// anything else fails with [`ChartError::DataFormatError`] naming the line.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset> {
    // Flexible so a short row reaches the per-row check below with its line number.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let year_index = headers
        .iter()
        .position(|h| h.trim() == YEAR_COLUMN)
        .ok_or_else(|| ChartError::DataFormatError {
            line: 1,
            message: if headers.is_empty() {
                "dataset is empty, expected a header row".to_string()
            } else {
                format!("missing required column '{}'", YEAR_COLUMN)
            },
        })?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let raw = record.get(year_index).ok_or_else(|| ChartError::DataFormatError {
            line,
            message: format!("row has no '{}' value", YEAR_COLUMN),
        })?;

        let year = raw
            .trim()
            .parse::<i32>()
            .map_err(|_| ChartError::DataFormatError {
                line,
                message: format!("year '{}' is not an integer", raw),
            })?;

        rows.push(Row { year });
    }

    tracing::debug!("Parsed {} rows from dataset", rows.len());
    Ok(Dataset::new(rows))
}
