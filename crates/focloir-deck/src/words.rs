use focloir_model::{ConfigurationError, WordRecord};
use std::io::Read;
use std::path::Path;

/// Header of the one column the word list must have.
pub const WORD_COLUMN: &str = "word";

/// Read the word list from a CSV file.
///
/// Words are trimmed and returned in row order with duplicates kept, one
/// record per data row. Other columns are ignored. A blank `word` cell still
/// yields a (blank) record, so the row shows up in the missing-data report.
pub fn read_words(path: &Path) -> Result<Vec<WordRecord>, ConfigurationError> {
    let file = std::fs::File::open(path).map_err(|e| ConfigurationError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_words(file, &path.display().to_string())
}

/// Parse a CSV word list from any reader. `source` names it in errors.
pub fn parse_words<R: Read>(reader: R, source: &str) -> Result<Vec<WordRecord>, ConfigurationError> {
    let unreadable = |e: csv::Error| ConfigurationError::Unreadable {
        path: source.to_string(),
        reason: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers().map_err(unreadable)?.clone();
    let column = headers
        .iter()
        .position(|h| h == WORD_COLUMN)
        .ok_or_else(|| ConfigurationError::MissingColumn {
            column: WORD_COLUMN.to_string(),
            found: headers.iter().collect::<Vec<_>>().join(", "),
        })?;

    let mut words = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row.map_err(unreadable)?;
        let record = WordRecord::new(row.get(column).unwrap_or_default());
        if record.word.is_empty() {
            tracing::warn!(row = idx + 1, "Row has a blank word");
        }
        words.push(record);
    }

    tracing::info!(source = %source, words = words.len(), "Read word list");
    Ok(words)
}
