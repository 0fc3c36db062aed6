use anyhow::{Context, Result};
use focloir_model::Deck;
use serde::Serialize;
use std::path::{Path, PathBuf};

const DECK_HEADERS: [&str; 2] = ["word", "translation"];
const MISSING_HEADERS: [&str; 4] = ["word", "missing translation", "missing audio", "missing definition"];

/// What was written, for the end-of-run report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSummary {
    pub deck_path: PathBuf,
    pub complete: usize,
    /// `None` when every word was complete and no report was written.
    pub missing_path: Option<PathBuf>,
    pub missing: usize,
}

/// Write the flashcard deck and, if anything is missing, the missing-data report.
///
/// The deck file is always written (header only when empty). The report is
/// only written when at least one word is incomplete.
pub fn write_deck(deck: &Deck, deck_path: &Path, missing_path: &Path) -> Result<OutputSummary> {
    write_csv(deck_path, &DECK_HEADERS, &deck.complete)?;
    tracing::info!(path = %deck_path.display(), rows = deck.complete.len(), "Wrote flashcard deck");

    let written_missing = if deck.missing.is_empty() {
        if missing_path.exists() {
            tracing::warn!(path = %missing_path.display(), "Leaving missing-data file from an earlier run untouched");
        }
        tracing::info!("No missing data; skipped missing-data report");
        None
    } else {
        write_csv(missing_path, &MISSING_HEADERS, &deck.missing)?;
        tracing::info!(path = %missing_path.display(), rows = deck.missing.len(), "Wrote missing-data report");
        Some(missing_path.to_path_buf())
    };

    Ok(OutputSummary {
        deck_path: deck_path.to_path_buf(),
        complete: deck.complete.len(),
        missing_path: written_missing,
        missing: deck.missing.len(),
    })
}

fn write_csv<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let write_failed = || format!("Failed to write {}", path.display());
    writer.write_record(headers).with_context(write_failed)?;
    for row in rows {
        writer.serialize(row).with_context(write_failed)?;
    }
    writer.flush().with_context(write_failed)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use focloir_model::{CompleteEntry, MissingEntry};

    fn sample_deck() -> Deck {
        Deck {
            complete: vec![CompleteEntry::new("fáilte", "welcome", "fáilte.mp3", "Said to greet, \"hello\".")],
            missing: vec![MissingEntry {
                word: "slán".into(),
                missing_translation: "goodbye".into(),
                missing_audio: "yes".into(),
                missing_definition: "Said when parting.".into(),
            }],
        }
    }

    #[test]
    fn test_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let deck_path = dir.path().join("deck.csv");
        let missing_path = dir.path().join("missing.csv");

        let summary = write_deck(&sample_deck(), &deck_path, &missing_path).unwrap();
        assert_eq!(summary.complete, 1);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.missing_path.as_deref(), Some(missing_path.as_path()));

        let deck = std::fs::read_to_string(&deck_path).unwrap();
        assert_eq!(
            deck,
            "word,translation\n\
             fáilte [sound:fáilte.mp3],\"welcome<br>Said to greet, \"\"hello\"\".\"\n"
        );
        let missing = std::fs::read_to_string(&missing_path).unwrap();
        assert_eq!(
            missing,
            "word,missing translation,missing audio,missing definition\n\
             slán,goodbye,yes,Said when parting.\n"
        );
    }

    #[test]
    fn test_no_missing_file_when_all_complete() {
        let dir = tempfile::tempdir().unwrap();
        let deck_path = dir.path().join("deck.csv");
        let missing_path = dir.path().join("missing.csv");
        let mut deck = sample_deck();
        deck.missing.clear();

        let summary = write_deck(&deck, &deck_path, &missing_path).unwrap();
        assert_eq!(summary.missing_path, None);
        assert!(!missing_path.exists());
    }

    #[test]
    fn test_row_errors_name_the_file() {
        #[derive(Serialize)]
        struct Nested {
            word: String,
            extra: std::collections::BTreeMap<String, String>,
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        let rows = vec![Nested {
            word: "madra".into(),
            extra: [("k".to_string(), "v".to_string())].into(),
        }];

        let err = write_csv(&path, &["word", "extra"], &rows).unwrap_err();
        assert_eq!(err.to_string(), format!("Failed to write {}", path.display()));
    }

    #[test]
    fn test_empty_deck_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let deck_path = dir.path().join("out").join("deck.csv");
        let missing_path = dir.path().join("missing.csv");
        let mut deck = sample_deck();
        deck.complete.clear();

        write_deck(&deck, &deck_path, &missing_path).unwrap();
        assert_eq!(std::fs::read_to_string(&deck_path).unwrap(), "word,translation\n");
    }
}
