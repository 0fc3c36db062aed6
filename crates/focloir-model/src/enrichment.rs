use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why one enrichment field could not be produced for a word.
///
/// Absences are per-field and never fatal: they only decide whether the
/// word lands in the deck or in the missing-data report.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum Absence {
    #[error("not found")]
    NotFound,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("timed out")]
    Timeout,

    #[error("definition generation failed: {0}")]
    Generation(String),

    #[error("audio processing failed: {0}")]
    Processing(String),

    #[error("word cannot be used as a filename")]
    InvalidName,

    #[error("blank word")]
    Blank,
}

/// Outcome of a single enrichment call.
pub type Fetched<T> = Result<T, Absence>;

/// Everything gathered for one word in a single pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub word: String,
    pub translation: Fetched<String>,
    /// Filename (not path) of the downloaded pronunciation clip.
    pub audio_file: Fetched<String>,
    pub definition: Fetched<String>,
}

impl EnrichmentResult {
    pub fn is_complete(&self) -> bool {
        self.translation.is_ok() && self.audio_file.is_ok() && self.definition.is_ok()
    }
}
