use serde::{Deserialize, Serialize};

/// One target word read from the input list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
}

impl WordRecord {
    /// Build a record from a raw cell value, trimming surrounding whitespace.
    pub fn new(raw: &str) -> Self {
        Self {
            word: raw.trim().to_string(),
        }
    }

    /// Filename used for this word's pronunciation clip (e.g., "fáilte.mp3").
    pub fn audio_filename(&self) -> String {
        format!("{}.mp3", self.word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims() {
        assert_eq!(WordRecord::new("  fáilte \t").word, "fáilte");
    }

    #[test]
    fn test_audio_filename_keeps_accents() {
        assert_eq!(WordRecord::new("slán").audio_filename(), "slán.mp3");
    }
}
