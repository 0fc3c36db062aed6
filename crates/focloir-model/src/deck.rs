use crate::enrichment::{EnrichmentResult, Fetched};
use serde::{Deserialize, Serialize};

/// Placeholder recorded in the missing-data report for an absent field.
pub const MISSING_MARKER: &str = "yes";

/// Separator between translation and explanation on the back of a card.
pub const CARD_BACK_SEPARATOR: &str = "<br>";

/// A fully enriched word, ready to import as a flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteEntry {
    /// Word followed by an embedded audio reference, e.g. `fáilte [sound:fáilte.mp3]`.
    #[serde(rename = "word")]
    pub card_front: String,
    /// Translation, `<br>`, then the generated explanation.
    #[serde(rename = "translation")]
    pub card_back: String,
}

impl CompleteEntry {
    pub fn new(word: &str, translation: &str, audio_file: &str, definition: &str) -> Self {
        Self {
            card_front: format!("{word} [sound:{audio_file}]"),
            card_back: format!("{translation}{CARD_BACK_SEPARATOR}{definition}"),
        }
    }
}

/// A word with at least one absent field.
///
/// Each `missing_*` column holds the fetched value when it was obtained
/// and [`MISSING_MARKER`] when it was not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingEntry {
    pub word: String,
    #[serde(rename = "missing translation")]
    pub missing_translation: String,
    #[serde(rename = "missing audio")]
    pub missing_audio: String,
    #[serde(rename = "missing definition")]
    pub missing_definition: String,
}

fn value_or_marker(field: &Fetched<String>) -> String {
    match field {
        Ok(value) => value.clone(),
        Err(_) => MISSING_MARKER.to_string(),
    }
}

/// Where a word ends up after enrichment. Exactly one per input word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Complete(CompleteEntry),
    Missing(MissingEntry),
}

/// Classify one word: complete only when translation, audio and definition
/// are all present. There is no partial credit.
pub fn classify(result: &EnrichmentResult) -> Classified {
    match (&result.translation, &result.audio_file, &result.definition) {
        (Ok(translation), Ok(audio_file), Ok(definition)) => Classified::Complete(
            CompleteEntry::new(&result.word, translation, audio_file, definition),
        ),
        _ => Classified::Missing(MissingEntry {
            word: result.word.clone(),
            missing_translation: value_or_marker(&result.translation),
            missing_audio: value_or_marker(&result.audio_file),
            missing_definition: value_or_marker(&result.definition),
        }),
    }
}

/// The two output datasets, each in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    pub complete: Vec<CompleteEntry>,
    pub missing: Vec<MissingEntry>,
}

impl Deck {
    pub fn push(&mut self, result: &EnrichmentResult) {
        match classify(result) {
            Classified::Complete(entry) => self.complete.push(entry),
            Classified::Missing(entry) => self.missing.push(entry),
        }
    }

    pub fn len(&self) -> usize {
        self.complete.len() + self.missing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> FromIterator<&'a EnrichmentResult> for Deck {
    fn from_iter<I: IntoIterator<Item = &'a EnrichmentResult>>(iter: I) -> Self {
        let mut deck = Deck::default();
        for result in iter {
            deck.push(result);
        }
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::Absence;

    fn enriched(word: &str) -> EnrichmentResult {
        EnrichmentResult {
            word: word.to_string(),
            translation: Ok("welcome".into()),
            audio_file: Ok(format!("{word}.mp3")),
            definition: Ok("A friendly greeting.".into()),
        }
    }

    #[test]
    fn test_complete_entry_format() {
        let entry = CompleteEntry::new("fáilte", "welcome", "fáilte.mp3", "A greeting.");
        assert_eq!(entry.card_front, "fáilte [sound:fáilte.mp3]");
        assert_eq!(entry.card_back, "welcome<br>A greeting.");
    }

    #[test]
    fn test_missing_records_values_and_markers() {
        let mut result = enriched("slán");
        result.audio_file = Err(Absence::Status(404));

        let Classified::Missing(entry) = classify(&result) else {
            panic!("expected a missing entry");
        };
        assert_eq!(entry.word, "slán");
        assert_eq!(entry.missing_translation, "welcome");
        assert_eq!(entry.missing_audio, MISSING_MARKER);
        assert_eq!(entry.missing_definition, "A friendly greeting.");
    }

    #[test]
    fn test_no_partial_credit() {
        let mut result = enriched("madra");
        result.definition = Err(Absence::Generation("rate limited".into()));
        assert!(matches!(classify(&result), Classified::Missing(_)));
    }

    #[test]
    fn test_deck_partitions_in_order() {
        let mut second = enriched("cat");
        second.translation = Err(Absence::NotFound);
        let results = vec![enriched("madra"), second, enriched("bó"), enriched("madra")];

        let deck: Deck = results.iter().collect();
        assert_eq!(deck.len(), results.len());
        let fronts: Vec<&str> = deck.complete.iter().map(|e| e.card_front.as_str()).collect();
        assert_eq!(
            fronts,
            vec!["madra [sound:madra.mp3]", "bó [sound:bó.mp3]", "madra [sound:madra.mp3]"]
        );
        assert_eq!(deck.missing.len(), 1);
        assert_eq!(deck.missing[0].word, "cat");
        assert_eq!(deck.missing[0].missing_translation, MISSING_MARKER);
    }
}
