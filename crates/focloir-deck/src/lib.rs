use anyhow::Result;
use focloir_model::Deck;
use std::path::PathBuf;

pub mod output;
pub mod pipeline;
pub mod words;

pub use output::OutputSummary;
pub use pipeline::Enricher;

/// Where the run reads from and writes to.
#[derive(Debug, Clone)]
pub struct DeckPaths {
    pub input: PathBuf,
    pub deck: PathBuf,
    pub missing: PathBuf,
    /// Created once the word list has been read successfully.
    pub audio_dir: PathBuf,
}

/// Build a flashcard deck from a word list.
///
/// Reads the word list (failing before any network call or directory
/// creation if it is malformed), prepares the audio directory, enriches
/// every word in order, then writes the deck and the missing-data report.
pub async fn build(paths: &DeckPaths, enricher: &Enricher) -> Result<OutputSummary> {
    let words = words::read_words(&paths.input)?;
    focloir_acquire::audio::prepare_dir(&paths.audio_dir)?;
    tracing::info!(words = words.len(), input = %paths.input.display(), "Building deck");

    let results = enricher.run(&words).await;
    let deck: Deck = results.iter().collect();

    output::write_deck(&deck, &paths.deck, &paths.missing)
}
