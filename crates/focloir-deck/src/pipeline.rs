use focloir_acquire::{AudioSource, DefinitionSource, TranslationSource};
use focloir_model::{Absence, EnrichmentResult, WordRecord};
use std::time::Duration;

/// Wait before each word so the dictionary site isn't hammered.
pub const DEFAULT_PACING: Duration = Duration::from_secs(1);

/// Runs the three enrichment calls for each word, one word at a time.
pub struct Enricher {
    translator: Box<dyn TranslationSource>,
    audio: Box<dyn AudioSource>,
    definer: Box<dyn DefinitionSource>,
    pacing: Duration,
}

impl Enricher {
    pub fn new(
        translator: Box<dyn TranslationSource>,
        audio: Box<dyn AudioSource>,
        definer: Box<dyn DefinitionSource>,
    ) -> Self {
        Self {
            translator,
            audio,
            definer,
            pacing: DEFAULT_PACING,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Translation, then audio, then definition for a single word.
    ///
    /// A blank word makes no remote calls; every field is absent.
    pub async fn enrich(&self, word: &str) -> EnrichmentResult {
        if word.is_empty() {
            return EnrichmentResult {
                word: String::new(),
                translation: Err(Absence::Blank),
                audio_file: Err(Absence::Blank),
                definition: Err(Absence::Blank),
            };
        }

        let translation = self.translator.translate(word).await;
        let audio_file = self.audio.fetch_audio(word).await;
        let definition = self.definer.define(word).await;

        EnrichmentResult {
            word: word.to_string(),
            translation,
            audio_file,
            definition,
        }
    }

    /// Enrich every word in order. One result per word, in input order.
    pub async fn run(&self, words: &[WordRecord]) -> Vec<EnrichmentResult> {
        let total = words.len();
        let mut results = Vec::with_capacity(total);

        for (idx, record) in words.iter().enumerate() {
            tracing::info!(word = %record.word, n = idx + 1, of = total, "Processing");
            if !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }

            let result = self.enrich(&record.word).await;
            if result.is_complete() {
                tracing::debug!(word = %record.word, "Complete");
            } else {
                tracing::info!(
                    word = %record.word,
                    translation = %status(&result.translation),
                    audio = %status(&result.audio_file),
                    definition = %status(&result.definition),
                    "Incomplete"
                );
            }
            results.push(result);
        }

        results
    }
}

fn status(field: &focloir_model::Fetched<String>) -> String {
    match field {
        Ok(_) => "ok".to_string(),
        Err(absence) => absence.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use async_trait::async_trait;
    use focloir_acquire::{AudioSource, DefinitionSource, TranslationSource};
    use focloir_model::{Absence, Fetched};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Canned answers per word, recording every call in a shared log.
    #[derive(Clone, Default)]
    pub struct Fake {
        pub answers: HashMap<String, Fetched<String>>,
        pub calls: Arc<Mutex<Vec<String>>>,
    }

    impl Fake {
        pub fn with(mut self, word: &str, answer: Fetched<String>) -> Self {
            self.answers.insert(word.to_string(), answer);
            self
        }

        fn answer(&self, kind: &str, word: &str) -> Fetched<String> {
            self.calls.lock().unwrap().push(format!("{kind}:{word}"));
            self.answers.get(word).cloned().unwrap_or(Err(Absence::NotFound))
        }
    }

    #[async_trait]
    impl TranslationSource for Fake {
        async fn translate(&self, word: &str) -> Fetched<String> {
            self.answer("translate", word)
        }
    }

    #[async_trait]
    impl AudioSource for Fake {
        async fn fetch_audio(&self, word: &str) -> Fetched<String> {
            self.answer("audio", word)
        }
    }

    #[async_trait]
    impl DefinitionSource for Fake {
        async fn define(&self, word: &str) -> Fetched<String> {
            self.answer("define", word)
        }
    }
}
