use async_trait::async_trait;
use focloir_model::Fetched;

/// Looks up the English translation of an Irish word.
#[async_trait]
pub trait TranslationSource: Send + Sync {
    async fn translate(&self, word: &str) -> Fetched<String>;
}

/// Downloads a pronunciation clip and returns its filename.
#[async_trait]
pub trait AudioSource: Send + Sync {
    async fn fetch_audio(&self, word: &str) -> Fetched<String>;
}

/// Produces a short beginner-friendly explanation of a word.
#[async_trait]
pub trait DefinitionSource: Send + Sync {
    async fn define(&self, word: &str) -> Fetched<String>;
}
