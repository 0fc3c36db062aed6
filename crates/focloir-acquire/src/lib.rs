pub mod audio;
pub mod client;
pub mod definition;
pub mod normalize;
pub mod pad;
pub mod sources;
pub mod translation;

pub use sources::{AudioSource, DefinitionSource, TranslationSource};
