use thiserror::Error;

/// Fatal problems with the run's inputs, raised before any word is processed.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("input must have a column named '{column}' (found: {found})")]
    MissingColumn { column: String, found: String },

    #[error("could not read word list {path}: {reason}")]
    Unreadable { path: String, reason: String },
}
