use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    /// The document does not start with a `---` delimited header
    #[error("Invalid post format: {0}")]
    Format(String),

    #[error("Missing required field '{0}' in the post header")]
    MissingField(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Error serializing post: {0}")]
    Json(#[from] serde_json::Error),
}

impl PublishError {
    /// Fatal errors raised before anything is written to disk
    pub fn is_validation(&self) -> bool {
        matches!(self, PublishError::Format(_) | PublishError::MissingField(_))
    }
}
