use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinderError {
    #[error("{0}")]
    Validation(String),

    #[error("Contact '{0}' already exists")]
    Duplicate(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Usage: {usage}")]
    Usage { usage: String },

    #[error("Unknown command '{0}'. Type 'help' to list commands.")]
    UnknownCommand(String),

    #[error("Corrupt store: {0}")]
    CorruptStore(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MinderError>;
