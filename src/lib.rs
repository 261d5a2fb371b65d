use thiserror::Error;

pub type Result<T> = std::result::Result<T, PdfChatError>;

#[derive(Error, Debug)]
pub enum PdfChatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Embedding service error: {0}")]
    Embedding(String),

    #[error("Generation service error: {0}")]
    Generation(String),

    #[error("No index found at {0}; process documents first")]
    IndexNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub mod commands;
pub mod config;
pub mod embeddings;
pub mod extract;
pub mod index;
pub mod qa;
