// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Cannot read question paper directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read exam index {}: {source}", .path.display())]
    IndexRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed exam index {}: {source}", .path.display())]
    IndexParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Could not open paper {label} ({}): {source}", .path.display())]
    Open {
        label: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse paper {label} ({}): {message}", .path.display())]
    Parse {
        label: String,
        path: PathBuf,
        message: String,
    },
}

impl ExtractError {
    /// Exam code of the paper that failed.
    pub fn label(&self) -> &str {
        match self {
            ExtractError::Open { label, .. } | ExtractError::Parse { label, .. } => label,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SampleError {
    #[error("Cannot sample {requested} questions: count must be between 1 and {available}")]
    CountOutOfRange { requested: usize, available: usize },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Failed to package document: {0}")]
    PackagingError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Sampling failed: {0}")]
    Sampling(#[from] SampleError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Please select at least one set of questions.")]
    NothingSelected,
}
