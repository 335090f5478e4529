//! Error types for record review, resolution and export

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Failed to fetch records from {source_name}: {message}")]
    Fetch {
        source_name: String,
        message: String,
    },

    #[error("'{0}' is not a display field. Expected one of: name, email, street, city, zipcode, phone, status")]
    InvalidField(String),

    #[error("Nothing to export: the record set is empty")]
    EmptyExport,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid record payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReviewError {
    /// Wrap any lower-level failure that happened while loading a record set
    pub fn fetch(source_name: &str, err: impl std::fmt::Display) -> Self {
        ReviewError::Fetch {
            source_name: source_name.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReviewError>;
