use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MovieError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Movie {0} doesn't exist")]
    NotFound(String),

    #[error("Could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed record in {} at line {line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("Metadata lookup failed: {0}")]
    Lookup(String),

    #[error("Terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MovieError>;
