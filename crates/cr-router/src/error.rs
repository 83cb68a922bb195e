use crate::types::Dimension;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Invalid keyword pattern for {dimension}: {pattern:?}")]
    InvalidPattern {
        dimension: Dimension,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Keyword weight out of range for {dimension}: {pattern:?} has weight {weight}")]
    InvalidWeight {
        dimension: Dimension,
        pattern: String,
        weight: f64,
    },
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RouterError>;
