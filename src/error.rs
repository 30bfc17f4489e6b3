//! Error type shared by the library modules.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TravelTimeError {
    #[error("failed to read input file {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("credential error: {message}")]
    Credential { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("distance-matrix request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("distance-matrix API returned status {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Upstream {
        status: String,
        message: Option<String>,
    },

    #[error("response does not match the request shape: {message}")]
    DataShape { message: String },

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TravelTimeError {
    pub(crate) fn shape(message: impl Into<String>) -> Self {
        TravelTimeError::DataShape {
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        TravelTimeError::Config {
            message: message.into(),
        }
    }

    pub(crate) fn credential(message: impl Into<String>) -> Self {
        TravelTimeError::Credential {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TravelTimeError>;
