use std::path::PathBuf;

use backdrop_fill::{OptionsError, ParseColorError};
use thiserror::Error;

/// Why a single file could not be processed. Never fatal to a batch.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Decode error in {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Encode error for {}: {message}", path.display())]
    Encode { path: PathBuf, message: String },
}

impl ProcessError {
    /// Short machine-readable name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            ProcessError::NotFound(_) => "not_found",
            ProcessError::Io { .. } => "io",
            ProcessError::Decode { .. } => "decode_failure",
            ProcessError::Encode { .. } => "encode_failure",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid reference color {value:?}: {source}")]
    Color {
        value: String,
        #[source]
        source: ParseColorError,
    },

    #[error("Invalid settings: {0}")]
    Options(#[from] OptionsError),
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("Unsupported PNG layout: {0}")]
    Unsupported(String),
}
