//! Error types for the Sleeper client

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SleeperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sleeper API returned {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache file {} is unusable: {message}", path.display())]
    Cache { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, SleeperError>;
