//! Error types for the hole tracker

use std::path::PathBuf;

/// Result alias used across the crate
pub type HoleResult<T> = Result<T, HoleError>;

/// Hole tracker errors
#[derive(Debug, thiserror::Error)]
pub enum HoleError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Region of {volume} cells exceeds the rescan limit of {limit}")]
    RegionTooLarge { volume: u64, limit: u64 },

    #[error("Subscriber {name} already registered")]
    DuplicateSubscriber { name: String },
}
