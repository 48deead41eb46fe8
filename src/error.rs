//! Boot-time error types.
//!
//! Nothing on the per-tick path can fail; only loading configuration and clip
//! tables (and fetching them) produces errors, and all of them are fatal.

use thiserror::Error;

use crate::bone::ClipId;

#[derive(Error, Debug)]
pub enum BootError {
    #[error("Failed to parse game config: {0}")]
    Config(#[source] serde_json::Error),

    #[error("Invalid game config: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse clip table: {0}")]
    ClipTable(#[source] serde_json::Error),

    #[error("Clip table has no entry for required clip {0:?}")]
    MissingClip(ClipId),

    #[error("Asset fetch failed: {0}")]
    AssetFetch(String),

    #[error("No entropy for the round seed: {0}")]
    Entropy(String),
}

pub type Result<T> = std::result::Result<T, BootError>;
