//! Error type shared by the library and the binary.
//!
//! Only systems failures live here. Losing the game is session state,
//! see [`crate::entities::GameStatus`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalaxiaError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl GalaxiaError {
    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidConfig(detail.into())
    }
}

pub type Result<T> = std::result::Result<T, GalaxiaError>;
