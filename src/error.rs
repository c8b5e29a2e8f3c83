//! Error taxonomy for a booklet run.
//!
//! Input and output errors abort the run. Asset errors only ever degrade a
//! single segment to text-only rendering and are reported, never propagated.

use std::path::PathBuf;
use thiserror::Error;

/// The story file or configuration could not be used.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("Failed to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{path}` is not valid JSON")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("`{path}` has no `story` object")]
    MissingStory { path: PathBuf },

    #[error("Segment `{key}` in `{path}` is malformed")]
    Segment {
        path: PathBuf,
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse configuration `{path}`")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration `{path}`: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },
}

/// A segment's image could not be used.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image file does not exist")]
    Missing,

    #[error("failed to read image")]
    Io(#[from] std::io::Error),

    #[error("failed to decode image")]
    Decode(#[from] image::ImageError),

    #[error("image has zero width or height")]
    Empty,
}

/// The finished document could not be persisted.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create a temporary file in `{dir}`")]
    Create {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write the document")]
    Write(#[source] std::io::Error),

    #[error("Failed to move the document to `{path}`")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}
