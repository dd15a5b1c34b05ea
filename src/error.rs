//! Error type shared by generation, seed persistence and the viewer.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("could not parse seed from {input:?}: {source}")]
    SeedParse {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("seed input channel failed: {0}")]
    Prompt(#[source] io::Error),

    #[error("malformed config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("window error: {0}")]
    Window(#[from] minifb::Error),

    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),
}

impl TerrainError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TerrainError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TerrainError>;
