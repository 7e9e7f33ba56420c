use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading a map manifest, a map definition or a sprite set.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("map id {id} is not listed in the map manifest")]
    UnknownMap { id: u32 },
    #[error("map manifest line {line}: {reason}")]
    Manifest { line: usize, reason: String },
    #[error("map definition has no spawn line")]
    MissingSpawn,
    #[error("map definition line {line}: {reason}")]
    Record { line: usize, reason: String },
    #[error("invalid sprite set: {0}")]
    SpriteSet(String),
    #[error("failed to parse sprite set: {0}")]
    SpriteJson(#[from] serde_json::Error),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn record(line: usize, reason: impl Into<String>) -> Self {
        LoadError::Record {
            line,
            reason: reason.into(),
        }
    }
}
