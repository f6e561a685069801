use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("required store file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read store file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write store file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse store document: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("failed to serialize store document: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("invalid key path: {0:?}")]
    InvalidKeyPath(String),
}
