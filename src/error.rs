use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttachmentError {
    #[error("Failed to parse attachment: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Unrecognized {kind} type \"{tag}\" (strict mode)")]
    SchemaMismatch { kind: &'static str, tag: String },

    #[error("Failed to encode attachment: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Round trip failed for {failed} of {total} document(s)")]
    RoundTripFailed { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, AttachmentError>;
