use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid icon pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("decode failed: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("encode failed: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("write failed: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FlattenError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Decode { path, .. } | Self::Encode { path, .. } | Self::Write { path, .. } => path,
        }
    }
}
