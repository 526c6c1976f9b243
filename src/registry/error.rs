use std::path::PathBuf;

use thiserror::Error;
use xmltree::ParseError;

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Document-level failures. Per-command and per-parameter problems are not
/// errors; they surface as [`ParseDiagnostic`](crate::registry::ParseDiagnostic)
/// entries and degrade the index instead of aborting the parse.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no OpenXR registry found; searched: {}", attempted.join(", "))]
    DocumentNotFound { attempted: Vec<String> },
    #[error("malformed registry document {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("failed to read registry document {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("registry document too large: {size} bytes (max: {max} bytes)")]
    DocumentTooLarge { size: u64, max: u64 },
    #[error("registry tree too deep: {depth} levels (max: {max})")]
    TreeTooDeep { depth: usize, max: usize },
}

impl RegistryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RegistryError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, source: ParseError) -> Self {
        RegistryError::Malformed {
            path: path.into(),
            source,
        }
    }
}
