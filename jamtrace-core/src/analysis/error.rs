use crate::conf::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that prevent a run from being analyzed at all.
///
/// Problems inside the logs are never errors; they end up as anomalies in the report.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("logs directory not found: {}", path.display())]
    LogsDirNotFound { path: PathBuf },

    #[error("no run stamp found in logs directory {}", path.display())]
    NoRunStamp { path: PathBuf },

    #[error("invalid run stamp '{stamp}' (expected YYYYMMDD-HHMMSS)")]
    InvalidStamp { stamp: String },

    #[error("failed to read logs directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("glob pattern error: {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AnalyzeError {
    pub fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadDir {
            path: path.into(),
            source,
        }
    }
}
