use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while validating directories, scanning, or
/// extracting text from individual files.
///
/// The directory-validation variants (`DirectoryNotFound`, `NotADirectory`,
/// `PermissionDenied`) are recovered locally by re-prompting. `ScanFailed`
/// marks a whole search as failed but never ends the session.
/// `ExtractionFailed` is confined to a single file: the coordinator demotes
/// it to a diagnostic and a non-match.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Failed to scan {path}: {source}")]
    ScanFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to extract text from {path}: {message}")]
    ExtractionFailed { path: PathBuf, message: String },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SearchError {
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotFound(path.into())
    }

    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn scan_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ScanFailed {
            path: path.into(),
            source,
        }
    }

    pub fn extraction_failed(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::ExtractionFailed {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
