//! Typed error definitions for frozen_archive.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Archive root does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Archive root is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    #[error("Cannot write to archive root '{path}': {source}")]
    RootNotWritable { path: PathBuf, source: io::Error },

    #[error("Path escapes the archive root: {0}")]
    PathEscapesRoot(PathBuf),

    #[error("Lock file not found: {0}")]
    LockNotFound(PathBuf),

    #[error("Index directory not found: {0}")]
    IndexNotFound(PathBuf),

    #[error("Bucket destination already exists: {0}")]
    DestinationExists(PathBuf),

    #[error("Failed to copy bucket '{src}' to '{dest}': {reason}")]
    CopyFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Insufficient space for '{dest}': need {required} bytes, have {available} bytes")]
    InsufficientSpace {
        required: u64,
        available: u64,
        dest: PathBuf,
    },
}

impl ArchiveError {
    /// Stable machine-readable code for structured logging.
    pub fn code(&self) -> &'static str {
        match self {
            ArchiveError::RootNotFound(_) => "root_not_found",
            ArchiveError::RootNotADirectory(_) => "root_not_a_directory",
            ArchiveError::RootNotWritable { .. } => "root_not_writable",
            ArchiveError::PathEscapesRoot(_) => "path_escapes_root",
            ArchiveError::LockNotFound(_) => "lock_not_found",
            ArchiveError::IndexNotFound(_) => "index_not_found",
            ArchiveError::DestinationExists(_) => "destination_exists",
            ArchiveError::CopyFailed { .. } => "copy_failed",
            ArchiveError::InsufficientSpace { .. } => "insufficient_space",
        }
    }
}
