//! Error types for stencil-sync.

use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

use stencil_core::LayoutError;

/// All errors that can arise from install operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The source directory does not exist. Fatal; nothing is written.
    #[error("source directory not found: {path}")]
    SourceMissing { path: PathBuf },

    /// The target is not writable. Per-file; the run continues.
    #[error("write denied at {path}: {source}")]
    WriteDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic per-file copy failure. The run continues.
    #[error("copy failed at {path}: {source}")]
    CopyFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error outside the copy path, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error from layout resolution.
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}

/// Classify a copy-path I/O failure: permission problems surface as
/// [`SyncError::WriteDenied`], everything else as [`SyncError::CopyFailed`].
pub(crate) fn copy_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    if source.kind() == ErrorKind::PermissionDenied {
        SyncError::WriteDenied {
            path: path.into(),
            source,
        }
    } else {
        SyncError::CopyFailed {
            path: path.into(),
            source,
        }
    }
}
