//! Error types for stencil-core.

use thiserror::Error;

/// All errors that can arise from layout resolution.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Underlying I/O failure (current directory unreadable, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.stencil/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
