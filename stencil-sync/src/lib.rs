//! # stencil-sync
//!
//! Directory reconciliation for the stencil installer.
//!
//! Call [`pipeline::run_at`] to migrate legacy symlinks and reconcile every
//! managed resource class, or [`reconciler::reconcile`] for a single
//! directory pair.

pub mod diff;
pub mod error;
pub mod migration;
pub mod pipeline;
pub mod reconciler;
pub mod status;

pub use error::SyncError;
pub use pipeline::{ClassResult, InstallOptions, LEGACY_LINK_MARKER};
pub use reconciler::{reconcile, FileFailure, ReconcileReport};
pub use status::{FileState, FileStatus};
