//! Stencil core library — domain types, filesystem layout, errors.
//!
//! Public API surface:
//! - [`types`] — resource classes, per-file sync outcomes, report counts
//! - [`error`] — [`LayoutError`]
//! - [`layout`] — source / target directory resolution

pub mod error;
pub mod layout;
pub mod types;

pub use error::LayoutError;
pub use types::{Counts, FilePattern, ResourceClass, SyncEntry, SyncOutcome};
