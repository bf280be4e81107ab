//! Shared install pipeline entrypoint used by the CLI.
//!
//! An install run is, per resource class: migrate legacy symlinks, then
//! reconcile the class directory. Source directories for every class are
//! validated before anything is written, so a missing source aborts with the
//! target tree untouched.

use std::path::{Path, PathBuf};

use stencil_core::{layout, types::ResourceClass};

use crate::migration::migrate_legacy_symlinks;
use crate::reconciler::{reconcile, ReconcileReport};
use crate::SyncError;

/// Marker substring identifying symlinks left behind by the legacy installer
/// (links into the framework checkout directory).
pub const LEGACY_LINK_MARKER: &str = "stencil-framework";

/// Options for one install run.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Framework checkout containing `personas/` and `scripts/`.
    pub source_root: PathBuf,
    /// Classify without writing.
    pub dry_run: bool,
}

/// Outcome of installing a single resource class.
#[derive(Debug)]
pub struct ClassResult {
    pub class: ResourceClass,
    pub report: ReconcileReport,
}

/// Run the install pipeline for every resource class.
///
/// This is the canonical entrypoint for `stencil install`.
pub fn run_at(home: &Path, options: &InstallOptions) -> Result<Vec<ClassResult>, SyncError> {
    // Validate every source dir up front; a missing one must abort before
    // any class has been written.
    for class in ResourceClass::all() {
        let source_dir = layout::source_class_dir(&options.source_root, *class);
        if !source_dir.is_dir() {
            return Err(SyncError::SourceMissing { path: source_dir });
        }
    }

    let mut results = Vec::new();
    for class in ResourceClass::all() {
        let source_dir = layout::source_class_dir(&options.source_root, *class);
        let target_dir = layout::target_class_dir_at(home, *class);

        let migration = if options.dry_run {
            Default::default()
        } else {
            migrate_legacy_symlinks(&source_dir, &target_dir, LEGACY_LINK_MARKER)?
        };

        let mut report = reconcile(&source_dir, &target_dir, class.pattern(), options.dry_run)?;

        // A migrated link was replaced with a fresh copy, so the reconcile
        // pass sees it as unchanged; it counts as an update.
        for name in migration.migrated {
            report.unchanged.retain(|n| n != &name);
            if !report.updated.contains(&name) {
                report.updated.push(name);
            }
        }
        report.updated.sort();
        report.failures.extend(migration.failures);

        results.push(ClassResult {
            class: *class,
            report,
        });
    }
    Ok(results)
}
