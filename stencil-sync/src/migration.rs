//! One-time migration of legacy symlinks into real file copies.
//!
//! Older installers symlinked target files into the framework checkout
//! instead of copying them. Those links break as soon as the checkout moves,
//! so any symlink whose link text contains the marker substring is replaced
//! with a real copy of the same-named source file.

use std::path::Path;

use stencil_core::types::SyncEntry;

use crate::error::{copy_err, io_err, SyncError};
use crate::reconciler::{copy_entry, FileFailure};

/// What one migration pass did to a target directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Legacy links replaced with real copies. Callers count these as
    /// `Updated`.
    pub migrated: Vec<String>,
    /// Dangling legacy links with no source counterpart; removed.
    pub removed: Vec<String>,
    pub failures: Vec<FileFailure>,
}

/// Replace marker-matching symlinks in `target_dir` with copies from
/// `source_dir`.
///
/// Regular files and symlinks whose link text does not contain `marker` are
/// left untouched. Idempotent: with no legacy links left this is a no-op.
pub fn migrate_legacy_symlinks(
    source_dir: &Path,
    target_dir: &Path,
    marker: &str,
) -> Result<MigrationReport, SyncError> {
    let mut report = MigrationReport::default();
    if !target_dir.is_dir() {
        return Ok(report);
    }

    let listing = std::fs::read_dir(target_dir).map_err(|e| io_err(target_dir, e))?;
    for dirent in listing {
        let dirent = dirent.map_err(|e| io_err(target_dir, e))?;
        if !dirent.file_type().map(|t| t.is_symlink()).unwrap_or(false) {
            continue;
        }
        let file_name = dirent.file_name().to_string_lossy().into_owned();
        match migrate_link(source_dir, &dirent.path(), &file_name, marker) {
            Ok(LinkDisposition::Kept) => {}
            Ok(LinkDisposition::Migrated) => report.migrated.push(file_name),
            Ok(LinkDisposition::Removed) => report.removed.push(file_name),
            Err(err) => {
                tracing::warn!("symlink migration failed for {file_name}: {err}");
                report.failures.push(FileFailure {
                    file_name,
                    error: err.to_string(),
                });
            }
        }
    }

    report.migrated.sort();
    report.removed.sort();
    Ok(report)
}

enum LinkDisposition {
    Kept,
    Migrated,
    Removed,
}

fn migrate_link(
    source_dir: &Path,
    link: &Path,
    file_name: &str,
    marker: &str,
) -> Result<LinkDisposition, SyncError> {
    let link_target = std::fs::read_link(link).map_err(|e| io_err(link, e))?;
    if !link_target.to_string_lossy().contains(marker) {
        return Ok(LinkDisposition::Kept);
    }

    std::fs::remove_file(link).map_err(|e| copy_err(link, e))?;

    let source = source_dir.join(file_name);
    if !source.is_file() {
        tracing::warn!(
            "removed dangling legacy link {} (no source counterpart)",
            link.display()
        );
        return Ok(LinkDisposition::Removed);
    }

    copy_entry(&SyncEntry {
        file_name: file_name.to_string(),
        source,
        target: link.to_path_buf(),
    })?;
    tracing::info!("migrated legacy link: {}", link.display());
    Ok(LinkDisposition::Migrated)
}
