//! Install-state inspection for `stencil status`.
//!
//! State precedence per file:
//! 1. `Missing` (never installed — an install would report `Created`)
//! 2. `LegacyLink` (symlink into the source tree, migration pending)
//! 3. `Modified` (installed bytes differ — an install would report `Updated`)
//! 4. `Current`
//!
//! Read-only: nothing here writes to the target tree.

use std::io::ErrorKind;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stencil_core::{layout, types::ResourceClass};

use crate::error::io_err;
use crate::reconciler::{hash_file, list_entries};
use crate::SyncError;

/// Install state of one managed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileState {
    Missing,
    LegacyLink,
    Modified,
    Current,
}

/// Status row for one managed file.
#[derive(Debug, Clone)]
pub struct FileStatus {
    pub class: ResourceClass,
    pub file_name: String,
    pub state: FileState,
    /// Modification time of the installed copy; `None` when missing.
    pub installed_at: Option<DateTime<Utc>>,
}

/// Inspect every managed file across all resource classes.
pub fn inspect_at(
    source_root: &Path,
    home: &Path,
    marker: &str,
) -> Result<Vec<FileStatus>, SyncError> {
    let mut rows = Vec::new();
    for class in ResourceClass::all() {
        let source_dir = layout::source_class_dir(source_root, *class);
        let target_dir = layout::target_class_dir_at(home, *class);
        for entry in list_entries(&source_dir, &target_dir, class.pattern())? {
            let (state, installed_at) = classify(&entry.source, &entry.target, marker)?;
            rows.push(FileStatus {
                class: *class,
                file_name: entry.file_name,
                state,
                installed_at,
            });
        }
    }
    Ok(rows)
}

fn classify(
    source: &Path,
    target: &Path,
    marker: &str,
) -> Result<(FileState, Option<DateTime<Utc>>), SyncError> {
    let meta = match std::fs::symlink_metadata(target) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok((FileState::Missing, None)),
        Err(err) => return Err(io_err(target, err)),
    };
    let installed_at = meta.modified().ok().map(DateTime::<Utc>::from);

    if meta.file_type().is_symlink() {
        let link_target = std::fs::read_link(target).map_err(|e| io_err(target, e))?;
        if link_target.to_string_lossy().contains(marker) {
            return Ok((FileState::LegacyLink, installed_at));
        }
    }

    // Dangling non-legacy symlinks read as missing content.
    let state = match std::fs::metadata(target) {
        Ok(_) => {
            if hash_file(source)? == hash_file(target)? {
                FileState::Current
            } else {
                FileState::Modified
            }
        }
        Err(err) if err.kind() == ErrorKind::NotFound => FileState::Missing,
        Err(err) => return Err(io_err(target, err)),
    };
    Ok((state, installed_at))
}

/// Format age from a filesystem timestamp, compact (`42s`, `5m`, `3h`, `2d`).
pub fn format_age(timestamp: DateTime<Utc>) -> String {
    let seconds = Utc::now()
        .signed_duration_since(timestamp)
        .num_seconds()
        .max(0) as u64;
    format_seconds(seconds)
}

/// `format_age` for raw filesystem mtimes.
pub fn format_system_time_age(timestamp: SystemTime) -> String {
    format_age(DateTime::<Utc>::from(timestamp))
}

fn format_seconds(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds}s");
    }
    if seconds < 60 * 60 {
        return format!("{}m", seconds / 60);
    }
    if seconds < 60 * 60 * 24 {
        return format!("{}h", seconds / (60 * 60));
    }
    format!("{}d", seconds / (60 * 60 * 24))
}
