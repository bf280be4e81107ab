//! Directory reconciler — copy-if-different against a target directory.
//!
//! ## Per-file protocol
//!
//! 1. List candidate files in the source directory matching the pattern.
//! 2. SHA-256 hash source and target bytes.
//! 3. Identical digests → skip, no write, `Unchanged`.
//! 4. Otherwise write to `<target>.stencil.tmp`, carry the source file's
//!    permission bits, rename to the final path (atomic on POSIX).
//! 5. Missing target → `Created`, differing target → `Updated`.
//!
//! Failures are per-file non-fatal: the entry is recorded and the run moves
//! on. Only a missing source directory aborts the whole pass.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use stencil_core::types::{Counts, FilePattern, SyncEntry, SyncOutcome};

use crate::error::{copy_err, io_err, SyncError};

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// One entry that could not be reconciled. The run continues past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_name: String,
    pub error: String,
}

/// Filenames in each outcome category for one reconcile pass, plus the
/// entries that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub unchanged: Vec<String>,
    pub failures: Vec<FileFailure>,
}

impl ReconcileReport {
    pub fn counts(&self) -> Counts {
        Counts {
            created: self.created.len(),
            updated: self.updated.len(),
            unchanged: self.unchanged.len(),
        }
    }

    fn record(&mut self, file_name: String, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Created => self.created.push(file_name),
            SyncOutcome::Updated => self.updated.push(file_name),
            SyncOutcome::Unchanged => self.unchanged.push(file_name),
        }
    }
}

// ---------------------------------------------------------------------------
// Candidate listing
// ---------------------------------------------------------------------------

/// List the source files matching `pattern`, paired with their target slots.
///
/// Entries are sorted by file name so reports are deterministic. Fails with
/// [`SyncError::SourceMissing`] when `source_dir` does not exist.
pub fn list_entries(
    source_dir: &Path,
    target_dir: &Path,
    pattern: FilePattern,
) -> Result<Vec<SyncEntry>, SyncError> {
    if !source_dir.is_dir() {
        return Err(SyncError::SourceMissing {
            path: source_dir.to_path_buf(),
        });
    }

    let mut entries = Vec::new();
    let listing = std::fs::read_dir(source_dir).map_err(|e| io_err(source_dir, e))?;
    for dirent in listing {
        let dirent = dirent.map_err(|e| io_err(source_dir, e))?;
        if !dirent.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let file_name = dirent.file_name().to_string_lossy().into_owned();
        if !pattern.matches(&file_name) {
            continue;
        }
        entries.push(SyncEntry {
            source: dirent.path(),
            target: target_dir.join(&file_name),
            file_name,
        });
    }
    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(entries)
}

// ---------------------------------------------------------------------------
// reconcile
// ---------------------------------------------------------------------------

/// Make `target_dir` match `source_dir` for the files selected by `pattern`.
///
/// Copies new files, overwrites changed files, leaves identical files
/// untouched. Never deletes anything. `target_dir` is created if absent.
/// With `dry_run` set, entries are classified but nothing is written.
pub fn reconcile(
    source_dir: &Path,
    target_dir: &Path,
    pattern: FilePattern,
    dry_run: bool,
) -> Result<ReconcileReport, SyncError> {
    let entries = list_entries(source_dir, target_dir, pattern)?;

    if !dry_run {
        std::fs::create_dir_all(target_dir).map_err(|e| copy_err(target_dir, e))?;
    }

    let mut report = ReconcileReport::default();
    for entry in entries {
        match reconcile_entry(&entry, dry_run) {
            Ok(outcome) => report.record(entry.file_name, outcome),
            Err(err) => {
                tracing::warn!("skipping {}: {err}", entry.file_name);
                report.failures.push(FileFailure {
                    file_name: entry.file_name,
                    error: err.to_string(),
                });
            }
        }
    }
    Ok(report)
}

fn reconcile_entry(entry: &SyncEntry, dry_run: bool) -> Result<SyncOutcome, SyncError> {
    let target_exists = match std::fs::metadata(&entry.target) {
        Ok(_) => true,
        Err(err) if err.kind() == ErrorKind::NotFound => false,
        Err(err) => return Err(io_err(&entry.target, err)),
    };

    if !target_exists {
        if dry_run {
            tracing::info!("[dry-run] would create: {}", entry.target.display());
            return Ok(SyncOutcome::Created);
        }
        copy_entry(entry)?;
        tracing::info!("created: {}", entry.target.display());
        return Ok(SyncOutcome::Created);
    }

    if hash_file(&entry.source)? == hash_file(&entry.target)? {
        tracing::debug!("unchanged: {}", entry.target.display());
        return Ok(SyncOutcome::Unchanged);
    }

    if dry_run {
        tracing::info!("[dry-run] would update: {}", entry.target.display());
        return Ok(SyncOutcome::Updated);
    }
    copy_entry(entry)?;
    tracing::info!("updated: {}", entry.target.display());
    Ok(SyncOutcome::Updated)
}

// ---------------------------------------------------------------------------
// Copy primitive (shared with migration)
// ---------------------------------------------------------------------------

/// Copy `entry.source` to `entry.target` via `.stencil.tmp` + rename,
/// carrying the source file's permission bits (executable flag included).
pub(crate) fn copy_entry(entry: &SyncEntry) -> Result<(), SyncError> {
    let bytes = std::fs::read(&entry.source).map_err(|e| copy_err(&entry.source, e))?;

    let tmp = PathBuf::from(format!("{}.stencil.tmp", entry.target.display()));
    std::fs::write(&tmp, &bytes).map_err(|e| copy_err(&tmp, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&entry.source)
            .map_err(|e| copy_err(&entry.source, e))?
            .permissions()
            .mode();
        std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(mode))
            .map_err(|e| copy_err(&tmp, e))?;
    }

    if let Err(err) = std::fs::rename(&tmp, &entry.target) {
        let _ = std::fs::remove_file(&tmp);
        return Err(copy_err(&entry.target, err));
    }
    Ok(())
}

pub(crate) fn hash_file(path: &Path) -> Result<String, SyncError> {
    let bytes = std::fs::read(path).map_err(|e| io_err(path, e))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
