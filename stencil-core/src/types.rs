//! Domain types for the stencil installer.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem
//! paths. Report types are serializable via serde for `--json` output.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Resource classes
// ---------------------------------------------------------------------------

/// The two managed payload directories of a framework checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceClass {
    /// Markdown persona / template files (`*.md`, `README.md` excluded).
    Personas,
    /// Executable helper scripts (`*.py`, `*.sh`), executable bit preserved.
    Scripts,
}

impl ResourceClass {
    /// Every managed class, in install order.
    pub fn all() -> &'static [ResourceClass] {
        &[ResourceClass::Personas, ResourceClass::Scripts]
    }

    /// Directory name under both the source checkout and the target root.
    pub fn dir_name(self) -> &'static str {
        match self {
            ResourceClass::Personas => "personas",
            ResourceClass::Scripts => "scripts",
        }
    }

    /// Filename pattern selecting this class's candidate files.
    pub fn pattern(self) -> FilePattern {
        match self {
            ResourceClass::Personas => FilePattern {
                extensions: &["md"],
                excluded: &["README.md"],
            },
            ResourceClass::Scripts => FilePattern {
                extensions: &["py", "sh"],
                excluded: &[],
            },
        }
    }

}

impl fmt::Display for ResourceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

// ---------------------------------------------------------------------------
// File selection pattern
// ---------------------------------------------------------------------------

/// Extension allow-list plus exact-name exclusion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilePattern {
    pub extensions: &'static [&'static str],
    pub excluded: &'static [&'static str],
}

impl FilePattern {
    /// True when `file_name` matches an allowed extension and is not excluded.
    pub fn matches(&self, file_name: &str) -> bool {
        if self.excluded.contains(&file_name) {
            return false;
        }
        let Some((_, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        self.extensions.contains(&ext)
    }
}

// ---------------------------------------------------------------------------
// Per-file sync unit and outcome
// ---------------------------------------------------------------------------

/// A transient pairing of one source file with its target slot.
///
/// Derived from a directory listing at run start and discarded after the run;
/// identity is the file name (one target slot per name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEntry {
    pub file_name: String,
    pub source: PathBuf,
    pub target: PathBuf,
}

/// Result of reconciling one [`SyncEntry`]. No other states exist; per-file
/// failures are reported separately, not as an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncOutcome {
    /// Target did not exist; source was copied in.
    Created,
    /// Target existed with differing bytes; overwritten with source content.
    Updated,
    /// Target bytes already match source; no write performed.
    Unchanged,
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::Created => write!(f, "created"),
            SyncOutcome::Updated => write!(f, "updated"),
            SyncOutcome::Unchanged => write!(f, "unchanged"),
        }
    }
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Aggregate tally of outcomes across a run. Reporting only, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl Counts {
    pub fn record(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Created => self.created += 1,
            SyncOutcome::Updated => self.updated += 1,
            SyncOutcome::Unchanged => self.unchanged += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.created + self.updated + self.unchanged
    }

    /// True when the run touched nothing.
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.updated == 0
    }
}

impl std::ops::AddAssign for Counts {
    fn add_assign(&mut self, other: Counts) {
        self.created += other.created;
        self.updated += other.updated;
        self.unchanged += other.unchanged;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
