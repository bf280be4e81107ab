//! Dry-run unified diff support for `stencil diff`.

use std::io::ErrorKind;
use std::path::Path;

use similar::TextDiff;

use stencil_core::{layout, types::ResourceClass};

use crate::error::io_err;
use crate::reconciler::list_entries;
use crate::SyncError;

/// A single pending file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub class: ResourceClass,
    pub file_name: String,
    pub unified_diff: String,
}

/// Compare what `install` would write against current target content.
///
/// No files are written. Identical files produce no entry; a missing target
/// diffs against empty content.
pub fn diff_install_at(source_root: &Path, home: &Path) -> Result<Vec<FileDiff>, SyncError> {
    let mut diffs = Vec::new();
    for class in ResourceClass::all() {
        let source_dir = layout::source_class_dir(source_root, *class);
        let target_dir = layout::target_class_dir_at(home, *class);
        for entry in list_entries(&source_dir, &target_dir, class.pattern())? {
            let incoming = read_lossy(&entry.source)?;
            let existing = read_existing_or_empty(&entry.target)?;
            if existing == incoming {
                continue;
            }

            let old_header = format!("a/{}/{}", class.dir_name(), entry.file_name);
            let new_header = format!("b/{}/{}", class.dir_name(), entry.file_name);
            let unified = TextDiff::from_lines(&existing, &incoming)
                .unified_diff()
                .header(&old_header, &new_header)
                .context_radius(3)
                .to_string();

            diffs.push(FileDiff {
                class: *class,
                file_name: entry.file_name,
                unified_diff: unified,
            });
        }
    }
    Ok(diffs)
}

fn read_lossy(path: &Path) -> Result<String, SyncError> {
    let bytes = std::fs::read(path).map_err(|e| io_err(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_existing_or_empty(path: &Path) -> Result<String, SyncError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, TempDir, std::path::PathBuf) {
        let home = TempDir::new().unwrap();
        let checkout = TempDir::new().unwrap();
        let source_root = checkout.path().join("framework");
        for class in ResourceClass::all() {
            fs::create_dir_all(source_root.join(class.dir_name())).unwrap();
        }
        (home, checkout, source_root)
    }

    #[test]
    fn identical_content_produces_no_diff() {
        let (home, _checkout, source_root) = setup();
        fs::write(source_root.join("personas").join("a.md"), "X\n").unwrap();
        let target_dir = layout::target_class_dir_at(home.path(), ResourceClass::Personas);
        fs::create_dir_all(&target_dir).unwrap();
        fs::write(target_dir.join("a.md"), "X\n").unwrap();

        let diffs = diff_install_at(&source_root, home.path()).unwrap();
        assert!(diffs.is_empty());
    }

    #[test]
    fn local_edit_produces_unified_diff() {
        let (home, _checkout, source_root) = setup();
        fs::write(source_root.join("personas").join("a.md"), "one\ntwo\n").unwrap();
        let target_dir = layout::target_class_dir_at(home.path(), ResourceClass::Personas);
        fs::create_dir_all(&target_dir).unwrap();
        fs::write(target_dir.join("a.md"), "one\ntweaked\n").unwrap();

        let diffs = diff_install_at(&source_root, home.path()).unwrap();
        assert_eq!(diffs.len(), 1);
        let diff = &diffs[0].unified_diff;
        assert!(diff.contains("--- a/personas/a.md"));
        assert!(diff.contains("+++ b/personas/a.md"));
        assert!(diff.contains("@@"));
        assert!(diff.contains("-tweaked"));
        assert!(diff.contains("+two"));
    }

    #[test]
    fn missing_target_diffs_against_empty() {
        let (home, _checkout, source_root) = setup();
        fs::write(source_root.join("scripts").join("hook.sh"), "#!/bin/sh\n").unwrap();

        let diffs = diff_install_at(&source_root, home.path()).unwrap();
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].class, ResourceClass::Scripts);
        assert!(diffs[0].unified_diff.contains("+#!/bin/sh"));
    }
}
