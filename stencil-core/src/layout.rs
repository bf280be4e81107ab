//! Source and target directory resolution.
//!
//! # Filesystem layout
//!
//! ```text
//! <source>/                     (framework checkout — cwd or $STENCIL_SOURCE)
//!   personas/*.md
//!   scripts/*.{py,sh}
//!
//! <home>/.stencil/              (target root, owned by the user)
//!   personas/
//!   scripts/
//! ```
//!
//! # API pattern
//!
//! Every home-relative function has two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use crate::error::LayoutError;
use crate::types::ResourceClass;

/// Environment variable overriding the source checkout location.
pub const SOURCE_ENV_VAR: &str = "STENCIL_SOURCE";

/// Source root: `$STENCIL_SOURCE` when set, the current directory otherwise.
pub fn source_root() -> Result<PathBuf, LayoutError> {
    if let Some(dir) = std::env::var_os(SOURCE_ENV_VAR) {
        return Ok(PathBuf::from(dir));
    }
    Ok(std::env::current_dir()?)
}

/// `<source>/<class dir>` — pure, no I/O.
pub fn source_class_dir(source_root: &Path, class: ResourceClass) -> PathBuf {
    source_root.join(class.dir_name())
}

/// `<home>/.stencil/` — pure, no I/O.
pub fn target_root_at(home: &Path) -> PathBuf {
    home.join(".stencil")
}

/// `target_root_at` convenience wrapper (uses `dirs::home_dir()`).
pub fn target_root() -> Result<PathBuf, LayoutError> {
    Ok(target_root_at(&home()?))
}

/// `<home>/.stencil/<class dir>` — pure, no I/O.
pub fn target_class_dir_at(home: &Path, class: ResourceClass) -> PathBuf {
    target_root_at(home).join(class.dir_name())
}

/// `target_class_dir_at` convenience wrapper (uses `dirs::home_dir()`).
pub fn target_class_dir(class: ResourceClass) -> Result<PathBuf, LayoutError> {
    Ok(target_class_dir_at(&home()?, class))
}

fn home() -> Result<PathBuf, LayoutError> {
    dirs::home_dir().ok_or(LayoutError::HomeNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_dirs_live_under_dot_stencil() {
        let home = Path::new("/home/u");
        assert_eq!(target_root_at(home), PathBuf::from("/home/u/.stencil"));
        assert_eq!(
            target_class_dir_at(home, ResourceClass::Personas),
            PathBuf::from("/home/u/.stencil/personas")
        );
        assert_eq!(
            target_class_dir_at(home, ResourceClass::Scripts),
            PathBuf::from("/home/u/.stencil/scripts")
        );
    }

    #[test]
    fn source_class_dirs_mirror_target_names() {
        let root = Path::new("/src/framework");
        for class in ResourceClass::all() {
            assert_eq!(
                source_class_dir(root, *class).file_name().unwrap(),
                class.dir_name()
            );
        }
    }
}
