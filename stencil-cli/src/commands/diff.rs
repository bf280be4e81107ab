//! `stencil diff` — show unified diffs for what install would write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use stencil_core::layout;
use stencil_sync::diff::diff_install_at;

/// Arguments for `stencil diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Framework checkout to compare against (default: cwd or $STENCIL_SOURCE).
    #[arg(long)]
    pub source: Option<PathBuf>,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let home: PathBuf = dirs::home_dir().context("could not determine home directory")?;
        let source_root = match self.source {
            Some(dir) => dir,
            None => layout::source_root().context("could not resolve source directory")?,
        };

        let diffs = diff_install_at(&source_root, &home).context("diff failed")?;

        if diffs.is_empty() {
            println!("Everything up to date; install would write nothing.");
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}
