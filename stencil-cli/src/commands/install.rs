//! `stencil install` — copy personas and scripts into the target tree.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use stencil_core::layout;
use stencil_sync::{pipeline, ClassResult, InstallOptions, ReconcileReport};

/// Arguments for `stencil install`.
#[derive(Args, Debug, Default)]
pub struct InstallArgs {
    /// Framework checkout to install from (default: cwd or $STENCIL_SOURCE).
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Show what would be copied without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl InstallArgs {
    pub fn run(self) -> Result<()> {
        let home: PathBuf = dirs::home_dir().context("could not determine home directory")?;
        let source_root = match self.source {
            Some(dir) => dir,
            None => layout::source_root().context("could not resolve source directory")?,
        };

        let results = pipeline::run_at(
            &home,
            &InstallOptions {
                source_root,
                dry_run: self.dry_run,
            },
        )
        .context("install failed")?;

        let mut failures = 0;
        for result in &results {
            print_class(result, self.dry_run);
            failures += result.report.failures.len();
        }

        if failures > 0 {
            bail!("{failures} file(s) failed to install");
        }
        Ok(())
    }
}

fn print_class(result: &ClassResult, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let report = &result.report;
    let counts = report.counts();

    if counts.total() == 0 && report.failures.is_empty() {
        println!("{prefix}✓ {} — nothing to do", result.class);
        return;
    }

    println!(
        "{prefix}✓ {} ({} created, {} updated, {} unchanged)",
        result.class, counts.created, counts.updated, counts.unchanged,
    );
    print_names(report);
}

fn print_names(report: &ReconcileReport) {
    for name in &report.created {
        println!("  +  {name}");
    }
    for name in &report.updated {
        println!("  ✎  {name}");
    }
    for name in &report.unchanged {
        println!("  ·  {name}");
    }
    for failure in &report.failures {
        println!("  ✗  {} — {}", failure.file_name, failure.error);
    }
}
