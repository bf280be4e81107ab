//! `stencil status` — per-file install state visibility.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use stencil_core::{layout, types::ResourceClass};
use stencil_sync::{
    status::{format_age, inspect_at},
    FileState, FileStatus, LEGACY_LINK_MARKER,
};

/// Arguments for `stencil status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Framework checkout to compare against (default: cwd or $STENCIL_SOURCE).
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let home: PathBuf = dirs::home_dir().context("could not determine home directory")?;
        let source_root = match self.source {
            Some(dir) => dir,
            None => layout::source_root().context("could not resolve source directory")?,
        };

        let rows = inspect_at(&source_root, &home, LEGACY_LINK_MARKER)
            .context("status inspection failed")?;

        if self.json {
            print_json(&rows)?;
            return Ok(());
        }

        print_table(&rows);
        Ok(())
    }
}

#[derive(Serialize)]
struct StatusJson {
    summary: StatusSummaryJson,
    files: Vec<FileStatusJson>,
}

#[derive(Serialize)]
struct StatusSummaryJson {
    files: usize,
    current: usize,
    pending: usize,
}

#[derive(Serialize)]
struct FileStatusJson {
    class: ResourceClass,
    file: String,
    state: FileState,
    installed_at: Option<DateTime<Utc>>,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "class")]
    class: String,
    #[tabled(rename = "file")]
    file: String,
    #[tabled(rename = "state")]
    state: String,
    #[tabled(rename = "installed")]
    installed: String,
}

fn print_json(rows: &[FileStatus]) -> Result<()> {
    let payload = StatusJson {
        summary: StatusSummaryJson {
            files: rows.len(),
            current: rows
                .iter()
                .filter(|r| r.state == FileState::Current)
                .count(),
            pending: rows
                .iter()
                .filter(|r| r.state != FileState::Current)
                .count(),
        },
        files: rows
            .iter()
            .map(|row| FileStatusJson {
                class: row.class,
                file: row.file_name.clone(),
                state: row.state,
                installed_at: row.installed_at,
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_table(rows: &[FileStatus]) {
    let pending = rows.iter().filter(|r| r.state != FileState::Current).count();
    println!(
        "Stencil v{} | {} managed files | {} pending",
        env!("CARGO_PKG_VERSION"),
        rows.len(),
        pending,
    );

    if rows.is_empty() {
        println!("No managed files found in the source checkout.");
        return;
    }

    println!(
        "Indicators: {} CURRENT  {} MISSING  {} MODIFIED  {} LEGACY LINK",
        state_indicator(FileState::Current),
        state_indicator(FileState::Missing),
        state_indicator(FileState::Modified),
        state_indicator(FileState::LegacyLink),
    );

    let table_rows: Vec<StatusTableRow> = rows
        .iter()
        .map(|row| StatusTableRow {
            class: row.class.to_string(),
            file: row.file_name.clone(),
            state: format!("{} {}", state_indicator(row.state), state_label(row.state)),
            installed: row
                .installed_at
                .map(|t| format!("{} ago", format_age(t)))
                .unwrap_or_else(|| "never".to_string()),
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");

    if pending > 0 {
        println!("Run 'stencil install' to bring {pending} file(s) up to date.");
    }
}

fn state_label(state: FileState) -> &'static str {
    match state {
        FileState::Missing => "MISSING",
        FileState::LegacyLink => "LEGACY LINK",
        FileState::Modified => "MODIFIED",
        FileState::Current => "CURRENT",
    }
}

fn state_indicator(state: FileState) -> String {
    match state {
        FileState::Missing => "■".bright_black().bold().to_string(),
        FileState::LegacyLink => "■".magenta().bold().to_string(),
        FileState::Modified => "■".yellow().bold().to_string(),
        FileState::Current => "■".green().bold().to_string(),
    }
}
