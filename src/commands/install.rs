//! `corm install`: read the `Cormfile` and fetch every package into `_corm/`.

use crate::config::{Layout, STAGING_DIR, load_config};
use crate::error::CormError;
use crate::fetch::{CommandFetcher, fetch_all};
use crate::isolate::isolate_from_env;
use crate::manifest::read_manifest;
use crate::ui;
use anyhow::{Context, Result};
use colored::*;
use std::fs;

pub fn run_install(layout: &Layout) -> Result<()> {
    let config = load_config(layout)?;
    let manifest = read_manifest(&layout.manifest)?;

    for skipped in &manifest.skipped {
        eprintln!(
            "{} SKIPPED line {}: {}: {}",
            "!".yellow(),
            skipped.line_number,
            skipped.reason,
            skipped.content
        );
    }

    if manifest.is_empty() {
        return Err(CormError::NoReferences {
            path: layout.manifest.clone(),
        }
        .into());
    }

    let env = isolate_from_env(
        &layout.staging_root,
        &config.tool.root_var,
        config.tool.isolation,
    )?;
    fs::create_dir_all(&layout.staging_root)
        .with_context(|| format!("Failed to create {}", layout.staging_root.display()))?;

    println!(
        "{} Fetching {} packages into {}/ ...",
        "📦".blue(),
        manifest.references.len(),
        STAGING_DIR
    );

    let mut fetcher = CommandFetcher::from_config(&config.tool);
    let report = fetch_all(&manifest.references, &mut fetcher, &env);

    println!();
    ui::fetch_summary(&report).print();

    let failed = report.failed().count();
    if failed == 0 {
        println!("{} Installed {} packages.", "✓".green(), report.succeeded());
    } else {
        println!(
            "{} {} of {} packages failed to fetch.",
            "!".yellow(),
            failed,
            report.outcomes.len()
        );
    }
    Ok(())
}
