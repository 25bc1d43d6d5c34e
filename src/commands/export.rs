//! `corm export`: materialize `_corm/src` as `vendor/`.

use crate::config::{Layout, VENDOR_DIR};
use crate::error::CormError;
use crate::export::export;
use anyhow::Result;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

pub fn run_export(layout: &Layout) -> Result<()> {
    if !layout.staging_src.is_dir() {
        return Err(CormError::StagingRootMissing {
            path: layout.staging_src.clone(),
        }
        .into());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Exporting to {}/ ...", VENDOR_DIR));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let summary = match export(&layout.staging_src, &layout.vendor_dir) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };
    pb.finish_and_clear();

    println!(
        "{} Exported to {}/: {} linked, {} already present, {} VCS directories skipped",
        "✓".green(),
        VENDOR_DIR,
        summary.linked,
        summary.skipped,
        summary.pruned
    );
    tracing::debug!(?summary, "export finished");
    Ok(())
}
