//! Vendor export engine.
//!
//! Materializes `_corm/src` as `vendor/`:
//!
//! - directories listed in [`VCS_META_DIRS`] are pruned with their subtrees
//! - every other directory is created with the source's permission bits
//! - files are hard-linked, and a file already present at the destination is
//!   left alone, so repeated exports only add what is new
//!
//! Source and destination must live on the same filesystem. There is no copy
//! fallback when linking fails.

mod exclusions;
mod fs;
mod policy;
mod walk;

pub use exclusions::{VCS_META_DIRS, VcsExclusions};
pub use fs::{DiskFs, EntryKind, TreeFs};
pub use policy::{FileAction, Step, classify_dir, plan_file};
pub use walk::export_with;

use crate::error::CormError;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub dirs: usize,
    pub linked: usize,
    pub skipped: usize,
    pub pruned: usize,
}

/// Export `src_root` into `dest_root` on disk with the default exclusions.
pub fn export(src_root: &Path, dest_root: &Path) -> Result<ExportSummary, CormError> {
    export_with(&mut DiskFs, &VcsExclusions::default(), src_root, dest_root)
}
