//! Depth-first walk that mirrors the staging tree into `vendor/`.
//!
//! Children are visited in name order. The first filesystem error aborts the
//! walk and leaves whatever was already created in place.

use super::fs::{EntryKind, TreeFs};
use super::policy::{FileAction, Step, classify_dir, plan_file};
use super::{ExportSummary, VcsExclusions};
use crate::error::CormError;
use std::io;
use std::path::{Path, PathBuf};

struct Walk<'a, F: TreeFs> {
    fs: &'a mut F,
    exclusions: &'a VcsExclusions,
    src_root: &'a Path,
    dest_root: &'a Path,
    summary: ExportSummary,
}

impl<F: TreeFs> Walk<'_, F> {
    fn dest_for(&self, path: &Path) -> Result<PathBuf, CormError> {
        let rel = path.strip_prefix(self.src_root).map_err(|_| {
            CormError::traversal(
                "relativize",
                path,
                io::Error::other(format!("not under {}", self.src_root.display())),
            )
        })?;
        if rel.as_os_str().is_empty() {
            Ok(self.dest_root.to_path_buf())
        } else {
            Ok(self.dest_root.join(rel))
        }
    }

    fn visit(&mut self, path: &Path) -> Result<(), CormError> {
        let kind = self
            .fs
            .kind(path)
            .map_err(|e| CormError::traversal("stat", path, e))?;
        let dest = self.dest_for(path)?;

        match kind {
            EntryKind::Dir { mode } => {
                let name = path.file_name().unwrap_or(path.as_os_str());
                if classify_dir(name, self.exclusions) == Step::SkipSubtree {
                    tracing::debug!(path = %path.display(), "pruned");
                    self.summary.pruned += 1;
                    return Ok(());
                }

                self.fs
                    .create_dir_all(&dest, mode)
                    .map_err(|e| CormError::traversal("mkdir", &dest, e))?;
                self.summary.dirs += 1;

                let children = self
                    .fs
                    .read_dir(path)
                    .map_err(|e| CormError::traversal("read", path, e))?;
                for child in children {
                    self.visit(&child)?;
                }
            }
            EntryKind::File => match plan_file(self.fs.exists(&dest)) {
                FileAction::Skip => {
                    tracing::trace!(path = %dest.display(), "exists, skipped");
                    self.summary.skipped += 1;
                }
                FileAction::Link => {
                    self.fs
                        .hard_link(path, &dest)
                        .map_err(|e| CormError::traversal("link", &dest, e))?;
                    tracing::trace!(path = %dest.display(), "linked");
                    self.summary.linked += 1;
                }
                FileAction::Fail(e) => return Err(CormError::traversal("stat", &dest, e)),
            },
        }
        Ok(())
    }
}

/// Reproduce `src_root` under `dest_root` on any [`TreeFs`].
///
/// Depth-first, children in name order. Stops at the first error and leaves
/// whatever was already created in place.
pub fn export_with<F: TreeFs>(
    fs: &mut F,
    exclusions: &VcsExclusions,
    src_root: &Path,
    dest_root: &Path,
) -> Result<ExportSummary, CormError> {
    let mut walk = Walk {
        fs,
        exclusions,
        src_root,
        dest_root,
        summary: ExportSummary::default(),
    };
    walk.visit(src_root)?;
    Ok(walk.summary)
}
