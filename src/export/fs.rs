//! Filesystem access for the export walk.
//!
//! [`TreeFs`] is the seam between the walk and the disk; [`DiskFs`] is the
//! real implementation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory with its permission bits.
    Dir { mode: u32 },
    /// Anything that is not a directory. Symlinks are not followed.
    File,
}

/// Filesystem operations the export walk needs.
pub trait TreeFs {
    fn kind(&self, path: &Path) -> io::Result<EntryKind>;
    /// Children of `path`, sorted by name.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
    /// Create `path` and missing parents. An existing directory is fine.
    fn create_dir_all(&mut self, path: &Path, mode: u32) -> io::Result<()>;
    /// Whether any entry exists at `path`.
    fn exists(&self, path: &Path) -> io::Result<bool>;
    fn hard_link(&mut self, src: &Path, dest: &Path) -> io::Result<()>;
}

/// [`TreeFs`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFs;

impl TreeFs for DiskFs {
    fn kind(&self, path: &Path) -> io::Result<EntryKind> {
        let meta = fs::symlink_metadata(path)?;
        if meta.is_dir() {
            Ok(EntryKind::Dir {
                mode: dir_mode(&meta),
            })
        } else {
            Ok(EntryKind::File)
        }
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            entries.push(entry?.path());
        }
        entries.sort();
        Ok(entries)
    }

    fn create_dir_all(&mut self, path: &Path, mode: u32) -> io::Result<()> {
        create_dir_with_mode(path, mode)
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        match fs::symlink_metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn hard_link(&mut self, src: &Path, dest: &Path) -> io::Result<()> {
        fs::hard_link(src, dest)
    }
}

#[cfg(unix)]
fn create_dir_with_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(mode).create(path)
}

#[cfg(not(unix))]
fn create_dir_with_mode(path: &Path, _mode: u32) -> io::Result<()> {
    fs::create_dir_all(path)
}

#[cfg(unix)]
fn dir_mode(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn dir_mode(_meta: &fs::Metadata) -> u32 {
    0o755
}
