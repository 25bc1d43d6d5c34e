//! Directory names pruned from the vendor tree.
//!
//! Kept sorted so a lookup is a single binary search.

use std::ffi::OsStr;

/// Version-control bookkeeping directories never exported.
pub const VCS_META_DIRS: [&str; 3] = [".svn", ".git", ".hg"];

/// Sorted set of directory basenames pruned during export.
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsExclusions {
    names: Vec<&'static str>,
}

impl VcsExclusions {
    pub fn new(names: impl IntoIterator<Item = &'static str>) -> Self {
        let mut names: Vec<&'static str> = names.into_iter().collect();
        names.sort_unstable();
        names.dedup();
        Self { names }
    }

    pub fn contains(&self, name: &OsStr) -> bool {
        match name.to_str() {
            Some(name) => self.names.binary_search(&name).is_ok(),
            None => false,
        }
    }

    pub fn names(&self) -> &[&'static str] {
        &self.names
    }
}

impl Default for VcsExclusions {
    fn default() -> Self {
        Self::new(VCS_META_DIRS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_is_sorted() {
        assert_eq!(VcsExclusions::default().names(), &[".git", ".hg", ".svn"]);
    }

    #[test]
    fn test_exact_matches() {
        let set = VcsExclusions::default();
        for name in VCS_META_DIRS {
            assert!(set.contains(OsStr::new(name)), "{name} should be excluded");
        }
    }

    #[test]
    fn test_near_misses_are_not_excluded() {
        let set = VcsExclusions::default();
        for name in [".GIT", ".gitignore", "git", ".cache", ".a", "zzz", "", ".g"] {
            assert!(!set.contains(OsStr::new(name)), "{name} should be kept");
        }
    }

    #[test]
    fn test_custom_set_dedups() {
        let set = VcsExclusions::new([".git", ".bzr", ".git"]);
        assert_eq!(set.names(), &[".bzr", ".git"]);
    }
}
