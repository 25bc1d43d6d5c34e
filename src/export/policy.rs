//! Per-entry decisions made during export.

use super::VcsExclusions;
use std::ffi::OsStr;
use std::io;

/// What the walk does with a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Descend,
    SkipSubtree,
}

/// What the walk does with a file.
#[derive(Debug)]
pub enum FileAction {
    Skip,
    Link,
    Fail(io::Error),
}

pub fn classify_dir(name: &OsStr, exclusions: &VcsExclusions) -> Step {
    if exclusions.contains(name) {
        Step::SkipSubtree
    } else {
        Step::Descend
    }
}

/// Decide from the destination probe. An existing entry is never overwritten.
pub fn plan_file(dest_probe: io::Result<bool>) -> FileAction {
    match dest_probe {
        Ok(true) => FileAction::Skip,
        Ok(false) => FileAction::Link,
        Err(e) => FileAction::Fail(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_dir() {
        let set = VcsExclusions::default();
        assert_eq!(classify_dir(OsStr::new(".git"), &set), Step::SkipSubtree);
        assert_eq!(classify_dir(OsStr::new(".hg"), &set), Step::SkipSubtree);
        assert_eq!(classify_dir(OsStr::new("src"), &set), Step::Descend);
    }

    #[test]
    fn test_plan_file() {
        assert!(matches!(plan_file(Ok(true)), FileAction::Skip));
        assert!(matches!(plan_file(Ok(false)), FileAction::Link));
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(matches!(plan_file(Err(denied)), FileAction::Fail(_)));
    }
}
