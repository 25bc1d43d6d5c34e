//! Error taxonomy for corm.
//!
//! Library code returns [`CormError`]; the CLI wraps it in `anyhow` and turns
//! every fatal variant into a one-line diagnostic and exit code 1. Variants
//! wrapping an `io::Error` keep it as the source, so print with `{:#}` to see
//! the whole chain.
//!
//! Recoverable variants (`ManifestLineUnparsable`, `FetchFailed`) are recorded
//! by their callers and never abort a batch.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CormError {
    /// The manifest could not be opened.
    #[error("cannot open {}", path.display())]
    ManifestNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The manifest opened but reading it failed partway through.
    #[error("cannot read {} at line {line}", path.display())]
    ManifestUnreadable {
        path: PathBuf,
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A single manifest line did not have one or two fields.
    #[error("cannot parse line: expected `<path> [pin]`, found {fields} fields")]
    ManifestLineUnparsable { fields: usize },

    #[error("no packages in {}", path.display())]
    NoReferences { path: PathBuf },

    #[error("cannot fetch {path}: {reason}")]
    FetchFailed { path: String, reason: String },

    #[error("{} does not exist, run `corm install` first", path.display())]
    StagingRootMissing { path: PathBuf },

    /// Filesystem failure during the export walk. Partial output stays on disk.
    #[error("{op} {}", path.display())]
    Traversal {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot isolate {var}: {reason}")]
    EnvironmentIsolationFailed { var: String, reason: String },

    #[error("invalid {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("{command} failed: {reason}")]
    CommandFailed { command: String, reason: String },
}

impl CormError {
    pub(crate) fn traversal(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        CormError::Traversal {
            op,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traversal_message_names_op_and_path() {
        let err = CormError::traversal(
            "link",
            "/tmp/vendor/a.txt",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("link /tmp/vendor/a.txt"));
    }

    #[test]
    fn test_no_references_mentions_manifest() {
        let err = CormError::NoReferences {
            path: PathBuf::from("Cormfile"),
        };
        assert_eq!(err.to_string(), "no packages in Cormfile");
    }
}
