//! `Cormfile` parsing.
//!
//! The manifest is a plain text file with one package per line:
//!
//! ```text
//! github.com/user/repo
//! github.com/user/other v1.2.3
//! ```
//!
//! Empty lines are ignored. A line with any other field count, including a
//! whitespace-only line, is skipped and recorded so the caller can report it.
//! So is a line that is not valid UTF-8. Neither invalidates the whole file.

use crate::error::CormError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReference {
    pub path: String,
    /// Revision requested in the manifest. Carried through but not yet applied
    /// by the fetch step.
    pub pin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub content: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct Manifest {
    pub references: Vec<PackageReference>,
    pub skipped: Vec<SkippedLine>,
}

impl Manifest {
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

pub fn parse_line(line: &str) -> Result<PackageReference, CormError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [path] => Ok(PackageReference {
            path: path.to_string(),
            pin: None,
        }),
        [path, pin] => Ok(PackageReference {
            path: path.to_string(),
            pin: Some(pin.to_string()),
        }),
        _ => Err(CormError::ManifestLineUnparsable {
            fields: fields.len(),
        }),
    }
}

/// Parse manifest content from any buffered reader.
///
/// `source` only labels read errors.
pub fn parse_manifest<R: BufRead>(mut reader: R, source: &Path) -> Result<Manifest, CormError> {
    let mut manifest = Manifest::default();
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| CormError::ManifestUnreadable {
                path: source.to_path_buf(),
                line: line_number + 1,
                source: e,
            })?;
        if read == 0 {
            break;
        }
        line_number += 1;

        let bytes = trim_line_ending(&buf);
        if bytes.is_empty() {
            continue;
        }

        let line = match std::str::from_utf8(bytes) {
            Ok(line) => line,
            Err(_) => {
                manifest.skipped.push(SkippedLine {
                    line_number,
                    content: String::from_utf8_lossy(bytes).into_owned(),
                    reason: "line is not valid UTF-8".to_string(),
                });
                continue;
            }
        };

        match parse_line(line) {
            Ok(reference) => manifest.references.push(reference),
            Err(e) => manifest.skipped.push(SkippedLine {
                line_number,
                content: line.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    tracing::debug!(
        references = manifest.references.len(),
        skipped = manifest.skipped.len(),
        "parsed {}",
        source.display()
    );
    Ok(manifest)
}

fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

pub fn read_manifest(path: &Path) -> Result<Manifest, CormError> {
    let file = File::open(path).map_err(|e| CormError::ManifestNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_manifest(BufReader::new(file), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(content: &str) -> Manifest {
        parse_manifest(Cursor::new(content), Path::new("Cormfile")).unwrap()
    }

    #[test]
    fn test_parse_line_path_only() {
        let r = parse_line("foo/bar").unwrap();
        assert_eq!(r.path, "foo/bar");
        assert_eq!(r.pin, None);
    }

    #[test]
    fn test_parse_line_with_pin() {
        let r = parse_line("  baz/qux\tv1.2.3 ").unwrap();
        assert_eq!(r.path, "baz/qux");
        assert_eq!(r.pin.as_deref(), Some("v1.2.3"));
    }

    #[test]
    fn test_parse_line_too_many_fields() {
        let err = parse_line("a b c").unwrap_err();
        assert!(matches!(err, CormError::ManifestLineUnparsable { fields: 3 }));
    }

    #[test]
    fn test_two_references_in_order() {
        let m = parse("foo/bar\nbaz/qux v1.2.3\n");
        assert_eq!(
            m.references,
            vec![
                PackageReference {
                    path: "foo/bar".to_string(),
                    pin: None
                },
                PackageReference {
                    path: "baz/qux".to_string(),
                    pin: Some("v1.2.3".to_string())
                },
            ]
        );
        assert!(m.skipped.is_empty());
    }

    #[test]
    fn test_malformed_line_is_skipped_not_fatal() {
        let m = parse("a b c\nvalid/path\n");
        assert_eq!(m.references.len(), 1);
        assert_eq!(m.references[0].path, "valid/path");
        assert_eq!(m.skipped.len(), 1);
        assert_eq!(m.skipped[0].line_number, 1);
        assert_eq!(m.skipped[0].content, "a b c");
    }

    #[test]
    fn test_interleaved_valid_and_malformed() {
        let m = parse("one\nx y z\ntwo r1\n\n   \nw x y z\nthree\n");
        let paths: Vec<&str> = m.references.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["one", "two", "three"]);
        let lines: Vec<usize> = m.skipped.iter().map(|s| s.line_number).collect();
        assert_eq!(lines, vec![2, 5, 6]);
    }

    #[test]
    fn test_whitespace_only_line_is_reported() {
        let m = parse("   \nvalid/path\n\t\n");
        assert_eq!(m.references.len(), 1);
        assert_eq!(m.skipped.len(), 2);
        assert_eq!(m.skipped[0].line_number, 1);
        assert_eq!(m.skipped[0].content, "   ");
        assert_eq!(
            m.skipped[0].reason,
            "cannot parse line: expected `<path> [pin]`, found 0 fields"
        );
        assert_eq!(m.skipped[1].line_number, 3);
    }

    #[test]
    fn test_crlf_line_endings() {
        let m = parse("foo/bar\r\nbaz/qux v2\r\n");
        assert_eq!(m.references.len(), 2);
        assert_eq!(m.references[1].pin.as_deref(), Some("v2"));
    }

    #[test]
    fn test_empty_manifest_has_no_references() {
        let m = parse("\n\n");
        assert!(m.is_empty());
        assert!(m.skipped.is_empty());
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let bytes: &[u8] = b"ok/pkg\n\xff\xfe\nnext/pkg v1\r\n";
        let m = parse_manifest(Cursor::new(bytes), Path::new("Cormfile")).unwrap();
        let paths: Vec<&str> = m.references.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["ok/pkg", "next/pkg"]);
        assert_eq!(m.skipped.len(), 1);
        assert_eq!(m.skipped[0].line_number, 2);
        assert_eq!(m.skipped[0].reason, "line is not valid UTF-8");
    }

    #[test]
    fn test_last_line_without_newline() {
        let m = parse("foo/bar\nbaz/qux");
        assert_eq!(m.references.len(), 2);
        assert_eq!(m.references[1].path, "baz/qux");
    }

    #[test]
    fn test_read_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_manifest(&dir.path().join("Cormfile")).unwrap_err();
        assert!(matches!(err, CormError::ManifestNotFound { .. }));
    }
}
