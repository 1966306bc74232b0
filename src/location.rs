//! # location.rs - File location linkifier
//!
//! Recognizes compiler/linter style `path:line[:column]` references at the
//! start of a console line, with an optional leading `[ERROR]` tag the way
//! checkstyle prints them:
//!
//! ```text
//! /src/Foo.java:42:7 cannot find symbol
//! [ERROR] C:\proj\Bar.java:10 missing semicolon
//! ```
//!
//! Whether the file actually exists is a question for the injected
//! [`FileLookup`] collaborator, keeping the pattern logic testable without
//! touching the filesystem. A reference to an existing file becomes a
//! navigable [`FilterMatch::FileLocation`] spanning exactly the path text;
//! a reference to a missing file still claims the whole line as
//! [`FilterMatch::MissingFile`] so no other filter reinterprets it, but it
//! renders neutral with no link.

use std::path::Path;
use std::sync::Arc;

use regex::Regex;

use crate::debug_println;
use crate::filter::{FilterMatch, LineFilter};
use crate::span::Span;

/// File existence oracle. The production implementation probes the local
/// filesystem; tests inject fakes.
pub trait FileLookup: Send + Sync {
    fn exists(&self, path: &str) -> bool;
}

/// [`FileLookup`] backed by the local filesystem.
pub struct LocalFileLookup;

impl FileLookup for LocalFileLookup {
    fn exists(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }
}

/// Start-anchored `path:line[:column]` matcher.
pub struct FileLocationFilter {
    pattern: Regex,
    files: Arc<dyn FileLookup>,
}

impl FileLocationFilter {
    pub fn new(files: Arc<dyn FileLookup>) -> Self {
        FileLocationFilter {
            // Optional "[ERROR]" tag, then a path (optionally with a
            // single-letter drive prefix), a mandatory line number, and an
            // optional column.
            pattern: Regex::new(
                r"^(?:\[ERROR\]\s*)?((?:[A-Za-z]:)?[0-9 a-zA-Z_\-\\./]+):(\d+)(?::(\d+))?",
            )
            .unwrap(),
            files,
        }
    }
}

impl LineFilter for FileLocationFilter {
    fn apply(&self, line: &str, entire_length: usize) -> Option<FilterMatch> {
        let cap = self.pattern.captures(line)?;
        let group = cap.get(1)?;
        let raw_path = group.as_str();

        // The span covers the first occurrence of the raw path text, which
        // for this anchored pattern is the capture itself.
        let local_start = line.find(raw_path).unwrap_or_else(|| group.start());
        let local_end = local_start + raw_path.len();

        // Backslash paths normalize to forward slashes before lookup.
        let path = raw_path.replace('\\', "/");

        // The digit-only captures can only fail to parse by overflowing;
        // treat that as an internal invariant breach and bail quietly.
        let line_no: u32 = match cap.get(2)?.as_str().parse() {
            Ok(n) => n,
            Err(err) => {
                debug_println!("line number capture overflow: {}", err);
                return None;
            }
        };
        let column: Option<u32> = match cap.get(3) {
            Some(g) => match g.as_str().parse() {
                Ok(n) => Some(n),
                Err(err) => {
                    debug_println!("column capture overflow: {}", err);
                    return None;
                }
            },
            None => None,
        };

        if self.files.exists(&path) {
            Some(FilterMatch::FileLocation {
                span: Span::in_line(line, entire_length, local_start, local_end),
                path,
                line: line_no,
                column,
            })
        } else {
            // Claim the whole line, navigable nowhere.
            Some(FilterMatch::MissingFile {
                span: Span::whole_line(line, entire_length),
                path,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AllFiles;
    impl FileLookup for AllFiles {
        fn exists(&self, _path: &str) -> bool {
            true
        }
    }

    struct NoFiles;
    impl FileLookup for NoFiles {
        fn exists(&self, _path: &str) -> bool {
            false
        }
    }

    fn existing() -> FileLocationFilter {
        FileLocationFilter::new(Arc::new(AllFiles))
    }

    #[test]
    fn path_line_column() {
        let line = "/src/Foo.java:42:7 cannot find symbol";
        match existing().apply(line, line.len()) {
            Some(FilterMatch::FileLocation {
                span,
                path,
                line: l,
                column,
            }) => {
                assert_eq!(path, "/src/Foo.java");
                assert_eq!(l, 42);
                assert_eq!(column, Some(7));
                // Span covers exactly the path text.
                assert_eq!(span, Span::new(0, "/src/Foo.java".len()));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn error_tag_and_windows_path() {
        let line = r"[ERROR] C:\proj\Bar.java:10";
        match existing().apply(line, line.len()) {
            Some(FilterMatch::FileLocation {
                path,
                line: l,
                column,
                span,
            }) => {
                assert_eq!(path, "C:/proj/Bar.java");
                assert_eq!(l, 10);
                assert_eq!(column, None);
                let raw = r"C:\proj\Bar.java";
                let start = line.find(raw).unwrap();
                assert_eq!(span, Span::new(start, start + raw.len()));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn missing_file_claims_whole_line() {
        let filter = FileLocationFilter::new(Arc::new(NoFiles));
        let line = "/nope/Gone.java:3 whatever";
        match filter.apply(line, 200) {
            Some(FilterMatch::MissingFile { span, path }) => {
                assert_eq!(path, "/nope/Gone.java");
                assert_eq!(span, Span::new(200 - line.len(), 200));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn line_without_location_yields_nothing() {
        assert_eq!(existing().apply("plain text, no reference", 24), None);
    }

    #[test]
    fn line_number_is_required() {
        // A bare path with no :line is not a location.
        assert_eq!(existing().apply("/src/Foo.java is fine", 21), None);
    }

    #[test]
    fn local_lookup_probes_real_files() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Thing.java");
        writeln!(std::fs::File::create(&file).unwrap(), "class Thing {{}}").unwrap();

        let lookup = LocalFileLookup;
        assert!(lookup.exists(file.to_str().unwrap()));
        assert!(!lookup.exists(dir.path().join("Absent.java").to_str().unwrap()));
        // Directories are not navigable targets.
        assert!(!lookup.exists(dir.path().to_str().unwrap()));
    }
}
