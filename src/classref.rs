//! # classref.rs - Qualified class name linkifier
//!
//! Scans a console line for tokens that look like fully-qualified class
//! names (`com.example.Foo`, inner classes as `Foo$Inner`) with optional
//! trailing line/column numbers in the bracket styles stack traces and
//! build tools print (`Foo.java:12`, `Foo(12,3)`, `Foo[12]`). Each
//! candidate is normalized (`$` becomes `.`) and offered to the injected
//! [`SymbolIndex`]; the first candidate the index knows wins and the rest
//! of the line is ignored. A line full of ordinary words simply has no
//! resolving candidate and produces no match.
//!
//! The scan is first-resolving-match-wins by design: a common word that
//! happens to resolve as a class shadows a later, "better" candidate, the
//! same trade-off the original console filter makes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use regex::Regex;

use crate::debug_println;
use crate::filter::{FilterMatch, LineFilter};
use crate::span::Span;

/// Symbol-index oracle: maps a dotted qualified name to the source file
/// declaring it, if known.
pub trait SymbolIndex: Send + Sync {
    fn resolve(&self, qualified_name: &str) -> Option<PathBuf>;
}

/// [`SymbolIndex`] over on-disk source trees.
///
/// `com.example.Foo` resolves by probing `<root>/com/example/Foo.<ext>`
/// under each configured root. For inner classes (already normalized to
/// `com.example.Foo.Inner`) progressively shorter prefixes are probed, so
/// `com/example/Foo.java` answers for `Foo.Inner`.
pub struct SourceTreeIndex {
    roots: Vec<PathBuf>,
    extensions: Vec<&'static str>,
}

impl SourceTreeIndex {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        SourceTreeIndex {
            roots,
            extensions: vec!["java", "kt", "scala", "groovy"],
        }
    }
}

impl SymbolIndex for SourceTreeIndex {
    fn resolve(&self, qualified_name: &str) -> Option<PathBuf> {
        let parts: Vec<&str> = qualified_name.split('.').collect();
        // A leading/trailing dot produces an empty component; such a token
        // is not a class name.
        if parts.is_empty() || parts.iter().any(|p| p.is_empty()) {
            return None;
        }

        for root in &self.roots {
            // Longest prefix first: Foo.Inner tries com/example/Foo/Inner.*
            // before falling back to com/example/Foo.*.
            for split in (1..=parts.len()).rev() {
                let mut candidate: PathBuf = root.clone();
                for part in &parts[..split - 1] {
                    candidate.push(part);
                }
                for ext in &self.extensions {
                    let file = candidate.join(format!("{}.{}", parts[split - 1], ext));
                    if Path::new(&file).is_file() {
                        return Some(file);
                    }
                }
            }
        }
        None
    }
}

/// Left-to-right class reference scanner.
pub struct ClassRefFilter {
    pattern: Regex,
    symbols: Arc<dyn SymbolIndex>,
}

impl ClassRefFilter {
    pub fn new(symbols: Arc<dyn SymbolIndex>) -> Self {
        ClassRefFilter {
            // A name token, then up to two numeric groups behind any mix of
            // :,[]() and whitespace, then an optional closing bracket.
            pattern: Regex::new(
                r"([A-Za-z.$]+)(?:[\s:,\[\]()]*(\d+))?(?:[\s:,\[\]()]*(\d+))?[\])]?",
            )
            .unwrap(),
            symbols,
        }
    }
}

/// Parse a 1-based numeric capture; digit-only by construction, so a
/// failure means overflow and the group is dropped.
fn numeric_group(group: Option<regex::Match<'_>>) -> Option<u32> {
    let g = group?;
    match g.as_str().parse() {
        Ok(n) => Some(n),
        Err(err) => {
            debug_println!("numeric capture overflow: {}", err);
            None
        }
    }
}

impl LineFilter for ClassRefFilter {
    fn apply(&self, line: &str, entire_length: usize) -> Option<FilterMatch> {
        for cap in self.pattern.captures_iter(line) {
            let token = match cap.get(1) {
                Some(t) => t,
                None => continue,
            };
            let name = token.as_str().replace('$', ".");

            if self.symbols.resolve(&name).is_some() {
                let whole = cap.get(0)?;
                return Some(FilterMatch::ClassRef {
                    span: Span::in_line(line, entire_length, whole.start(), whole.end()),
                    qualified_name: name,
                    line: numeric_group(cap.get(2)),
                    column: numeric_group(cap.get(3)),
                });
            }
            // Candidate unknown to the index; keep scanning.
        }
        None
    }
}
