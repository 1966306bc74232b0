//! # render.rs - Terminal renderer for filter matches
//!
//! The filters only describe what they found; this module turns those
//! descriptions into terminal output. Per line it:
//!
//! 1. offers the line to every filter in set order and collects matches;
//! 2. picks the base style for the line: the first whole-line claim wins,
//!    so a missing-file claim from the location filter (tried first)
//!    renders neutral even when the line also says ERROR;
//! 3. overlays link styling on navigable sub-spans and, when colors are
//!    enabled, wraps them in OSC 8 `file://` hyperlinks so terminals that
//!    support it make them clickable;
//! 4. emits the line as style-merged segments, flushing after each line so
//!    interactive build output stays real time.
//!
//! Navigation itself never happens here: a match is turned into a
//! [`NavigationTarget`] descriptor (0-based line/column, the spec the
//! editor protocols want) and into a URL; following the link is the
//! terminal's business.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use crate::classref::SymbolIndex;
use crate::config::StyleConfig;
use crate::filter::{FilterMatch, LineFilter};

/// Where activating a match would navigate to. `line` and `column` are
/// 0-based, converted from the 1-based values printed in the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub path: PathBuf,
    pub line: u32,
    pub column: u32,
}

impl NavigationTarget {
    /// `file://` URL for OSC 8 hyperlinks, with a `#L<line>` fragment
    /// (1-based again, the convention file viewers use).
    pub fn url(&self) -> String {
        format!("file://{}#L{}", self.path.display(), self.line + 1)
    }
}

/// Renders console lines through an ordered filter set.
pub struct Renderer {
    filters: Vec<Box<dyn LineFilter>>,
    styles: StyleConfig,
    symbols: Option<Arc<dyn SymbolIndex>>,
    link_style: console::Style,
    /// Absolute offset of the end of the last line seen, newline included.
    entire_length: usize,
}

impl Renderer {
    pub fn new(
        filters: Vec<Box<dyn LineFilter>>,
        styles: StyleConfig,
        symbols: Option<Arc<dyn SymbolIndex>>,
    ) -> Self {
        Renderer {
            filters,
            styles,
            symbols,
            link_style: console::Style::new().cyan().underlined(),
            entire_length: 0,
        }
    }

    /// Offer one line to every filter, in set order.
    pub fn apply_line(&self, line: &str, entire_length: usize) -> Vec<FilterMatch> {
        self.filters
            .iter()
            .filter_map(|f| f.apply(line, entire_length))
            .collect()
    }

    /// Resolve the navigation descriptor for a match, converting the
    /// console's 1-based positions to 0-based. Style and missing-file
    /// matches have nowhere to go.
    pub fn navigation_target(&self, m: &FilterMatch) -> Option<NavigationTarget> {
        match m {
            FilterMatch::FileLocation {
                path, line, column, ..
            } => Some(NavigationTarget {
                path: PathBuf::from(path),
                line: line.saturating_sub(1),
                column: column.map(|c| c.saturating_sub(1)).unwrap_or(0),
            }),
            FilterMatch::ClassRef {
                qualified_name,
                line,
                column,
                ..
            } => {
                // Deferred resolution: the match only carries the name, the
                // index is consulted when the link is materialized.
                let path = self.symbols.as_ref()?.resolve(qualified_name)?;
                Some(NavigationTarget {
                    path,
                    line: line.map(|l| l.saturating_sub(1)).unwrap_or(0),
                    column: column.map(|c| c.saturating_sub(1)).unwrap_or(0),
                })
            }
            FilterMatch::Style { .. } | FilterMatch::MissingFile { .. } => None,
        }
    }

    /// Render one line (no trailing newline in `line`; one is written).
    pub fn render_line<W: Write + ?Sized>(
        &self,
        line: &str,
        entire_length: usize,
        writer: &mut W,
    ) -> std::io::Result<()> {
        if line.is_empty() {
            return writeln!(writer);
        }

        let matches = self.apply_line(line, entire_length);

        // First whole-line claim in filter order decides the base style.
        let neutral = console::Style::new();
        let mut base = &neutral;
        for m in &matches {
            match m {
                FilterMatch::MissingFile { .. } => break,
                FilterMatch::Style { level, .. } => {
                    if let Some(style) = self.styles.style_for(level) {
                        base = style;
                    }
                    break;
                }
                _ => {}
            }
        }

        // Navigable sub-spans overlay the base. Spans from distinct filters
        // never overlap each other in practice; if they do, the earlier
        // filter keeps the region.
        let mut links: Vec<(usize, usize, Option<String>)> = Vec::new();
        for m in &matches {
            let url = self.navigation_target(m).map(|t| t.url());
            if let FilterMatch::FileLocation { span, .. } | FilterMatch::ClassRef { span, .. } = m {
                if let Some((start, end)) = span.to_local(line, entire_length) {
                    let taken = links.iter().any(|(s, e, _)| start < *e && *s < end);
                    if !taken && start < end {
                        links.push((start, end, url));
                    }
                }
            }
        }
        links.sort_by_key(|(s, _, _)| *s);

        // Emit segments between link boundaries, teacher-style run-length:
        // each segment gets exactly one style application.
        let colors = console::colors_enabled();
        let mut cursor = 0;
        for (start, end, url) in &links {
            if cursor < *start {
                write!(writer, "{}", base.apply_to(&line[cursor..*start]))?;
            }
            let text = self.link_style.apply_to(&line[*start..*end]);
            match url {
                Some(url) if colors => {
                    // OSC 8 hyperlink wrapping the styled span.
                    write!(writer, "\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, text)?;
                }
                _ => write!(writer, "{}", text)?,
            }
            cursor = *end;
        }
        if cursor < line.len() {
            write!(writer, "{}", base.apply_to(&line[cursor..]))?;
        }
        writeln!(writer)
    }

    /// Stream a whole reader through the filters, tracking the console
    /// buffer offset (line bytes plus one per newline) and flushing after
    /// every line for real-time output.
    pub fn render_stream<R: BufRead, W: Write + ?Sized>(
        &mut self,
        reader: R,
        writer: &mut W,
    ) -> Result<(), Box<dyn std::error::Error>> {
        for line in reader.lines() {
            let line = line?;
            self.entire_length += line.len();
            self.render_line(&line, self.entire_length, writer)?;
            self.entire_length += 1;
            writer.flush()?;
        }
        Ok(())
    }
}
