//! # filter.rs - Line filter contract and match model
//!
//! Every filter in loglens is a pure function over one console line: it gets
//! the line text (no trailing newline) plus the absolute offset of the end
//! of the line in the console buffer, and returns at most one
//! [`FilterMatch`]. Filters hold only immutable state (compiled regexes,
//! resolved styles, collaborator handles), so calling [`LineFilter::apply`]
//! twice with the same inputs yields structurally equal results.
//!
//! Matches are a tagged sum type rather than a trait-object hierarchy: the
//! renderer matches on the variant to decide between styling a span and
//! emitting a hyperlink.

use std::sync::Arc;

use crate::classref::{ClassRefFilter, SymbolIndex};
use crate::config::StyleConfig;
use crate::level::LevelColorFilter;
use crate::location::{FileLocationFilter, FileLookup};
use crate::span::Span;

/// Severity tag attached to a whole-line style match.
///
/// `Custom` carries keywords beyond the built-in triple when the style
/// config defines extra entries; the built-in variants keep the common case
/// allocation-free and matchable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Warning,
    Error,
    Debug,
    Custom(String),
}

impl LogLevel {
    /// Map a config keyword to its level tag.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "WARN" => LogLevel::Warning,
            "ERROR" => LogLevel::Error,
            "DEBUG" => LogLevel::Debug,
            other => LogLevel::Custom(other.to_string()),
        }
    }

    /// The substring this level is detected by.
    pub fn keyword(&self) -> &str {
        match self {
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
            LogLevel::Custom(kw) => kw,
        }
    }
}

/// One filter's verdict for one line.
///
/// A filter returns at most one of these per invocation; the variant says
/// what the renderer should do with the span.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterMatch {
    /// Style the whole line after a log-level keyword was found.
    Style { span: Span, level: LogLevel },
    /// A `path:line[:column]` reference whose file exists; navigable.
    /// `line` and `column` are 1-based as printed in the console.
    FileLocation {
        span: Span,
        path: String,
        line: u32,
        column: Option<u32>,
    },
    /// A `path:line[:column]` reference whose file does not exist. The span
    /// (the whole line) is still claimed so no other filter reinterprets
    /// it, but it renders neutral and carries no link.
    MissingFile { span: Span, path: String },
    /// A fully-qualified class name that resolved in the symbol index,
    /// with optional 1-based line/column picked up next to the token.
    ClassRef {
        span: Span,
        qualified_name: String,
        line: Option<u32>,
        column: Option<u32>,
    },
}

impl FilterMatch {
    /// The buffer span this match claims.
    pub fn span(&self) -> Span {
        match self {
            FilterMatch::Style { span, .. }
            | FilterMatch::FileLocation { span, .. }
            | FilterMatch::MissingFile { span, .. }
            | FilterMatch::ClassRef { span, .. } => *span,
        }
    }
}

/// A pure per-line filter.
///
/// `line` carries no trailing newline; `entire_length` is the absolute
/// offset of the end of `line` in the console buffer.
pub trait LineFilter {
    fn apply(&self, line: &str, entire_length: usize) -> Option<FilterMatch>;
}

/// The full filter set: file locations first, then level coloring, then
/// class references, matching the order the original console plugin
/// registers them in.
pub fn console_util_filters(
    config: &StyleConfig,
    files: Arc<dyn FileLookup>,
    symbols: Arc<dyn SymbolIndex>,
) -> Vec<Box<dyn LineFilter>> {
    vec![
        Box::new(FileLocationFilter::new(files)),
        Box::new(LevelColorFilter::new(config)),
        Box::new(ClassRefFilter::new(symbols)),
    ]
}

/// The reduced set with only the level colorizer, for callers that want
/// coloring without any link resolution.
pub fn colorify_filters(config: &StyleConfig) -> Vec<Box<dyn LineFilter>> {
    vec![Box::new(LevelColorFilter::new(config))]
}
