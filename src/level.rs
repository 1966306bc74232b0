//! # level.rs - Whole-line log level colorizer
//!
//! Classifies a console line by plain substring containment of the
//! configured level keywords (WARN, ERROR, DEBUG by default) and claims the
//! whole line with the first keyword that appears in the configured
//! priority order. Deliberately simple: case sensitive, no word boundaries,
//! so `FOREWARN123` counts as WARN. That false positive is accepted in
//! exchange for a search that is just `str::contains` per keyword.

use crate::config::StyleConfig;
use crate::filter::{FilterMatch, LineFilter, LogLevel};
use crate::span::Span;

/// Per-line level classifier. Keywords and priority come from the style
/// config at construction; nothing else is consulted per line.
pub struct LevelColorFilter {
    keywords: Vec<String>,
}

impl LevelColorFilter {
    /// Build from a style config. Keyword order in the config is the match
    /// priority: a line containing both DEBUG and WARN is tagged with
    /// whichever keyword the config lists first.
    pub fn new(config: &StyleConfig) -> Self {
        LevelColorFilter {
            keywords: config
                .entries()
                .iter()
                .map(|e| e.keyword.clone())
                .collect(),
        }
    }

    /// Classify without building a match. Exposed for callers that only
    /// need the level tag.
    pub fn classify(&self, line: &str) -> Option<LogLevel> {
        self.keywords
            .iter()
            .find(|kw| line.contains(kw.as_str()))
            .map(|kw| LogLevel::from_keyword(kw))
    }
}

impl LineFilter for LevelColorFilter {
    fn apply(&self, line: &str, entire_length: usize) -> Option<FilterMatch> {
        self.classify(line).map(|level| FilterMatch::Style {
            span: Span::whole_line(line, entire_length),
            level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StyleConfig;

    fn filter() -> LevelColorFilter {
        let config = StyleConfig::from_reader(
            "level=WARN\n\nlevel=ERROR\n\nlevel=DEBUG\n".as_bytes(),
        );
        LevelColorFilter::new(&config)
    }

    #[test]
    fn warn_beats_error_and_debug() {
        let f = filter();
        // DEBUG appears first textually, WARN still wins on priority.
        let line = "DEBUG something WARN something ERROR";
        match f.apply(line, line.len()) {
            Some(FilterMatch::Style { level, span }) => {
                assert_eq!(level, LogLevel::Warning);
                assert_eq!(span, Span::new(0, line.len()));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn plain_line_yields_nothing() {
        let f = filter();
        assert_eq!(f.apply("all quiet here", 14), None);
    }

    #[test]
    fn substring_match_has_no_word_boundary() {
        let f = filter();
        assert!(matches!(
            f.apply("FOREWARN123", 11),
            Some(FilterMatch::Style {
                level: LogLevel::Warning,
                ..
            })
        ));
    }

    #[test]
    fn span_is_whole_line_mid_buffer() {
        let f = filter();
        let line = "ERROR: boom";
        match f.apply(line, 100) {
            Some(FilterMatch::Style { span, .. }) => {
                assert_eq!(span, Span::new(100 - line.len(), 100));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn idempotent() {
        let f = filter();
        let line = "WARN once";
        assert_eq!(f.apply(line, 50), f.apply(line, 50));
    }
}
