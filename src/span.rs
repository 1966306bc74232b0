//! # span.rs - Absolute-offset spans over the console buffer
//!
//! Filters report where a match sits inside the whole console buffer, not
//! just inside the current line. A [`Span`] is a half-open `[start, end)`
//! byte range of absolute offsets. The caller hands each filter the line
//! text plus `entire_length`, the absolute offset of the end of that line,
//! and local match offsets are lifted to absolute ones with
//! `entire_length - line.len() + local_offset`.

/// Half-open `[start, end)` range of absolute byte offsets into the console
/// buffer seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    /// Create a span from absolute offsets. `start` must not exceed `end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} past end {}", start, end);
        Span { start, end }
    }

    /// Span covering the whole of `line`, whose last byte ends at absolute
    /// offset `entire_length`.
    pub fn whole_line(line: &str, entire_length: usize) -> Self {
        Span::new(entire_length - line.len(), entire_length)
    }

    /// Lift a local `[local_start, local_end)` range within `line` to
    /// absolute buffer offsets.
    pub fn in_line(line: &str, entire_length: usize, local_start: usize, local_end: usize) -> Self {
        let line_start = entire_length - line.len();
        Span::new(line_start + local_start, line_start + local_end)
    }

    /// Number of bytes covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the span covers nothing.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Translate back to offsets local to a line ending at `entire_length`.
    /// Returns `None` if the span does not lie within that line.
    pub fn to_local(&self, line: &str, entire_length: usize) -> Option<(usize, usize)> {
        let line_start = entire_length - line.len();
        if self.start < line_start || self.end > entire_length {
            return None;
        }
        Some((self.start - line_start, self.end - line_start))
    }
}
