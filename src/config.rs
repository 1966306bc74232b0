//! # config.rs - Level style configuration
//!
//! loglens reads which log-level keywords to look for, and how to style the
//! lines that contain them, from a small `key=value` configuration format:
//!
//! ```text
//! # lines are grouped into entries; blanks and comments separate entries
//! level=WARN
//! colours=bold yellow
//!
//! level=ERROR
//! colours=bold red
//!
//! level=DEBUG
//! colours=bright_black
//! ```
//!
//! Entry order matters: the first keyword found in a line wins, so the file
//! order is the priority order. Each entry needs a `level` key; `colours`
//! is optional (missing means the default terminal style). Unknown keys are
//! ignored so the format can grow.
//!
//! Style keywords are space separated and build up one composite
//! [`console::Style`]: foreground colors (`red`, `yellow`, ...),
//! backgrounds (`on_red`, ...), attributes (`bold`, `underline`, `italic`,
//! `blink`, `reverse`), bright variants (`bright_red`, ...), and the no-ops
//! `default`, `unchanged`, `none`.

use std::io::{BufRead, Lines};

use regex::Regex;

use crate::filter::LogLevel;

/// Parse one space-separated style keyword list into a composite style.
///
/// Returns the offending keyword on failure so validation tooling can point
/// at it.
pub fn style_from_str(text: &str) -> Result<console::Style, String> {
    text.split(' ')
        .try_fold(console::Style::new(), |style, word| match word {
            "" | "unchanged" | "default" | "none" => Ok(style),

            "black" => Ok(style.black()),
            "red" => Ok(style.red()),
            "green" => Ok(style.green()),
            "yellow" => Ok(style.yellow()),
            "blue" => Ok(style.blue()),
            "magenta" => Ok(style.magenta()),
            "cyan" => Ok(style.cyan()),
            "white" => Ok(style.white()),

            "on_black" => Ok(style.on_black()),
            "on_red" => Ok(style.on_red()),
            "on_green" => Ok(style.on_green()),
            "on_yellow" => Ok(style.on_yellow()),
            "on_blue" => Ok(style.on_blue()),
            "on_magenta" => Ok(style.on_magenta()),
            "on_cyan" => Ok(style.on_cyan()),
            "on_white" => Ok(style.on_white()),

            "bold" => Ok(style.bold()),
            "dim" => Ok(style.dim()),
            "underline" => Ok(style.underlined()),
            "italic" => Ok(style.italic()),
            "blink" => Ok(style.blink()),
            "reverse" => Ok(style.reverse()),

            "bright_black" => Ok(style.bright().black()),
            "bright_red" => Ok(style.bright().red()),
            "bright_green" => Ok(style.bright().green()),
            "bright_yellow" => Ok(style.bright().yellow()),
            "bright_blue" => Ok(style.bright().blue()),
            "bright_magenta" => Ok(style.bright().magenta()),
            "bright_cyan" => Ok(style.bright().cyan()),
            "bright_white" => Ok(style.bright().white()),

            unknown => Err(unknown.to_string()),
        })
}

/// One configured level: the keyword to search for and the style to paint
/// matching lines with.
#[derive(Debug, Clone)]
pub struct LevelStyle {
    /// Substring looked for in each line, e.g. `WARN`. Case sensitive.
    pub keyword: String,
    /// Style applied to the whole line when the keyword is present.
    pub style: console::Style,
}

impl LevelStyle {
    /// The level tag this entry classifies lines as.
    pub fn level(&self) -> LogLevel {
        LogLevel::from_keyword(&self.keyword)
    }
}

/// Ordered set of level styles. Order is match priority.
#[derive(Debug, Clone, Default)]
pub struct StyleConfig {
    entries: Vec<LevelStyle>,
}

impl StyleConfig {
    pub fn new(entries: Vec<LevelStyle>) -> Self {
        StyleConfig { entries }
    }

    /// Parse a config from any buffered reader. Invalid entries are
    /// skipped, matching how the teacher of this format treats malformed
    /// rules: a broken user config degrades, it does not abort.
    pub fn from_reader<A: BufRead>(reader: A) -> Self {
        StyleConfig {
            entries: StyleConfigReader::new(reader.lines()).collect(),
        }
    }

    /// Entries in priority order.
    pub fn entries(&self) -> &[LevelStyle] {
        &self.entries
    }

    /// Look up the configured style for a level tag.
    pub fn style_for(&self, level: &LogLevel) -> Option<&console::Style> {
        self.entries
            .iter()
            .find(|e| e.keyword == level.keyword())
            .map(|e| &e.style)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Iterator yielding [`LevelStyle`] entries from a loglens.conf stream.
///
/// Entries are runs of consecutive lines starting with an alphanumeric
/// character; comments, blanks, and any other line end the current entry.
/// An entry without a valid `level` key is dropped.
pub struct StyleConfigReader<A> {
    inner: Lines<A>,
    keyvalue: Regex,
    alphanumeric: Regex,
}

impl<A: BufRead> StyleConfigReader<A> {
    pub fn new(inner: Lines<A>) -> Self {
        StyleConfigReader {
            inner,
            // key = value, spaces around '=' tolerated
            keyvalue: Regex::new("^([a-z_]+)\\s*=\\s*(.*)$").unwrap(),
            alphanumeric: Regex::new("^[a-zA-Z0-9]").unwrap(),
        }
    }

    /// Skip ahead to the next line that starts an entry.
    fn next_alphanumeric(&mut self) -> Option<String> {
        for line in &mut self.inner {
            match line {
                Ok(line) => {
                    if self.alphanumeric.is_match(&line) {
                        return Some(line.trim().to_string());
                    }
                }
                Err(_) => break,
            }
        }
        None
    }

    /// Next line of the current entry, or `None` when the entry ends
    /// (non-alphanumeric line or EOF).
    fn following(&mut self) -> Option<String> {
        match self.inner.next() {
            Some(Ok(line)) if self.alphanumeric.is_match(&line) => Some(line.trim().to_string()),
            _ => None,
        }
    }
}

impl<A: BufRead> Iterator for StyleConfigReader<A> {
    type Item = LevelStyle;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(first) = self.next_alphanumeric() {
            let mut ln = first;
            let mut keyword: Option<String> = None;
            let mut style: Option<console::Style> = None;
            let mut valid = true;

            loop {
                match self.keyvalue.captures(&ln) {
                    Some(cap) => {
                        let key = cap.get(1).map(|m| m.as_str()).unwrap_or("");
                        let value = cap.get(2).map(|m| m.as_str()).unwrap_or("");
                        match key {
                            "level" => {
                                if value.is_empty() {
                                    crate::debug_println!("empty level keyword");
                                    valid = false;
                                } else {
                                    keyword = Some(value.to_string());
                                }
                            }
                            "colours" | "colors" => match style_from_str(value) {
                                Ok(parsed) => style = Some(parsed),
                                Err(word) => {
                                    crate::debug_println!("unhandled style: {}", word);
                                    valid = false;
                                }
                            },
                            // Unknown keys are accepted and ignored.
                            _ => {}
                        }
                    }
                    None => {
                        crate::debug_println!("not a key=value line: {}", ln);
                        valid = false;
                    }
                }

                match self.following() {
                    Some(next) => ln = next,
                    None => break,
                }
            }

            if valid {
                if let Some(keyword) = keyword {
                    return Some(LevelStyle {
                        keyword,
                        style: style.unwrap_or_else(console::Style::new),
                    });
                }
            }
            // Broken entry; try the next one.
        }
        None
    }
}

/// A problem found while linting a config file. Used by `llcheck`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// 1-based line number the issue was seen at.
    pub line: usize,
    pub message: String,
}

/// Lint a config text without building styles: reports malformed lines,
/// unknown style keywords, and entries missing their `level` key.
pub fn lint_config(text: &str) -> Vec<ConfigIssue> {
    let keyvalue = Regex::new("^([a-z_]+)\\s*=\\s*(.*)$").unwrap();
    let alphanumeric = Regex::new("^[a-zA-Z0-9]").unwrap();

    let mut issues = Vec::new();
    let mut entry_start: Option<usize> = None;
    let mut entry_has_level = false;

    for (idx, raw) in text.lines().enumerate() {
        let lineno = idx + 1;
        if !alphanumeric.is_match(raw) {
            // Entry boundary.
            if let Some(start) = entry_start.take() {
                if !entry_has_level {
                    issues.push(ConfigIssue {
                        line: start,
                        message: "entry has no level= key".to_string(),
                    });
                }
            }
            entry_has_level = false;
            continue;
        }

        if entry_start.is_none() {
            entry_start = Some(lineno);
        }
        let line = raw.trim();
        match keyvalue.captures(line) {
            Some(cap) => {
                let key = cap.get(1).map(|m| m.as_str()).unwrap_or("");
                let value = cap.get(2).map(|m| m.as_str()).unwrap_or("");
                match key {
                    "level" => {
                        if value.is_empty() {
                            issues.push(ConfigIssue {
                                line: lineno,
                                message: "empty level keyword".to_string(),
                            });
                        } else {
                            entry_has_level = true;
                        }
                    }
                    "colours" | "colors" => {
                        if let Err(word) = style_from_str(value) {
                            issues.push(ConfigIssue {
                                line: lineno,
                                message: format!("unknown style keyword '{}'", word),
                            });
                        }
                    }
                    other => {
                        issues.push(ConfigIssue {
                            line: lineno,
                            message: format!("unknown key '{}' (ignored at runtime)", other),
                        });
                    }
                }
            }
            None => {
                issues.push(ConfigIssue {
                    line: lineno,
                    message: "not a key=value line".to_string(),
                });
            }
        }
    }
    if let Some(start) = entry_start {
        if !entry_has_level {
            issues.push(ConfigIssue {
                line: start,
                message: "entry has no level= key".to_string(),
            });
        }
    }
    issues
}
