//! # lib.rs - Core library for loglens
//!
//! loglens scans lines of build/run console output and does three things:
//!
//! - colorizes lines that carry log-level markers (WARN/ERROR/DEBUG by
//!   default, configurable),
//! - turns `path:line[:column]` references into terminal hyperlinks that
//!   open the file at that position,
//! - turns fully-qualified class names into hyperlinks resolved against
//!   source trees.
//!
//! Each behavior is a [`filter::LineFilter`]: a pure function from one line
//! (plus its absolute offset in the console buffer) to at most one
//! [`filter::FilterMatch`]. External lookups (does this file exist? which
//! file declares this class?) sit behind injected traits so the pattern
//! logic tests without a filesystem. The [`render`] module is the adapter
//! that runs a filter set over a stream and emits ANSI/OSC 8 output.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use loglens::{classref::SourceTreeIndex, location::LocalFileLookup};
//!
//! let config = loglens::load_style_config();
//! let index = Arc::new(SourceTreeIndex::new(vec!["src".into()]));
//! let filters = loglens::filter::console_util_filters(
//!     &config, Arc::new(LocalFileLookup), index.clone());
//! let mut renderer = loglens::render::Renderer::new(filters, config, Some(index));
//! renderer.render_stream(std::io::stdin().lock(), &mut std::io::stdout())?;
//! ```

pub mod args;
pub mod classref;
pub mod config;
pub mod filter;
pub mod level;
pub mod location;
pub mod render;
pub mod span;

use std::fs::File;
use std::str::FromStr;

use config::StyleConfig;

/// Diagnostics channel for contract breaches and skipped config entries.
/// Compiled out of release builds.
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {};
}

// Simple tilde expansion so config paths can be written portably.
fn expand_tilde(path: &str) -> String {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return format!("{}/{}", home, stripped);
        }
    }
    path.to_string()
}

/// The built-in level styles, compiled into the binary so loglens works
/// with no config files installed. Mirrors `etc/loglens.conf`.
pub const EMBEDDED_CONF: &str = include_str!("../etc/loglens.conf");

lazy_static::lazy_static! {
    // Parsed once; handed out by clone so callers own their config.
    static ref PARSED_EMBEDDED_CONF: StyleConfig =
        StyleConfig::from_reader(EMBEDDED_CONF.as_bytes());
}

/// Configuration file paths in priority order. The first file that parses
/// to at least one entry wins; otherwise the embedded default applies.
pub const CONFIG_PATHS: &[&str] = &[
    "~/.config/loglens/loglens.conf",
    "~/.loglens",
    "/usr/local/etc/loglens.conf",
    "/etc/loglens.conf",
];

/// The embedded default style config (WARN, ERROR, DEBUG in that priority).
pub fn default_style_config() -> StyleConfig {
    PARSED_EMBEDDED_CONF.clone()
}

/// Load the style config: search [`CONFIG_PATHS`], fall back to the
/// embedded default. Unreadable or empty files are skipped, so a broken
/// user config degrades to the defaults instead of aborting.
pub fn load_style_config() -> StyleConfig {
    for path in CONFIG_PATHS {
        if let Ok(file) = File::open(expand_tilde(path)) {
            let config = StyleConfig::from_reader(std::io::BufReader::new(file));
            if !config.is_empty() {
                return config;
            }
        }
    }
    default_style_config()
}

/// Control whether colored output is enabled for this run.
///
/// - **On**: always emit colors and hyperlinks
/// - **Off**: plain text only
/// - **Auto**: colors only when stdout is a terminal
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorMode {
    On,
    Off,
    Auto,
}

impl FromStr for ColorMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(ColorMode::On),
            "off" => Ok(ColorMode::Off),
            "auto" => Ok(ColorMode::Auto),
            _ => Err(()),
        }
    }
}
