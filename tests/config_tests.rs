// Style configuration parsing against real files, plus the lint surface
// that llcheck builds on.

use std::io::BufReader;

use loglens::config::{lint_config, style_from_str, StyleConfig};
use loglens::filter::LogLevel;

#[test]
fn loads_custom_levels_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loglens.conf");
    std::fs::write(
        &path,
        "# site overrides\nlevel=FATAL\ncolours=bold white on_red\n\nlevel=WARN\ncolours=yellow\n",
    )
    .unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let config = StyleConfig::from_reader(BufReader::new(file));

    let keywords: Vec<&str> = config.entries().iter().map(|e| e.keyword.as_str()).collect();
    assert_eq!(keywords, vec!["FATAL", "WARN"]);

    // Custom keywords surface as Custom levels and still have a style.
    let fatal = LogLevel::from_keyword("FATAL");
    assert!(matches!(fatal, LogLevel::Custom(_)));
    assert!(config.style_for(&fatal).is_some());
    assert!(config.style_for(&LogLevel::Warning).is_some());
    assert!(config.style_for(&LogLevel::Debug).is_none());
}

#[test]
fn file_order_is_priority_order() {
    // DEBUG first: a line with DEBUG and WARN is classified DEBUG.
    let config =
        StyleConfig::from_reader("level=DEBUG\n\nlevel=WARN\n".as_bytes());
    let filter = loglens::level::LevelColorFilter::new(&config);
    assert_eq!(filter.classify("DEBUG and WARN"), Some(LogLevel::Debug));
}

#[test]
fn embedded_default_matches_shipped_file() {
    let shipped = std::fs::read_to_string("etc/loglens.conf").unwrap();
    assert_eq!(shipped, loglens::EMBEDDED_CONF);
    assert!(lint_config(&shipped).is_empty());
}

#[test]
fn style_keyword_grammar() {
    assert!(style_from_str("bold yellow").is_ok());
    assert!(style_from_str("white on_red reverse").is_ok());
    assert!(style_from_str("bright_black").is_ok());
    assert!(style_from_str("default").is_ok());
    assert_eq!(style_from_str("bold maroon").unwrap_err(), "maroon");
}

#[test]
fn lint_flags_each_problem_once() {
    let text = "level=WARN\ncolours=bold nope\nmystery=1\n\nnot a pair\n";
    let issues = lint_config(text);
    // Bad keyword, unknown key, malformed line, and the trailing entry
    // that never names a level.
    assert_eq!(issues.len(), 4, "{:?}", issues);
    assert!(issues.iter().any(|i| i.line == 2 && i.message.contains("nope")));
    assert!(issues.iter().any(|i| i.line == 3 && i.message.contains("mystery")));
    assert!(issues.iter().any(|i| i.line == 5 && i.message.contains("key=value")));
    assert!(issues.iter().any(|i| i.line == 5 && i.message.contains("no level")));
}
