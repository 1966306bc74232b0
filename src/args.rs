//! # args.rs - Command-line argument parsing for loglens
//!
//! Hand-rolled parsing: the surface is four flags and a command tail, not
//! worth a parser dependency. Parsing stops at the first non-flag argument
//! so flags belonging to the wrapped command pass through untouched.

use std::str::FromStr;

use crate::ColorMode;

/// Parsed command-line arguments for the `loglens` binary.
#[derive(Debug, PartialEq)]
pub struct Args {
    /// Requested color mode (on/off/auto).
    pub color: ColorMode,
    /// Only apply the level colorizer, no link filters.
    pub levels_only: bool,
    /// Source roots for class name resolution.
    pub roots: Vec<String>,
    /// Command to execute and its arguments; empty means filter stdin.
    pub command: Vec<String>,
}

/// Parse the process arguments.
pub fn parse_args() -> Result<Args, String> {
    parse_args_impl(std::env::args().skip(1).collect())
}

/// Core parsing logic, split out so tests can feed argument vectors
/// directly.
fn parse_args_impl(args: Vec<String>) -> Result<Args, String> {
    let mut color = ColorMode::Auto;
    let mut levels_only = false;
    let mut roots = Vec::new();
    let mut command = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--colour" | "--color" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("{} requires a value (on|off|auto)", arg))?;
                color = ColorMode::from_str(&value)
                    .map_err(|_| format!("invalid color mode '{}', expected on|off|auto", value))?;
            }
            "--levels-only" => levels_only = true,
            "--root" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--root requires a directory".to_string())?;
                roots.push(value);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("loglens {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option '{}'", other));
            }
            // First non-flag argument starts the command; everything after
            // it belongs to that command verbatim.
            _ => {
                command.push(arg);
                command.extend(iter);
                break;
            }
        }
    }

    Ok(Args {
        color,
        levels_only,
        roots,
        command,
    })
}

fn print_help() {
    println!("loglens - colorize log levels and hyperlink source references in console output");
    println!();
    println!("Usage: loglens [OPTIONS] [COMMAND [ARGS...]]");
    println!();
    println!("With a COMMAND, runs it and filters its stdout; otherwise filters stdin.");
    println!();
    println!("Options:");
    println!("  --colour <on|off|auto>  Override color output (default: auto)");
    println!("  --levels-only           Only colorize levels, no link filters");
    println!("  --root <DIR>            Source root for class resolution (repeatable)");
    println!("  --help, -h              Show this help");
    println!("  --version, -V           Show version");
}
