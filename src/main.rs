use std::io::BufReader;
use std::process::{Command, Stdio};
use std::sync::Arc;

use loglens::args::parse_args;
use loglens::classref::SourceTreeIndex;
use loglens::filter::{colorify_filters, console_util_filters};
use loglens::location::LocalFileLookup;
use loglens::render::Renderer;
use loglens::ColorMode;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Main entry point for the `loglens` binary.
///
/// Wraps a command (or stdin) and filters its output line by line:
/// 1. Parse arguments and load the level style configuration.
/// 2. Build the filter set: location links, level colors, class links
///    (or just level colors with --levels-only).
/// 3. Spawn the command with stdout piped, or fall back to stdin.
/// 4. Stream every line through the renderer, which colorizes level
///    lines and wraps source references in OSC 8 hyperlinks.
/// 5. Propagate the child's exit code.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("loglens: {}", msg);
            std::process::exit(2);
        }
    };

    match args.color {
        ColorMode::On => console::set_colors_enabled(true),
        ColorMode::Off => console::set_colors_enabled(false),
        ColorMode::Auto => {} // TTY detection is the default
    }

    let config = loglens::load_style_config();

    // Class references resolve against the given roots, defaulting to the
    // working directory.
    let roots = if args.roots.is_empty() {
        vec![".".into()]
    } else {
        args.roots.iter().map(|r| r.into()).collect()
    };
    let symbols = Arc::new(SourceTreeIndex::new(roots));

    let filters = if args.levels_only {
        colorify_filters(&config)
    } else {
        console_util_filters(&config, Arc::new(LocalFileLookup), symbols.clone())
    };
    let symbol_index = if args.levels_only {
        None
    } else {
        Some(symbols as Arc<dyn loglens::classref::SymbolIndex>)
    };
    let mut renderer = Renderer::new(filters, config, symbol_index);

    let mut stdout = std::io::stdout();

    // No command: behave as a plain pipe filter.
    if args.command.is_empty() {
        let stdin = std::io::stdin();
        renderer.render_stream(stdin.lock(), &mut stdout)?;
        return Ok(());
    }

    // Spawn the command with stdout piped so its lines pass through the
    // filters; stderr stays attached to the terminal.
    let mut child = Command::new(&args.command[0])
        .args(&args.command[1..])
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|e| format!("failed to spawn {}: {}", args.command[0], e))?;

    if let Some(child_stdout) = child.stdout.take() {
        renderer.render_stream(BufReader::new(child_stdout), &mut stdout)?;
    }

    // Propagate the child's exit code.
    let status = child.wait()?;
    std::process::exit(status.code().unwrap_or(1));
}
