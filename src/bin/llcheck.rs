// llcheck: validates loglens style configuration files and reports
// problems with line locations, so a broken config is caught before it
// silently degrades to the built-in defaults at runtime.

use std::path::Path;

use loglens::config::{lint_config, StyleConfig};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help(&args[0]);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "--help" | "-h" => print_help(&args[0]),
        "--version" | "-V" => println!("llcheck {}", env!("CARGO_PKG_VERSION")),
        _ => {
            let mut failed = false;
            for path in &args[1..] {
                if !check_file(Path::new(path)) {
                    failed = true;
                }
            }
            if failed {
                std::process::exit(1);
            }
        }
    }
}

/// Validate one config file. Returns false when issues were found.
fn check_file(path: &Path) -> bool {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("{}: cannot read: {}", path.display(), err);
            return false;
        }
    };

    let issues = lint_config(&text);
    for issue in &issues {
        eprintln!("{}:{}: {}", path.display(), issue.line, issue.message);
    }

    let config = StyleConfig::from_reader(text.as_bytes());
    if config.is_empty() {
        eprintln!(
            "{}: no usable entries; loglens would fall back to built-in defaults",
            path.display()
        );
        return false;
    }

    if issues.is_empty() {
        println!(
            "{}: ok ({} level{})",
            path.display(),
            config.entries().len(),
            if config.entries().len() == 1 { "" } else { "s" }
        );
        true
    } else {
        false
    }
}

fn print_help(prog: &str) {
    println!("llcheck - validate loglens configuration files");
    println!();
    println!("Usage: {} <FILE>...", prog);
    println!();
    println!("Options:");
    println!("  --help, -h      Show this help message");
    println!("  --version, -V   Show version");
    println!();
    println!("Examples:");
    println!("  {} ~/.config/loglens/loglens.conf", prog);
    println!("  {} etc/loglens.conf", prog);
}
