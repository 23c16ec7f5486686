//! Cog CLI
//!
//! Runs Cog scripts under the tick scheduler and exposes the front end
//! for inspection.

use cogc::commands::{lex_file, parse_file, parse_run_options, run_file};

fn main() {
    cogc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let (path, options) = match parse_run_options(&args[2..]) {
                Ok(parsed) => parsed,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    print_run_usage();
                    std::process::exit(1);
                }
            };
            let Some(path) = path else {
                eprintln!("error: missing file path");
                print_run_usage();
                std::process::exit(1);
            };
            run_file(path, &options);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: cog lex <file.cog>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: cog parse <file.cog>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("cog {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_run_usage() {
    eprintln!("Usage: cog run <file.cog> [--gas=<n>] [--max-ticks=<n>]");
}

fn print_usage() {
    println!("Cog script runner");
    println!();
    println!("Usage: cog <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.cog>       Run a program tick by tick until it finishes");
    println!("  parse <file.cog>     Parse and print the canonical program");
    println!("  lex <file.cog>       Tokenize and display tokens");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --gas=<n>            Units of work per tick (default: 10000)");
    println!("  --max-ticks=<n>      Stop after n ticks");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=cog_runtime=debug) to trace the scheduler.");
}
