//! Sanitize CLI entry point

use clap::Parser;
use sanitize::cli::{Cli, Command, EXIT_ERROR, EXIT_SUCCESS};
use std::process;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.validate() {
        e.exit();
    }
    sanitize::logging::init();

    let exit_code = match cli.command {
        Command::Init { force } => match sanitize::cli::init::run_init(&cli.config, force) {
            Ok(result) => {
                for path in &result.created {
                    println!("Created {}", path);
                }
                for path in &result.overwritten {
                    println!("Overwrote {}", path);
                }
                for path in &result.skipped {
                    println!("Skipped {} (already exists, use --force to overwrite)", path);
                }
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
        Command::Apply {
            record,
            input,
            format,
            pretty,
        } => sanitize::cli::apply::run_apply(&cli.config, &record, input.as_deref(), format, pretty),
        Command::List { format } => sanitize::cli::list::run_list(&cli.config, format, cli.color),
    };

    process::exit(exit_code);
}
