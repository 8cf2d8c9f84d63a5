//! Groundwork CLI entry point.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

mod cli;
mod commands;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.execute().await {
        Ok(_) => Ok(()),
        Err(e) if is_interrupt(&e) => {
            // Operator cancellation is a clean exit, not an error report
            eprintln!("{}", "Cancelled".yellow());
            std::process::exit(130);
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "groundwork=debug"
    } else {
        "groundwork=info"
    };
    let _ = groundwork_core::log::init_with_filter(fallback);
}

fn is_interrupt(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .map(|io| io.kind() == std::io::ErrorKind::Interrupted)
            .unwrap_or(false)
    })
}
