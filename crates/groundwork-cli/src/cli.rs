//! CLI structure and command definitions.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "groundwork")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Provision client environments for the compositional platform", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Provision a new client environment
    New {
        /// The domain to create this environment for
        #[arg(short, long)]
        domain: Option<String>,

        /// Comma-separated list of services to deploy to this environment
        #[arg(short, long)]
        services: Option<String>,

        /// Passphrase for the environment vault (auto-generated when omitted)
        #[arg(long)]
        vault_pass: Option<String>,

        /// Directory holding an external vault tool to encrypt with instead
        /// of the built-in cipher
        #[arg(short = 'b', long)]
        toolpath: Option<PathBuf>,
    },

    /// List the services the catalog can provision
    Services,
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        use crate::commands::*;

        match &self.command {
            Commands::New {
                domain,
                services,
                vault_pass,
                toolpath,
            } => {
                new::execute(
                    domain.as_deref(),
                    services.as_deref(),
                    vault_pass.as_deref(),
                    toolpath.as_deref(),
                )
                .await
            }
            Commands::Services => services::execute().await,
        }
    }
}
