//! List the provisionable services.

use anyhow::Result;
use colored::Colorize;
use groundwork_catalog::Catalog;

pub async fn execute() -> Result<()> {
    let catalog = Catalog::builtin()?;

    println!("{}", "Available services:".bold());
    for id in catalog.service_ids() {
        let secrets = catalog.secrets_for(id)?;
        if secrets.is_empty() {
            println!("  {}", id.cyan());
        } else {
            let names: Vec<&str> = secrets.iter().map(|s| s.name.as_str()).collect();
            println!("  {} ({})", id.cyan(), names.join(", "));
        }
    }

    Ok(())
}
