//! Provision a new client environment.

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Input;
use groundwork_catalog::Catalog;
use groundwork_core::config::Config;
use groundwork_core::util::fs::{expand_path, slurp};
use groundwork_env::{Environment, Provisioner};
use groundwork_services::git;
use groundwork_services::gitlab::{GitLabClient, GitLabConfig};
use groundwork_types::{DomainName, VaultCipher};
use groundwork_vault::{generate_secret, AesGcmCipher, ToolCipher, VaultStore};
use std::path::Path;
use std::sync::Arc;

pub async fn execute(
    domain: Option<&str>,
    services: Option<&str>,
    vault_pass: Option<&str>,
    toolpath: Option<&Path>,
) -> Result<()> {
    let config = Config::load_default()?;
    let catalog = Catalog::builtin()?;

    let domain = match domain {
        Some(d) => d.to_string(),
        None => Input::<String>::new().with_prompt("Domain").interact_text()?,
    };
    let domain = DomainName::new(domain.trim())?;

    let services = match services {
        Some(s) => s.to_string(),
        None => Input::<String>::new()
            .with_prompt("Services")
            .interact_text()?,
    };
    let services = parse_services(&services);

    // Validate the whole request before any clone or network work
    for service in &services {
        catalog
            .secrets_for(service)
            .with_context(|| format!("Cannot provision service '{}'", service))?;
    }

    let environment_name = domain.environment_name();
    let checkout = config.work_dir.join(&environment_name);

    println!(
        "{} environment: {}",
        "Creating".green().bold(),
        environment_name.cyan()
    );

    git::clone_into(&config.template_url(), &environment_name, &config.work_dir)
        .await
        .context("Failed to clone the environment template")?;
    git::rename_remote(&checkout, "origin", "upstream").await?;
    git::add_remote(&checkout, "origin", &config.environment_url(&environment_name)).await?;

    let env = Environment::new(domain.clone(), services, &checkout);
    env.write_initial_vars(&config.environment_admin)?;

    let (passphrase, auto_generated) = match vault_pass {
        Some(pass) => (pass.to_string(), false),
        None => (generate_secret(16)?, true),
    };

    let cipher: Arc<dyn VaultCipher> = match toolpath {
        Some(dir) => Arc::new(ToolCipher::new(Some(dir.to_path_buf()))),
        None => Arc::new(AesGcmCipher::new()),
    };

    let provisioner = Provisioner::new(&catalog, cipher);
    let generated = provisioner
        .seed_secrets(&env, &passphrase)
        .context("Failed to seed environment secrets")?;
    println!("  Vaulted {} secrets", generated.len());

    publish(&config, &environment_name, &checkout)
        .await
        .context("Failed to publish the environment repository")?;
    std::fs::remove_dir_all(&checkout)?;

    println!(
        "{} Environment {} created",
        "✓".green().bold(),
        domain.to_string().cyan()
    );
    if auto_generated {
        // The one place the passphrase is surfaced; it is never logged
        println!("Vault Password: {}", passphrase);
    }

    Ok(())
}

/// Create the GitLab project, commit everything, and push upstream.
async fn publish(config: &Config, environment_name: &str, checkout: &Path) -> Result<()> {
    let gitlab = GitLabClient::new(GitLabConfig {
        url: config.gitlab_url.clone(),
        token: resolve_token(config)?,
        group: config.gitlab_group.clone(),
    })?;

    let group = gitlab.find_group().await?;
    gitlab.create_project(environment_name, group.id).await?;

    git::commit_all(checkout, "Setup Commit").await?;
    git::push(checkout, "origin", "master").await?;

    Ok(())
}

/// Resolve the GitLab token: environment first, then the config file, then
/// the operator-side encrypted vault when one is configured.
fn resolve_token(config: &Config) -> Result<Option<String>> {
    if let Ok(token) = std::env::var("GITLAB_TOKEN") {
        return Ok(Some(token));
    }

    if let Some(token) = &config.gitlab_token {
        return Ok(Some(token.clone()));
    }

    if let (Some(vault_file), Some(pass_file)) =
        (&config.ops_vault_file, &config.ops_vault_pass_file)
    {
        let pass = slurp(expand_path(pass_file))
            .context("Failed to read the ops vault passphrase file")?;
        let store = VaultStore::new(expand_path(vault_file), Arc::new(AesGcmCipher::new()));
        let data = store
            .load(pass.trim())
            .context("Failed to open the ops vault")?;
        if let Some(token) = data.get("vault_gitlab_oauth_token") {
            return Ok(Some(token.clone()));
        }
    }

    Ok(None)
}

/// Split a comma-separated service list, trimming whitespace and dropping
/// empty entries.
fn parse_services(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
