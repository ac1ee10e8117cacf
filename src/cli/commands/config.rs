//! Configuration command implementation

use crate::cli::{CliContext, ConfigAction};
use crate::config::{ConfigKey, MtreeConfig};
use anyhow::{bail, Result};
use colored::Colorize;

/// Execute the config command
pub fn execute(ctx: &CliContext, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show { json } => show(ctx, json),
        ConfigAction::Init { force } => init(ctx, force),
        ConfigAction::Get { key } => {
            let key = ConfigKey::parse(&key)?;
            println!("{}", ctx.config.get(key));
            Ok(())
        }
        ConfigAction::Set { key, value } => set(ctx, &key, &value),
    }
}

fn show(ctx: &CliContext, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&ctx.config)?);
        return Ok(());
    }

    if let Some(path) = &ctx.config_path {
        let status = if path.exists() {
            "exists".green()
        } else {
            "not created yet".yellow()
        };
        println!("{}: {} ({})", "Configuration file".bold(), path.display().to_string().cyan(), status);
    }
    for (key, value) in ctx.config.list() {
        println!("{} = {}", key.bold(), value);
    }
    Ok(())
}

fn init(ctx: &CliContext, force: bool) -> Result<()> {
    let path = ctx.require_config_path()?;
    if path.exists() && !force {
        bail!("{} already exists; pass --force to overwrite", path.display());
    }

    MtreeConfig::default().save_to(path)?;
    if !ctx.quiet {
        println!("{} Wrote {}", "✓".green(), path.display().to_string().cyan());
    }
    Ok(())
}

fn set(ctx: &CliContext, key: &str, value: &str) -> Result<()> {
    let path = ctx.require_config_path()?;
    let key = ConfigKey::parse(key)?;

    // Start from the file, not the effective config, so overrides are not persisted
    let mut config = MtreeConfig::load_from(path)?;
    config.set(key, value)?;
    config.save_to(path)?;

    if !ctx.quiet {
        println!("{} {} = {}", "✓".green(), key.as_str().bold(), config.get(key).cyan());
    }
    Ok(())
}
