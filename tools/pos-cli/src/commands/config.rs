//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, PosConfig};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[session]");
    ctx.output
        .kv("store_path", &ctx.config.session.store_path.display().to_string());
    ctx.output
        .kv("login_delay_ms", &ctx.config.session.login_delay_ms.to_string());

    ctx.output.info("[data]");
    match &ctx.config.data.dir {
        Some(dir) => ctx.output.kv("dir", &dir.display().to_string()),
        None => ctx.output.kv("dir", "(built-in catalog)"),
    }

    ctx.output.info("[log]");
    ctx.output.kv("level", &ctx.config.log.level);

    ctx.output.info("[sale]");
    ctx.output.kv("currency", &ctx.config.sale.currency);

    Ok(())
}

/// Writes `pos.toml`, or `pos.json` under `--json`.
fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let name = if ctx.output.is_json() {
        CONFIG_NAMES[2]
    } else {
        CONFIG_NAMES[0]
    };
    let config_path = ctx.cwd.join(name);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if ctx.output.is_json() {
        PosConfig::default().save(&config_path.display().to_string())?;
        ctx.output
            .json(&serde_json::json!({ "created": config_path.display().to_string() }));
        return Ok(());
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output
        .success(&format!("Created {}", config_path.display()));
    Ok(())
}
