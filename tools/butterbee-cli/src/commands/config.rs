//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use butterbee_cache::SessionId;
use butterbee_commerce::checkout::whatsapp_link;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }
    ctx.output.kv("session", ctx.session.as_str());
    ctx.output.kv("data_dir", &ctx.data_dir().display().to_string());

    let shop = &ctx.config.shop;
    ctx.output.info("");
    ctx.output.info("[shop]");
    ctx.output.kv("name", &shop.name);
    ctx.output.kv("currency", &shop.currency);
    if let Some(ref phone) = shop.whatsapp_phone {
        ctx.output.kv("whatsapp_phone", phone);
    }

    ctx.output.info("");
    ctx.output.info("[cart]");
    ctx.output.kv("pricing", ctx.config.cart.pricing.as_str());

    let settings = ctx.settings();
    ctx.output.info("");
    ctx.output.info("[settings]");
    ctx.output.kv("apartments", &settings.apartments.join(", "));
    for slot in &settings.slots {
        let state = if slot.active { "" } else { " (inactive)" };
        ctx.output.list_item(&format!(
            "{} {} {:02}:{:02}{}",
            slot.id, slot.label, slot.start_hour, slot.start_minute, state
        ));
    }

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output
        .kv("products", &ctx.config.catalog.products.len().to_string());

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let session = SessionId::generate();
    let content = generate_default_config(&ctx.config.shop.name, session.as_str());
    fs::write(&config_path, content)?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if ctx.config_path.is_none() {
        warnings.push("no config file found, built-in defaults are in use".to_string());
    }

    if ctx.config.shop.name.trim().is_empty() {
        errors.push("shop.name is required".to_string());
    }

    if let Err(e) = ctx.config.currency() {
        errors.push(format!("shop.currency: {}", e));
    }

    match ctx.config.shop.whatsapp_phone {
        Some(ref phone) => {
            if let Err(e) = whatsapp_link(phone, "") {
                errors.push(format!("shop.whatsapp_phone: {}", e));
            }
        }
        None => warnings.push("shop.whatsapp_phone is not set, orders will not open WhatsApp".to_string()),
    }

    if let Err(e) = ctx.config.settings.validate() {
        errors.push(format!("settings: {}", e));
    }
    let settings = ctx.settings();
    if settings.active_slots().is_empty() {
        errors.push("settings.slots: no active delivery slots".to_string());
    }
    if ctx.config.settings.apartments.is_empty() {
        warnings.push("settings.apartments is empty, using the default list".to_string());
    }

    match ctx.config.catalog() {
        Ok(catalog) if catalog.is_empty() => {
            warnings.push("catalog has no products".to_string());
        }
        Ok(_) => {}
        Err(e) => errors.push(format!("{:#}", e)),
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
