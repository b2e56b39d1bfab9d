use crate::output::Output;
use cinelog_config::{Config, PathManager, BACKEND_URL_ENV};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: crate::ConfigCommands, paths: &PathManager, effective: &Config, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show => show_config(paths, effective, output),
        crate::ConfigCommands::Path => {
            let path = paths.config_file();
            if output.is_human() {
                println!("{}", path.display());
            } else {
                output.json(&json!({ "config_file": path.display().to_string() }));
            }
            Ok(())
        }
        crate::ConfigCommands::SetBackend { url } => set_backend(paths, url, output),
    }
}

/// Configuration after env and flag overrides, plus where it came from.
fn show_config(paths: &PathManager, config: &Config, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let log_target = config
        .logging
        .file
        .as_ref()
        .map(|file| file.display().to_string());

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "backend": {
                "base_url": config.backend.base_url,
                "timeout_secs": config.backend.timeout_secs,
            },
            "display": { "placeholder_poster": config.display.placeholder_poster },
            "logging": { "file": log_target },
            "valid": config.validate().is_ok(),
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    let file_note = if config_file.exists() { "" } else { " (not created yet)" };
    let rows = [
        ("Config file", format!("{}{}", config_file.display(), file_note)),
        (
            "Backend URL",
            config
                .backend
                .base_url
                .clone()
                .unwrap_or_else(|| "Not configured".to_string()),
        ),
        ("Timeout", format!("{}s", config.backend.timeout_secs)),
        ("Placeholder poster", config.display.placeholder_poster.clone()),
        (
            "Log file",
            log_target.unwrap_or_else(|| {
                format!("stderr (set logging.file, e.g. {})", paths.default_log_file().display())
            }),
        ),
    ];

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }

    println!("\n{}", "Configuration".bright_cyan().bold());
    println!("{}", table);

    if let Err(e) = config.validate() {
        output.warn(e.to_string());
    }
    if std::env::var(BACKEND_URL_ENV).is_ok() {
        output.info(format!("{} is set and overrides the file value", BACKEND_URL_ENV));
    }
    Ok(())
}

fn set_backend(paths: &PathManager, url: String, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    config.backend.base_url = Some(url.trim().to_string());
    config.validate().map_err(|e| eyre!("{}", e))?;

    paths.ensure_directories().map_err(|e| eyre!("{}", e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Backend set to {}", url.trim()));
    output.json(&json!({ "base_url": url.trim(), "config_file": config_file.display().to_string() }));
    Ok(())
}
