//! `shipgate init` — write a starter `.shipgate.yaml`.

use crate::gate::config::{parse_config_str, CONFIG_FILE_NAME};
use crate::gate::defaults;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Run the `shipgate init` command.
pub fn run_init(template: Option<&str>, output_path: Option<&str>, force: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let output_file = output_path
        .map(PathBuf::from)
        .unwrap_or_else(|| cwd.join(CONFIG_FILE_NAME));

    if output_file.exists() && !force {
        println!(
            "{} A config file already exists at {}",
            "⚠".yellow(),
            output_file.display()
        );
        println!("  Use --force to overwrite it, or edit it directly.");
        return Ok(());
    }

    let template_name = template.unwrap_or("default");
    let yaml_content = defaults::get_default_config(template_name).ok_or_else(|| {
        let available: Vec<String> = defaults::available_templates()
            .iter()
            .map(|(name, desc)| format!("  {} — {}", name.bold(), desc))
            .collect();
        anyhow::anyhow!(
            "Unknown template '{}'. Available templates:\n{}",
            template_name,
            available.join("\n")
        )
    })?;

    std::fs::write(&output_file, yaml_content)
        .with_context(|| format!("Failed to write config file: {}", output_file.display()))?;

    let config = parse_config_str(yaml_content)?;

    println!();
    println!(
        "  {} Created {}",
        "✓".green().bold(),
        output_file.display().to_string().bold()
    );
    println!();
    println!("  Template:   {}", template_name.cyan());
    println!("  Threshold:  {} containers", config.threshold.to_string().cyan());
    println!("  Validation: {}", config.validation.to_string().cyan());
    println!();
    println!("  {} Next steps:", "→".blue());
    println!(
        "    1. Try it out: {}",
        "shipgate order 10 Rotterdam".dimmed()
    );
    println!("    2. Serve it to agents: {}", "shipgate serve".dimmed());
    println!("    3. Check what happened: {}", "shipgate log".dimmed());
    println!();

    Ok(())
}
