//! YAML config parser for the approval gate.
//!
//! # Example config file:
//! ```yaml
//! gate: shipping-v1
//! description: Ask a human before shipping more than five containers
//! threshold: 5
//! validation: permissive
//! ```

use crate::gate::types::*;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and its parents.
pub const CONFIG_FILE_NAME: &str = ".shipgate.yaml";

/// Raw YAML representation before validation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    gate: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    threshold: Option<i64>,
    #[serde(default)]
    validation: Option<String>,
}

/// Parse a YAML config file from a file path.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<GateConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse a YAML config string into a GateConfig.
pub fn parse_config_str(yaml: &str) -> Result<GateConfig> {
    let raw: RawConfig = serde_yaml::from_str(yaml).context("Invalid YAML syntax in config file")?;

    if raw.gate.trim().is_empty() {
        bail!("Config must have a non-empty 'gate' name");
    }

    let threshold = raw.threshold.unwrap_or(DEFAULT_THRESHOLD);
    if threshold < 0 {
        bail!("'threshold' must be zero or greater, got {}", threshold);
    }

    let validation = match raw.validation.as_deref().map(|v| v.trim().to_lowercase()) {
        None => ValidationMode::Permissive,
        Some(v) => parse_validation(&v)
            .with_context(|| format!("Unknown validation mode '{}'", v))?,
    };

    Ok(GateConfig {
        gate: raw.gate,
        description: raw.description,
        threshold,
        validation,
    })
}

fn parse_validation(s: &str) -> Option<ValidationMode> {
    match s {
        "permissive" | "lenient" | "off" => Some(ValidationMode::Permissive),
        "strict" | "on" => Some(ValidationMode::Strict),
        _ => None,
    }
}

/// Find the config file walking up the directory tree.
pub fn find_config_walking_up(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Resolve the config used by a command.
///
/// An explicit path must exist. Without one, the nearest `.shipgate.yaml`
/// is used, falling back to the built-in default. A threshold override
/// (flag or `SHIPGATE_THRESHOLD`) wins over the file.
pub fn load_config(explicit: Option<&Path>, threshold_override: Option<i64>) -> Result<GateConfig> {
    let mut config = match explicit {
        Some(path) => parse_config_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            match find_config_walking_up(&cwd) {
                Some(path) => parse_config_file(&path)?,
                None => GateConfig::default(),
            }
        }
    };

    if let Some(threshold) = threshold_override {
        if threshold < 0 {
            bail!("Threshold override must be zero or greater, got {}", threshold);
        }
        config.threshold = threshold;
    }

    Ok(config)
}
