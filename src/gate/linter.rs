//! Config linter — flags settings that are legal but probably not intended.
//!
//! Run by `shipgate check` after the config parses.

use crate::gate::types::*;
use colored::Colorize;

/// Above this, human review practically never happens.
const UNREVIEWED_THRESHOLD: i64 = 1000;

/// A lint warning — something the user should know about their config.
#[derive(Debug)]
pub struct LintWarning {
    pub severity: Severity,
    pub message: String,
    pub suggestion: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Info,
}

impl LintWarning {
    fn warn_with_fix(msg: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: msg.into(),
            suggestion: Some(fix.into()),
        }
    }

    fn info(msg: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: msg.into(),
            suggestion: None,
        }
    }

    /// Format for terminal output.
    pub fn display(&self) -> String {
        let icon = match self.severity {
            Severity::Warning => "⚠".yellow().to_string(),
            Severity::Info => "ℹ".blue().to_string(),
        };
        let mut out = format!("  {} {}", icon, self.message);
        if let Some(ref suggestion) = self.suggestion {
            out.push_str(&format!("\n    {}: {}", "Fix".green(), suggestion));
        }
        out
    }
}

/// Lint a config and return warnings.
pub fn lint_config(config: &GateConfig) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    if config.threshold == 0 {
        warnings.push(LintWarning::info(
            "Threshold is 0 — every order with at least one container pauses for review",
        ));
    } else if config.threshold >= UNREVIEWED_THRESHOLD {
        warnings.push(LintWarning::warn_with_fix(
            format!(
                "Threshold is {} — orders this large are rare, so humans will almost never be asked",
                config.threshold
            ),
            format!("lower 'threshold' (the default is {})", DEFAULT_THRESHOLD),
        ));
    }

    if config.validation == ValidationMode::Permissive {
        warnings.push(LintWarning::info(
            "Validation is permissive — negative quantities and blank destinations are auto-approved",
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_only_info() {
        let warnings = lint_config(&GateConfig::default());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Info);
    }

    #[test]
    fn test_huge_threshold_warns() {
        let config = GateConfig {
            threshold: 5000,
            validation: ValidationMode::Strict,
            ..Default::default()
        };
        let warnings = lint_config(&config);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Warning);
        assert!(warnings[0].suggestion.is_some());
    }

    #[test]
    fn test_clean_strict_config() {
        let config = GateConfig {
            validation: ValidationMode::Strict,
            ..Default::default()
        };
        assert!(lint_config(&config).is_empty());
    }
}
