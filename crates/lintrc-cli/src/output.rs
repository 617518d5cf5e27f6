//! Output formatting and reporting

use colored::*;
use lintrc_core::{ConfigWarning, LintrcError, ResolvedConfiguration, Result};
use serde::Serialize;

use crate::ConfigFormat;

/// Serialize a value in the requested format
pub fn render<T: Serialize>(value: &T, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| LintrcError::config_error(format!("Failed to serialize JSON: {e}"))),
        ConfigFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|e| LintrcError::config_error(format!("Failed to serialize YAML: {e}"))),
        ConfigFormat::Toml => toml::to_string_pretty(value)
            .map_err(|e| LintrcError::config_error(format!("Failed to serialize TOML: {e}"))),
    }
}

/// Print collected warnings to stderr so stdout stays machine-readable
pub fn print_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        tracing::warn!("{}", warning);
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
}

/// Summary statistics for a resolved configuration
#[derive(Debug, Clone)]
pub struct ResolutionSummary {
    pub presets: Vec<String>,
    pub rules: usize,
    pub enabled_rules: usize,
    pub environments: Vec<String>,
    pub globals: usize,
    pub warnings: usize,
}

impl ResolutionSummary {
    pub fn from_resolved(resolved: &ResolvedConfiguration) -> Self {
        let configuration = resolved.effective.configuration();
        Self {
            presets: resolved.presets.clone(),
            rules: configuration.rules.len(),
            enabled_rules: configuration.enabled_rule_count(),
            environments: configuration.env.iter().map(str::to_string).collect(),
            globals: configuration.globals.len(),
            warnings: resolved.warnings.len(),
        }
    }

    pub fn print_human(&self) {
        println!("\n{}", "Summary:".bold());
        if self.presets.is_empty() {
            println!("  Presets: none");
        } else {
            println!("  Presets: {}", self.presets.join(", "));
        }
        println!(
            "  Rules: {} ({} enabled)",
            self.rules,
            self.enabled_rules.to_string().green()
        );
        if !self.environments.is_empty() {
            println!("  Environments: {}", self.environments.join(", "));
        }
        println!("  Globals: {}", self.globals);
        if self.warnings > 0 {
            println!("  Warnings: {}", self.warnings.to_string().yellow());
        }
    }
}
