//! Configuration management subcommands
//!
//! - init: Create new configuration files
//! - validate: Validate a configuration and the presets it extends
//! - show: Display the configuration as written or as resolved
//! - schema: Print the JSON Schema of the file format

use lintrc_core::config::{self, ConfigLoader};
use lintrc_core::{Configuration, GlobalAccess, LintrcError, Result, RuleSetting, Severity};
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, error};

use crate::ConfigFormat;
use crate::output::{ResolutionSummary, print_warnings, render};

/// Config init command implementation
pub fn init_command(format: ConfigFormat, force: bool, with_examples: bool) -> Result<()> {
    debug!("Initializing configuration file with format: {:?}", format);

    let filename = match format {
        ConfigFormat::Json => ".lintrc.json",
        ConfigFormat::Yaml => ".lintrc.yaml",
        ConfigFormat::Toml => ".lintrc.toml",
    };

    let config_path = PathBuf::from(filename);

    if config_path.exists() && !force {
        error!(
            "Configuration file '{}' already exists. Use --force to overwrite.",
            filename
        );
        return Err(LintrcError::config_error(format!(
            "Configuration file '{filename}' already exists"
        )));
    }

    let default_config = if with_examples {
        create_example_config()
    } else {
        create_minimal_config()
    };

    let config_content = render(&default_config, format)?;
    std::fs::write(&config_path, config_content)
        .map_err(|e| LintrcError::io_error(&config_path, e))?;

    println!("✅ Created configuration file: {filename}");
    if with_examples {
        println!("   The file includes example globals and rules.");
    }
    println!("   Edit the file to customize your linting rules.");

    Ok(())
}

/// Config validate command implementation
pub fn validate_command(path: Option<PathBuf>, preset_dirs: &[PathBuf]) -> Result<()> {
    debug!("Validating configuration file: {:?}", path);

    let config_path = ConfigLoader::locate(path.as_deref(), None)?;

    match ConfigLoader::load_resolved(&config_path, preset_dirs) {
        Ok(resolved) => {
            print_warnings(&resolved.warnings);
            println!("✅ Configuration is valid: {}", config_path.display());
            ResolutionSummary::from_resolved(&resolved).print_human();
            Ok(())
        }
        Err(e) => {
            error!("❌ Configuration validation failed: {}", e);
            Err(e)
        }
    }
}

/// Config show command implementation
pub fn show_command(
    resolved: bool,
    format: ConfigFormat,
    config_path: Option<PathBuf>,
    preset_dirs: &[PathBuf],
) -> Result<()> {
    debug!("Showing configuration (resolved: {})", resolved);

    let config_path = ConfigLoader::locate(config_path.as_deref(), None)?;

    let output = if resolved {
        let resolved = ConfigLoader::load_resolved(&config_path, preset_dirs)?;
        print_warnings(&resolved.warnings);
        render(&resolved.effective, format)?
    } else {
        let parsed = ConfigLoader::load_from_file(&config_path)?;
        print_warnings(&parsed.warnings);
        render(&parsed.configuration, format)?
    };

    println!("{}", output.trim_end());
    Ok(())
}

/// Config schema command implementation
pub fn schema_command() -> Result<()> {
    let schema = serde_json::to_string_pretty(&config::schema())
        .map_err(|e| LintrcError::config_error(format!("Failed to serialize schema: {e}")))?;
    println!("{schema}");
    Ok(())
}

/// Create a minimal default configuration
fn create_minimal_config() -> Configuration {
    let mut config = Configuration::new()
        .with_env("es6")
        .with_parser_option("ecmaVersion", json!(2018))
        .with_parser_option("sourceType", json!("module"));
    config.root = Some(true);
    config
}

/// Create an example configuration with sample globals and rules
fn create_example_config() -> Configuration {
    create_minimal_config()
        .with_env("browser")
        .with_global("Atomics", GlobalAccess::Readonly)
        .with_global("SharedArrayBuffer", GlobalAccess::Readonly)
        .with_rule("no-unused-vars", Severity::Warn)
        .with_rule("eqeqeq", RuleSetting::with_options(Severity::Error, vec![json!("always")]))
        .with_rule("no-console", Severity::Off)
}
