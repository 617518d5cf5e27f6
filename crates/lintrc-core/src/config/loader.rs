//! Configuration file discovery and loading

use super::configuration::{Configuration, ParsedConfiguration};
use super::preset::FilePresets;
use super::resolver::{ConfigResolver, ResolvedConfiguration};
use crate::error::LintrcError;
use crate::result::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names searched by [`ConfigLoader::auto_discover`], in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".lintrc.json",
    ".lintrc.jsonc",
    ".lintrc.yaml",
    ".lintrc.yml",
    ".lintrc.toml",
];

/// Extensions tried when looking a preset up by bare name
pub const CONFIG_EXTENSIONS: &[&str] = &["json", "jsonc", "yaml", "yml", "toml"];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover config file by traversing upward from start_path
    ///
    /// Checks each directory for the names in [`CONFIG_FILE_NAMES`] and
    /// returns the first match, moving up until the filesystem root.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| LintrcError::io_error(start_path, e))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Read a file into a raw document
    ///
    /// The format follows the extension: `.yaml`/`.yml` as YAML, `.toml` as
    /// TOML, anything else as JSON with comments and trailing commas.
    pub fn load_document(path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).map_err(|e| LintrcError::io_error(path, e))?;

        // An empty file is a valid, empty configuration
        if content.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let value = match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_str::<Value>(&content)
                .map_err(|e| LintrcError::parse_error(path, e.to_string()))?,
            "toml" => toml::from_str::<Value>(&content)
                .map_err(|e| LintrcError::parse_error(path, e.to_string()))?,
            _ => json5::from_str::<Value>(&content)
                .map_err(|e| LintrcError::parse_error(path, e.to_string()))?,
        };

        Ok(value)
    }

    /// Load and validate a configuration file without resolving `extends`
    pub fn load_from_file(path: &Path) -> Result<ParsedConfiguration> {
        let document = Self::load_document(path)?;
        let parsed = Configuration::from_value(&document)?.with_source_path(path);
        tracing::info!("Loaded config from: {}", path.display());
        Ok(parsed)
    }

    /// Load a configuration file and resolve its presets
    ///
    /// Relative preset paths are resolved against the directory of the file
    /// that names them, so a preset may extend its own neighbours. Bare
    /// preset names are searched for in `preset_dirs`.
    pub fn load_resolved(path: &Path, preset_dirs: &[PathBuf]) -> Result<ResolvedConfiguration> {
        let parsed = Self::load_from_file(path)?;
        let base_dir = path.parent().ok_or_else(|| {
            LintrcError::config_error(format!(
                "Cannot determine parent directory of '{}'",
                path.display()
            ))
        })?;

        let registry = FilePresets::new(base_dir).with_search_dirs(preset_dirs.iter().cloned());
        ConfigResolver::new(registry).resolve_parsed(parsed)
    }

    /// Find the config file to use
    ///
    /// An explicit path must exist. Otherwise the search starts from
    /// `start_dir` (or the current directory).
    pub fn locate(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(LintrcError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok(path.to_path_buf());
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        Self::auto_discover(search_dir)?.ok_or_else(|| {
            LintrcError::config_error(format!(
                "No config file found ({}). Run 'lintrc config init' to create one.",
                CONFIG_FILE_NAMES.join(", ")
            ))
        })
    }

    /// Load config from path or auto-discover, then resolve its presets
    pub fn load(
        custom_path: Option<&Path>,
        start_dir: Option<&Path>,
        preset_dirs: &[PathBuf],
    ) -> Result<ResolvedConfiguration> {
        let config_path = Self::locate(custom_path, start_dir)?;
        Self::load_resolved(&config_path, preset_dirs)
    }
}
