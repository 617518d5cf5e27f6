//! Configuration system for lintrc
//!
//! This module loads declarative linter configuration and resolves it into
//! the effective configuration a linting engine consumes:
//! - JSON/JSONC, YAML and TOML configuration files
//! - Auto-discovery by traversing up directories
//! - Preset layering through the `extends` field
//! - Field validation with key paths, and warnings for unknown keys
//! - JSON Schema generation via schemars
//!
//! ## Configuration Files
//!
//! Discovery looks for `.lintrc.json`, `.lintrc.jsonc`, `.lintrc.yaml`,
//! `.lintrc.yml` and `.lintrc.toml`, in that order, starting from the
//! current directory and moving up the directory tree.
//!
//! ## Presets
//!
//! `extends` lists presets to layer underneath the document. Each entry is
//! looked up through a [`PresetRegistry`]; later entries win over earlier
//! ones and the document's own keys win over every preset:
//!
//! ```jsonc
//! {
//!   "extends": ["standard", "./team.json"],
//!   "env": { "browser": true },
//!   "globals": { "Atomics": "readonly" },
//!   "parserOptions": { "ecmaVersion": 2018, "sourceType": "module" },
//!   "rules": {
//!     "no-unused-vars": "error",
//!     "indent": ["error", 2]
//!   }
//! }
//! ```
//!
//! Object-valued keys (`globals`, `parserOptions`, `rules`, `settings`) are
//! merged one entry at a time. Set-valued keys (`env`, `plugins`) are unioned.

mod configuration;
mod loader;
mod merge;
mod preset;
mod resolver;
mod validate;

pub use configuration::{
    ConfigWarning, Configuration, EffectiveConfiguration, EnvironmentFlags, GlobalAccess,
    ParsedConfiguration, RuleSetting, Severity,
};
pub use loader::{CONFIG_EXTENSIONS, CONFIG_FILE_NAMES, ConfigLoader};
pub use preset::{FilePresets, InMemoryPresets, PresetRegistry};
pub use resolver::{ConfigResolver, DEFAULT_MAX_DEPTH, ResolvedConfiguration, resolve};
pub use validate::{RECOGNIZED_KEYS, parse_rule_setting};

use schemars::generate::SchemaSettings;

/// JSON Schema describing the configuration file format
///
/// Generated for the serialized form, so only keys a document actually
/// sets are required (none are). `$schema` is accepted in documents but
/// never part of a `Configuration`, so it is added by hand.
pub fn schema() -> serde_json::Value {
    let mut schema = SchemaSettings::draft2020_12()
        .for_serialize()
        .into_generator()
        .into_root_schema_for::<Configuration>()
        .to_value();

    if let Some(properties) = schema
        .get_mut("properties")
        .and_then(serde_json::Value::as_object_mut)
    {
        properties.insert(
            "$schema".to_string(),
            serde_json::json!({
                "type": "string",
                "description": "URI of the schema the document follows"
            }),
        );
    }
    schema
}
