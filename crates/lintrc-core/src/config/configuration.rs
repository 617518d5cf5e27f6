//! Configuration types for lintrc
//!
//! `Configuration` is the typed form of a single declarative document
//! (a config file or a preset). `EffectiveConfiguration` is the result of
//! resolving one against its presets and is what the linting engine
//! receives.

use indexmap::IndexMap;
use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::error::LintrcError;

/// A single declarative configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Marks the configuration as the root of a project
    #[schemars(description = "Stop looking for configuration in parent directories")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<bool>,

    /// Runtime environments the linted code assumes
    #[schemars(description = "Runtime environments, e.g. { \"browser\": true }")]
    #[serde(skip_serializing_if = "EnvironmentFlags::is_empty")]
    pub env: EnvironmentFlags,

    /// Global identifiers and whether they may be assigned
    #[schemars(description = "Global identifiers and their access")]
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub globals: IndexMap<String, GlobalAccess>,

    /// Presets to layer underneath this configuration, in order
    #[schemars(
        description = "Presets to extend; later entries win",
        schema_with = "extends_schema"
    )]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,

    /// Options passed through to the engine's parser
    #[schemars(description = "Parser feature flags")]
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub parser_options: IndexMap<String, Value>,

    /// Rule severities and options
    #[schemars(description = "Rule name to severity or [severity, ...options]")]
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub rules: IndexMap<String, RuleSetting>,

    /// Shared settings made available to every rule
    #[schemars(description = "Shared settings visible to all rules")]
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub settings: IndexMap<String, Value>,

    /// Engine plugins to load
    #[schemars(description = "Plugin names")]
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub plugins: BTreeSet<String>,
}

impl Configuration {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the presets this configuration extends
    pub fn with_extends<I, S>(mut self, presets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extends = presets.into_iter().map(Into::into).collect();
        self
    }

    /// Add an environment flag
    pub fn with_env(mut self, name: impl Into<String>) -> Self {
        self.env.insert(name);
        self
    }

    /// Declare a global identifier
    pub fn with_global(mut self, name: impl Into<String>, access: GlobalAccess) -> Self {
        self.globals.insert(name.into(), access);
        self
    }

    /// Set a parser option
    pub fn with_parser_option(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parser_options.insert(name.into(), value);
        self
    }

    /// Configure a rule
    pub fn with_rule(mut self, name: impl Into<String>, setting: impl Into<RuleSetting>) -> Self {
        self.rules.insert(name.into(), setting.into());
        self
    }

    /// Number of rules with a severity other than `off`
    pub fn enabled_rule_count(&self) -> usize {
        self.rules.values().filter(|r| r.is_enabled()).count()
    }
}

/// Set of environment names, serialized as `{ "name": true }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentFlags(BTreeSet<String>);

impl EnvironmentFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Add every flag from `other`
    pub fn union_with(&mut self, other: EnvironmentFlags) {
        self.0.extend(other.0);
    }
}

impl<S: Into<String>> FromIterator<S> for EnvironmentFlags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Serialize for EnvironmentFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for name in &self.0 {
            map.serialize_entry(name, &true)?;
        }
        map.end()
    }
}

impl JsonSchema for EnvironmentFlags {
    fn schema_name() -> Cow<'static, str> {
        "EnvironmentFlags".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "oneOf": [
                { "type": "object", "additionalProperties": { "type": "boolean" } },
                { "type": "array", "items": { "type": "string" }, "uniqueItems": true }
            ]
        })
    }
}

/// `extends` accepts a single name as well as a list
fn extends_schema(_generator: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "oneOf": [
            { "type": "string" },
            { "type": "array", "items": { "type": "string" } }
        ]
    })
}

/// Whether a global identifier may be reassigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalAccess {
    /// Read-only global (`false`, `"readonly"`, `"readable"`)
    Readonly,
    /// Assignable global (`true`, `"writable"`, `"writeable"`)
    Writable,
    /// Global is explicitly disabled
    Off,
}

impl GlobalAccess {
    /// Parse the string spellings the engine accepts
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "readonly" | "readable" => Some(Self::Readonly),
            "writable" | "writeable" => Some(Self::Writable),
            "off" => Some(Self::Off),
            _ => None,
        }
    }

    pub fn is_writable(self) -> bool {
        self == Self::Writable
    }
}

impl From<bool> for GlobalAccess {
    fn from(writable: bool) -> Self {
        if writable {
            Self::Writable
        } else {
            Self::Readonly
        }
    }
}

impl JsonSchema for GlobalAccess {
    fn schema_name() -> Cow<'static, str> {
        "GlobalAccess".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "oneOf": [
                { "type": "boolean" },
                { "enum": ["readonly", "readable", "writable", "writeable", "off"] }
            ]
        })
    }
}

/// Rule severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Disable the rule
    Off,
    /// Warning (doesn't fail the run)
    Warn,
    /// Error (fails the run)
    Error,
}

impl Severity {
    /// Parse `"off"`/`"warn"`/`"error"`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "off" => Some(Self::Off),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Parse the numeric form `0`/`1`/`2`
    pub fn from_level(level: u64) -> Option<Self> {
        match level {
            0 => Some(Self::Off),
            1 => Some(Self::Warn),
            2 => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule's severity plus any rule-specific options
///
/// Written either as a bare severity (`"warn"`, `1`) or as an array whose
/// first element is the severity (`["error", "always"]`).
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSetting {
    pub severity: Severity,
    pub options: Vec<Value>,
}

impl RuleSetting {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            options: Vec::new(),
        }
    }

    pub fn with_options(severity: Severity, options: Vec<Value>) -> Self {
        Self { severity, options }
    }

    pub fn is_enabled(&self) -> bool {
        self.severity != Severity::Off
    }
}

impl From<Severity> for RuleSetting {
    fn from(severity: Severity) -> Self {
        Self::new(severity)
    }
}

impl Serialize for RuleSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.options.is_empty() {
            return self.severity.serialize(serializer);
        }
        let mut seq = serializer.serialize_seq(Some(self.options.len() + 1))?;
        seq.serialize_element(&self.severity)?;
        for option in &self.options {
            seq.serialize_element(option)?;
        }
        seq.end()
    }
}

impl JsonSchema for RuleSetting {
    fn schema_name() -> Cow<'static, str> {
        "RuleSetting".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "oneOf": [
                { "enum": ["off", "warn", "error", 0, 1, 2] },
                {
                    "type": "array",
                    "minItems": 1,
                    "prefixItems": [{ "enum": ["off", "warn", "error", 0, 1, 2] }]
                }
            ]
        })
    }
}

/// A non-fatal problem found while reading a configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigWarning {
    /// Preset the warning came from, `None` for the top-level document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Dotted key path of the offending entry
    pub path: String,
    pub message: String,
}

impl ConfigWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: None,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Tag the warning with the preset it came from
    pub fn in_preset(mut self, preset: impl Into<String>) -> Self {
        self.source = Some(preset.into());
        self
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(preset) => write!(f, "{} (in preset '{}'): {}", self.path, preset, self.message),
            None => write!(f, "{}: {}", self.path, self.message),
        }
    }
}

/// A validated document together with the warnings it produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedConfiguration {
    pub configuration: Configuration,
    pub warnings: Vec<ConfigWarning>,
    /// File the document was read from, if any. Relative `extends` entries
    /// inside it are resolved against its directory.
    pub source_path: Option<PathBuf>,
}

impl ParsedConfiguration {
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }
}

impl From<Configuration> for ParsedConfiguration {
    fn from(configuration: Configuration) -> Self {
        Self {
            configuration,
            warnings: Vec::new(),
            source_path: None,
        }
    }
}

/// The fully merged configuration handed to the linting engine
///
/// Only constructed by the resolver. It never carries `extends` and offers
/// no way to mutate it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EffectiveConfiguration(Configuration);

impl EffectiveConfiguration {
    pub(crate) fn new(mut configuration: Configuration) -> Self {
        configuration.extends.clear();
        Self(configuration)
    }

    pub fn configuration(&self) -> &Configuration {
        &self.0
    }

    pub fn into_configuration(self) -> Configuration {
        self.0
    }

    pub fn root(&self) -> bool {
        self.0.root.unwrap_or(false)
    }

    pub fn env(&self) -> &EnvironmentFlags {
        &self.0.env
    }

    pub fn globals(&self) -> &IndexMap<String, GlobalAccess> {
        &self.0.globals
    }

    pub fn parser_options(&self) -> &IndexMap<String, Value> {
        &self.0.parser_options
    }

    pub fn rules(&self) -> &IndexMap<String, RuleSetting> {
        &self.0.rules
    }

    pub fn rule(&self, name: &str) -> Option<&RuleSetting> {
        self.0.rules.get(name)
    }

    pub fn settings(&self) -> &IndexMap<String, Value> {
        &self.0.settings
    }

    pub fn plugins(&self) -> &BTreeSet<String> {
        &self.0.plugins
    }

    /// Serialize to the JSON form the engine consumes
    pub fn to_json(&self) -> crate::result::Result<Value> {
        serde_json::to_value(&self.0).map_err(|e| {
            LintrcError::config_error(format!("Failed to serialize configuration: {e}"))
        })
    }
}
