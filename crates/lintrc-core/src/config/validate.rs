//! Conversion of raw documents into typed configurations
//!
//! Documents arrive as `serde_json::Value` regardless of their file format.
//! Recognized keys are checked field by field so a failure can name the
//! exact key path. Unknown top-level keys are kept as warnings.

use super::configuration::*;
use crate::error::LintrcError;
use crate::result::Result;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Top-level keys understood by the resolver
pub const RECOGNIZED_KEYS: &[&str] = &[
    "$schema",
    "root",
    "env",
    "globals",
    "extends",
    "parserOptions",
    "rules",
    "settings",
    "plugins",
];

impl Configuration {
    /// Validate a raw document and build a typed configuration
    pub fn from_value(value: &Value) -> Result<ParsedConfiguration> {
        let object = value.as_object().ok_or_else(|| {
            LintrcError::validation_error(
                "<root>",
                format!("expected an object, found {}", type_name(value)),
            )
        })?;

        let mut configuration = Configuration::default();
        let mut warnings = Vec::new();

        for (key, value) in object {
            match key.as_str() {
                "$schema" => {}
                "root" => configuration.root = Some(expect_bool(key, value)?),
                "env" => configuration.env = parse_env(value, &mut warnings)?,
                "globals" => configuration.globals = parse_globals(value)?,
                "extends" => configuration.extends = parse_extends(value)?,
                "parserOptions" => configuration.parser_options = parse_object(key, value)?,
                "rules" => configuration.rules = parse_rules(value)?,
                "settings" => configuration.settings = parse_object(key, value)?,
                "plugins" => configuration.plugins = parse_plugins(value)?,
                _ => {
                    tracing::debug!("Ignoring unrecognized key '{}'", key);
                    warnings.push(ConfigWarning::new(key.as_str(), "unrecognized key ignored"));
                }
            }
        }

        Ok(ParsedConfiguration {
            configuration,
            warnings,
            source_path: None,
        })
    }

    /// Parse and validate a JSON or JSONC string
    ///
    /// Syntax errors are reported as [`LintrcError::ParseError`] against
    /// the pseudo path `<input>`.
    pub fn from_json_str(content: &str) -> Result<ParsedConfiguration> {
        let value: Value = json5::from_str(content)
            .map_err(|e| LintrcError::parse_error("<input>", e.to_string()))?;
        Self::from_value(&value)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn expect_bool(path: &str, value: &Value) -> Result<bool> {
    value.as_bool().ok_or_else(|| {
        LintrcError::validation_error(path, format!("expected a boolean, found {}", type_name(value)))
    })
}

fn expect_object<'a>(path: &str, value: &'a Value) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        LintrcError::validation_error(path, format!("expected an object, found {}", type_name(value)))
    })
}

fn expect_string(path: &str, value: &Value) -> Result<String> {
    value.as_str().map(str::to_string).ok_or_else(|| {
        LintrcError::validation_error(path, format!("expected a string, found {}", type_name(value)))
    })
}

fn parse_object(path: &str, value: &Value) -> Result<IndexMap<String, Value>> {
    Ok(expect_object(path, value)?
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect())
}

/// `env` accepts `{ "node": true }` or `["node"]`
fn parse_env(value: &Value, warnings: &mut Vec<ConfigWarning>) -> Result<EnvironmentFlags> {
    let mut flags = EnvironmentFlags::new();
    match value {
        Value::Object(map) => {
            for (name, enabled) in map {
                let path = format!("env.{name}");
                if expect_bool(&path, enabled)? {
                    flags.insert(name.as_str());
                } else {
                    // Environment sets are only ever unioned, a false entry cannot remove one
                    warnings.push(ConfigWarning::new(
                        path,
                        "disabled environments are ignored",
                    ));
                }
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flags.insert(expect_string(&format!("env[{index}]"), item)?);
            }
        }
        other => {
            return Err(LintrcError::validation_error(
                "env",
                format!("expected an object or an array, found {}", type_name(other)),
            ));
        }
    }
    Ok(flags)
}

fn parse_globals(value: &Value) -> Result<IndexMap<String, GlobalAccess>> {
    let mut globals = IndexMap::new();
    for (name, access) in expect_object("globals", value)? {
        let path = format!("globals.{name}");
        let access = match access {
            Value::Bool(writable) => GlobalAccess::from(*writable),
            Value::String(s) => GlobalAccess::from_name(s).ok_or_else(|| {
                LintrcError::validation_error(
                    &path,
                    format!("unknown access '{s}', expected readonly, writable or off"),
                )
            })?,
            other => {
                return Err(LintrcError::validation_error(
                    path,
                    format!("expected a boolean or a string, found {}", type_name(other)),
                ));
            }
        };
        globals.insert(name.clone(), access);
    }
    Ok(globals)
}

/// `extends` accepts a single name or a list of names
fn parse_extends(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::String(name) => Ok(vec![name.clone()]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| expect_string(&format!("extends[{index}]"), item))
            .collect(),
        other => Err(LintrcError::validation_error(
            "extends",
            format!("expected a string or an array, found {}", type_name(other)),
        )),
    }
}

fn parse_plugins(value: &Value) -> Result<BTreeSet<String>> {
    let items = value.as_array().ok_or_else(|| {
        LintrcError::validation_error(
            "plugins",
            format!("expected an array, found {}", type_name(value)),
        )
    })?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| expect_string(&format!("plugins[{index}]"), item))
        .collect()
}

fn parse_rules(value: &Value) -> Result<IndexMap<String, RuleSetting>> {
    let mut rules = IndexMap::new();
    for (name, setting) in expect_object("rules", value)? {
        let setting = parse_rule_setting(&format!("rules.{name}"), setting)?;
        rules.insert(name.clone(), setting);
    }
    Ok(rules)
}

/// A rule value is a severity or `[severity, ...options]`
pub fn parse_rule_setting(path: &str, value: &Value) -> Result<RuleSetting> {
    match value {
        Value::Array(items) => {
            let (first, options) = items.split_first().ok_or_else(|| {
                LintrcError::validation_error(path, "rule tuple must start with a severity")
            })?;
            let severity = parse_severity(path, first)?;
            Ok(RuleSetting::with_options(severity, options.to_vec()))
        }
        Value::String(_) | Value::Number(_) => Ok(RuleSetting::new(parse_severity(path, value)?)),
        other => Err(LintrcError::validation_error(
            path,
            format!(
                "expected a severity or [severity, ...options], found {}",
                type_name(other)
            ),
        )),
    }
}

fn parse_severity(path: &str, value: &Value) -> Result<Severity> {
    let severity = match value {
        Value::String(name) => Severity::from_name(name),
        Value::Number(level) => level.as_u64().and_then(Severity::from_level),
        _ => None,
    };
    severity.ok_or_else(|| {
        LintrcError::validation_error(
            path,
            format!("invalid severity {value}, expected \"off\", \"warn\", \"error\", 0, 1 or 2"),
        )
    })
}
