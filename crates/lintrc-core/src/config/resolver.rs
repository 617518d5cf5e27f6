//! Preset resolution
//!
//! Expands `extends` recursively and merges every layer into a single
//! [`EffectiveConfiguration`]. Presets are applied in listed order, each
//! one after its own `extends`, and the document being resolved is laid
//! on top last.

use super::configuration::*;
use super::preset::PresetRegistry;
use crate::error::LintrcError;
use crate::result::Result;
use indexmap::IndexSet;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default limit on nested `extends`
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Output of a successful resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfiguration {
    /// The merged configuration handed to the linting engine
    pub effective: EffectiveConfiguration,
    /// Non-fatal problems from the document and all presets
    pub warnings: Vec<ConfigWarning>,
    /// Presets in the order they were first applied, nested ones first.
    /// A preset reached more than once is listed once.
    pub presets: Vec<String>,
}

/// Resolves configurations against a preset registry
#[derive(Debug, Clone)]
pub struct ConfigResolver<R> {
    registry: R,
    max_depth: usize,
}

/// Identity of a preset within one resolution
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PresetId {
    /// Read from this (canonical) file
    File(PathBuf),
    /// Provided without a file, named from this directory
    Named(String, Option<PathBuf>),
}

impl PresetId {
    fn of(name: &str, from: Option<&Path>, source_path: Option<&Path>) -> Self {
        match source_path {
            Some(path) => {
                PresetId::File(fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
            }
            None => PresetId::Named(name.to_string(), from.map(Path::to_path_buf)),
        }
    }
}

/// A preset with its own `extends` already merged in
struct ExpandedPreset {
    configuration: Configuration,
    /// Presets it applies, nested ones first and itself last
    applied: Vec<String>,
}

#[derive(Default)]
struct ResolutionState {
    warnings: Vec<ConfigWarning>,
    applied: IndexSet<String>,
    /// Presets currently being expanded, outermost first
    chain: Vec<(String, PresetId)>,
    /// `extends` entries already looked up, keyed by name and requesting directory
    references: HashMap<(String, Option<PathBuf>), PresetId>,
    /// Every preset expanded so far in this resolution
    expanded: HashMap<PresetId, ExpandedPreset>,
}

impl ResolutionState {
    fn chain_names(&self) -> Vec<&str> {
        self.chain.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl<R: PresetRegistry> ConfigResolver<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deeply presets may extend other presets
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Resolve a typed configuration
    pub fn resolve(&self, configuration: &Configuration) -> Result<ResolvedConfiguration> {
        self.resolve_parsed(ParsedConfiguration::from(configuration.clone()))
    }

    /// Resolve a parsed document, keeping the warnings it already carries
    ///
    /// When the document has a source path, its relative `extends` entries
    /// are looked up from that file's directory.
    pub fn resolve_parsed(&self, parsed: ParsedConfiguration) -> Result<ResolvedConfiguration> {
        let mut state = ResolutionState {
            warnings: parsed.warnings,
            ..Default::default()
        };

        let from = parsed.source_path.as_deref().and_then(Path::parent);
        let merged = self.expand(parsed.configuration, from, &mut state)?;

        Ok(ResolvedConfiguration {
            effective: EffectiveConfiguration::new(merged),
            warnings: state.warnings,
            presets: state.applied.into_iter().collect(),
        })
    }

    fn expand(
        &self,
        configuration: Configuration,
        from: Option<&Path>,
        state: &mut ResolutionState,
    ) -> Result<Configuration> {
        let mut merged = Configuration::default();

        for name in &configuration.extends {
            let reference = (name.clone(), from.map(Path::to_path_buf));
            let id = match state.references.get(&reference).cloned() {
                Some(id) => id,
                None => {
                    let id = self.expand_preset(name, from, state)?;
                    state.references.insert(reference, id.clone());
                    id
                }
            };

            if let Some(preset) = state.expanded.get(&id) {
                debug!("Applying preset '{}'", name);
                merged.overlay(preset.configuration.clone());
                state.applied.extend(preset.applied.iter().cloned());
            }
        }

        merged.overlay(configuration);
        Ok(merged)
    }

    /// Look up and expand one preset, leaving it in `state.expanded`
    fn expand_preset(
        &self,
        name: &str,
        from: Option<&Path>,
        state: &mut ResolutionState,
    ) -> Result<PresetId> {
        if state.chain.len() >= self.max_depth {
            return Err(LintrcError::resolution_error(
                name,
                format!("extends nested deeper than {} levels", self.max_depth),
            ));
        }

        let preset = self
            .registry
            .lookup(name, from)?
            .ok_or_else(|| not_found(name, &state.chain_names()))?;
        let id = PresetId::of(name, from, preset.source_path.as_deref());

        if state.chain.iter().any(|(_, active)| *active == id) {
            let mut cycle = state.chain_names();
            cycle.push(name);
            return Err(LintrcError::resolution_error(
                name,
                format!("circular extends: {}", cycle.join(" -> ")),
            ));
        }
        if state.expanded.contains_key(&id) {
            return Ok(id);
        }

        state.warnings.extend(preset.warnings.into_iter().map(|w| {
            if w.source.is_none() {
                w.in_preset(name)
            } else {
                w
            }
        }));

        // A preset read from a file resolves its own relative entries
        let nested_from = match preset.source_path.as_deref() {
            Some(path) => path.parent().map(Path::to_path_buf),
            None => from.map(Path::to_path_buf),
        };

        let applied_before = state.applied.len();
        state.chain.push((name.to_string(), id.clone()));
        let configuration = self.expand(preset.configuration, nested_from.as_deref(), state)?;
        state.chain.pop();

        let mut applied: Vec<String> =
            state.applied.split_off(applied_before).into_iter().collect();
        applied.push(name.to_string());
        state.expanded.insert(
            id.clone(),
            ExpandedPreset {
                configuration,
                applied,
            },
        );
        Ok(id)
    }
}

fn not_found(name: &str, chain: &[&str]) -> LintrcError {
    if chain.is_empty() {
        LintrcError::resolution_error(name, "preset not found")
    } else {
        LintrcError::resolution_error(
            name,
            format!("preset not found (extended from {})", chain.join(" -> ")),
        )
    }
}

/// Resolve `configuration` against `registry` with default settings
pub fn resolve<R: PresetRegistry>(
    configuration: &Configuration,
    registry: R,
) -> Result<ResolvedConfiguration> {
    ConfigResolver::new(registry).resolve(configuration)
}
