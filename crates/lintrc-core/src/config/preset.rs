//! Preset registries
//!
//! A preset is a named, partial configuration that other configurations
//! pull in through `extends`. Where presets come from is up to the
//! registry: tests and embedders use [`InMemoryPresets`], the CLI uses
//! [`FilePresets`].

use super::configuration::{Configuration, ParsedConfiguration};
use super::loader::{CONFIG_EXTENSIONS, ConfigLoader};
use crate::result::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Source of named presets
pub trait PresetRegistry {
    /// Look up a preset by name
    ///
    /// `from` is the directory of the file whose `extends` names the
    /// preset, when that document came from a file. Registries that map
    /// names to paths resolve relative names against it.
    ///
    /// Returns `Ok(None)` when no preset has that name. Errors are reserved
    /// for presets that exist but cannot be read.
    fn lookup(&self, name: &str, from: Option<&Path>) -> Result<Option<ParsedConfiguration>>;
}

impl<R: PresetRegistry + ?Sized> PresetRegistry for &R {
    fn lookup(&self, name: &str, from: Option<&Path>) -> Result<Option<ParsedConfiguration>> {
        (**self).lookup(name, from)
    }
}

impl<R: PresetRegistry + ?Sized> PresetRegistry for Box<R> {
    fn lookup(&self, name: &str, from: Option<&Path>) -> Result<Option<ParsedConfiguration>> {
        (**self).lookup(name, from)
    }
}

/// Registry backed by a map of already-typed presets
#[derive(Debug, Clone, Default)]
pub struct InMemoryPresets {
    presets: HashMap<String, Configuration>,
}

impl InMemoryPresets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a preset, replacing any previous one with the same name
    pub fn insert(&mut self, name: impl Into<String>, preset: Configuration) {
        self.presets.insert(name.into(), preset);
    }

    /// Builder form of [`InMemoryPresets::insert`]
    pub fn with_preset(mut self, name: impl Into<String>, preset: Configuration) -> Self {
        self.insert(name, preset);
        self
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl PresetRegistry for InMemoryPresets {
    fn lookup(&self, name: &str, _from: Option<&Path>) -> Result<Option<ParsedConfiguration>> {
        Ok(self.presets.get(name).cloned().map(ParsedConfiguration::from))
    }
}

/// Registry that reads presets from configuration files
///
/// A name that looks like a path (`./base.json`, `../shared/strict.yaml`,
/// an absolute path, or anything ending in a config extension) is resolved
/// against the directory of the file that extends it, falling back to the
/// base directory. Any other name is looked up as `<dir>/<name>.<ext>` in
/// each search directory, in order.
#[derive(Debug, Clone)]
pub struct FilePresets {
    base_dir: PathBuf,
    search_dirs: Vec<PathBuf>,
}

impl FilePresets {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            search_dirs: Vec::new(),
        }
    }

    /// Add a directory searched for bare preset names
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    pub fn with_search_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Files that could hold the preset, in lookup order
    pub fn candidate_paths(&self, name: &str, from: Option<&Path>) -> Vec<PathBuf> {
        if is_path_like(name) {
            let path = Path::new(name);
            if path.is_absolute() {
                return vec![path.to_path_buf()];
            }
            return vec![from.unwrap_or(&self.base_dir).join(path)];
        }

        self.search_dirs
            .iter()
            .flat_map(|dir| {
                CONFIG_EXTENSIONS
                    .iter()
                    .map(move |ext| dir.join(format!("{name}.{ext}")))
            })
            .collect()
    }
}

impl PresetRegistry for FilePresets {
    fn lookup(&self, name: &str, from: Option<&Path>) -> Result<Option<ParsedConfiguration>> {
        for path in self.candidate_paths(name, from) {
            if path.is_file() {
                tracing::debug!("Preset '{}' found at {}", name, path.display());
                return ConfigLoader::load_from_file(&path).map(Some);
            }
        }
        Ok(None)
    }
}

fn is_path_like(name: &str) -> bool {
    if name.starts_with("./") || name.starts_with("../") || Path::new(name).is_absolute() {
        return true;
    }
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONFIG_EXTENSIONS.contains(&ext))
}
