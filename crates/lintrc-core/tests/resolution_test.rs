//! Integration tests for preset resolution
//!
//! These tests drive the resolver through the public API, both with
//! in-memory presets and with preset files on disk.

use lintrc_core::config::{ConfigLoader, FilePresets, resolve};
use lintrc_core::{
    ConfigResolver, Configuration, ErrorKind, GlobalAccess, InMemoryPresets, LintrcError,
    RuleSetting, Severity,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn parse(value: serde_json::Value) -> Configuration {
    Configuration::from_value(&value)
        .expect("document should be valid")
        .configuration
}

#[test]
fn test_standard_preset_example() {
    let presets = InMemoryPresets::new().with_preset(
        "standard",
        parse(json!({ "rules": { "no-unused-vars": "warn", "eqeqeq": "error" } })),
    );
    let config = parse(json!({
        "extends": ["standard"],
        "rules": { "no-unused-vars": "error" }
    }));

    let resolved = resolve(&config, &presets).unwrap();

    assert_eq!(
        resolved.effective.to_json().unwrap(),
        json!({ "rules": { "no-unused-vars": "error", "eqeqeq": "error" } })
    );
}

#[test]
fn test_rule_in_both_presets_resolves_to_last() {
    let presets = InMemoryPresets::new()
        .with_preset("a", parse(json!({ "rules": { "curly": "warn" } })))
        .with_preset("b", parse(json!({ "rules": { "curly": ["error", "multi"] } })));

    let resolved = resolve(&parse(json!({ "extends": ["a", "b"] })), &presets).unwrap();
    assert_eq!(
        resolved.effective.rule("curly"),
        Some(&RuleSetting::with_options(Severity::Error, vec![json!("multi")]))
    );

    let resolved = resolve(
        &parse(json!({ "extends": ["a", "b"], "rules": { "curly": "off" } })),
        &presets,
    )
    .unwrap();
    assert_eq!(resolved.effective.rule("curly"), Some(&RuleSetting::new(Severity::Off)));
}

#[test]
fn test_empty_extends_returns_input() {
    let config = parse(json!({
        "root": true,
        "env": { "browser": true, "es6": true },
        "globals": { "Atomics": "readonly", "SharedArrayBuffer": "readonly" },
        "extends": [],
        "parserOptions": { "ecmaVersion": 2018, "sourceType": "module" },
        "rules": { "indent": ["error", 4], "quotes": ["error", "single"] }
    }));

    let resolved = resolve(&config, InMemoryPresets::new()).unwrap();
    assert_eq!(resolved.effective.configuration(), &config);
    assert!(resolved.warnings.is_empty());
}

#[test]
fn test_missing_preset_never_returns_partial_result() {
    let presets = InMemoryPresets::new()
        .with_preset("known", parse(json!({ "rules": { "semi": "error" } })));

    for extends in [vec!["missing"], vec!["known", "missing"], vec!["missing", "known"]] {
        let config = Configuration::new().with_extends(extends);
        let err = resolve(&config, &presets).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
        assert!(matches!(
            err,
            LintrcError::ResolutionError { ref preset, .. } if preset == "missing"
        ));
    }
}

#[test]
fn test_env_union_properties() {
    let presets = InMemoryPresets::new()
        .with_preset("a", parse(json!({ "env": { "browser": true, "es6": true } })))
        .with_preset("b", parse(json!({ "env": ["node"] })));

    let a = resolve(&Configuration::new().with_extends(["a"]), &presets).unwrap();
    let aa = resolve(&Configuration::new().with_extends(["a", "a"]), &presets).unwrap();
    assert_eq!(a.effective.env(), aa.effective.env());

    let ab = resolve(&Configuration::new().with_extends(["a", "b"]), &presets).unwrap();
    let ba = resolve(&Configuration::new().with_extends(["b", "a"]), &presets).unwrap();
    assert_eq!(ab.effective.env(), ba.effective.env());
    assert_eq!(
        ab.effective.env().iter().collect::<Vec<_>>(),
        vec!["browser", "es6", "node"]
    );
}

#[test]
fn test_globals_and_parser_options_layering() {
    let presets = InMemoryPresets::new().with_preset(
        "base",
        parse(json!({
            "globals": { "window": "readonly", "process": false },
            "parserOptions": { "ecmaVersion": 2015, "sourceType": "script" },
            "settings": { "react": { "version": "16" } },
            "plugins": ["import"]
        })),
    );
    let config = parse(json!({
        "extends": "base",
        "globals": { "process": "writable" },
        "parserOptions": { "sourceType": "module" },
        "plugins": ["react"]
    }));

    let resolved = resolve(&config, &presets).unwrap();
    let effective = &resolved.effective;

    assert_eq!(effective.globals()["window"], GlobalAccess::Readonly);
    assert_eq!(effective.globals()["process"], GlobalAccess::Writable);
    assert_eq!(effective.parser_options()["ecmaVersion"], json!(2015));
    assert_eq!(effective.parser_options()["sourceType"], json!("module"));
    assert_eq!(effective.settings()["react"], json!({ "version": "16" }));
    assert_eq!(effective.plugins().len(), 2);
}

#[test]
fn test_file_presets_nested_across_formats() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write(
        root,
        "presets/recommended.yaml",
        "env:\n  es6: true\nrules:\n  no-undef: error\n  no-console: warn\n",
    );
    write(
        root,
        "presets/strict.toml",
        "extends = \"recommended\"\n\n[rules]\nno-console = \"error\"\n",
    );
    let config_path = write(
        root,
        "app/.lintrc.json",
        r#"{
            "extends": ["strict", "./local.json"],
            "env": { "node": true }
        }"#,
    );
    write(root, "app/local.json", r#"{ "rules": { "no-undef": "off" } }"#);

    let resolved =
        ConfigLoader::load_resolved(&config_path, &[root.join("presets")]).unwrap();

    assert_eq!(resolved.presets, vec!["recommended", "strict", "./local.json"]);
    let effective = resolved.effective;
    assert_eq!(effective.rule("no-console").unwrap().severity, Severity::Error);
    assert_eq!(effective.rule("no-undef").unwrap().severity, Severity::Off);
    assert!(effective.env().contains("es6"));
    assert!(effective.env().contains("node"));
}

#[test]
fn test_preset_file_validation_error_propagates() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "bad.json", r#"{ "rules": { "semi": true } }"#);

    let config = Configuration::new().with_extends(["./bad.json"]);
    let err = ConfigResolver::new(FilePresets::new(temp_dir.path()))
        .resolve(&config)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(matches!(
        err,
        LintrcError::ValidationError { ref path, .. } if path == "rules.semi"
    ));
}

#[test]
fn test_warnings_collected_from_document_and_presets() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "legacy.json",
        r#"{ "ecmaFeatures": { "jsx": true }, "rules": {} }"#,
    );
    let config_path = write(
        temp_dir.path(),
        ".lintrc.json",
        r#"{ "extends": "./legacy.json", "overrides": [] }"#,
    );

    let resolved = ConfigLoader::load_resolved(&config_path, &[]).unwrap();
    let warnings: Vec<String> = resolved.warnings.iter().map(ToString::to_string).collect();

    assert_eq!(
        warnings,
        vec![
            "overrides: unrecognized key ignored".to_string(),
            "ecmaFeatures (in preset './legacy.json'): unrecognized key ignored".to_string(),
        ]
    );
}

#[test]
fn test_circular_file_presets() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "a.json", r#"{ "extends": "./b.json" }"#);
    write(temp_dir.path(), "b.json", r#"{ "extends": "./a.json" }"#);
    let config_path = write(temp_dir.path(), ".lintrc.json", r#"{ "extends": "./a.json" }"#);

    let err = ConfigLoader::load_resolved(&config_path, &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resolution);
    assert!(err.to_string().contains("circular"));
}

#[test]
fn test_circular_file_presets_across_directories() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "a.json", r#"{ "extends": "./shared/b.json" }"#);
    write(temp_dir.path(), "shared/b.json", r#"{ "extends": "../a.json" }"#);
    let config_path = write(temp_dir.path(), ".lintrc.json", r#"{ "extends": "./a.json" }"#);

    let err = ConfigLoader::load_resolved(&config_path, &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resolution);
    assert!(
        err.to_string()
            .contains("./a.json -> ./shared/b.json -> ../a.json")
    );
}

#[test]
fn test_nested_relative_preset_resolves_next_to_its_parent() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write(root, "shared/base.json", r#"{ "extends": "./common.json" }"#);
    write(root, "shared/common.json", r#"{ "rules": { "semi": "error" } }"#);
    let config_path = write(root, ".lintrc.json", r#"{ "extends": "./shared/base.json" }"#);

    let resolved = ConfigLoader::load_resolved(&config_path, &[]).unwrap();
    assert_eq!(resolved.presets, vec!["./common.json", "./shared/base.json"]);
    assert_eq!(resolved.effective.rule("semi").unwrap().severity, Severity::Error);

    // A same-named file next to the top-level config is not picked up
    write(root, "common.json", r#"{ "rules": { "semi": "off" } }"#);
    let resolved = ConfigLoader::load_resolved(&config_path, &[]).unwrap();
    assert_eq!(resolved.effective.rule("semi").unwrap().severity, Severity::Error);
}

#[test]
fn test_same_relative_name_from_different_directories() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write(root, "common.json", r#"{ "rules": { "quotes": "warn" } }"#);
    write(root, "shared/base.json", r#"{ "extends": "./common.json" }"#);
    write(root, "shared/common.json", r#"{ "rules": { "semi": "error" } }"#);
    let config_path = write(
        root,
        ".lintrc.json",
        r#"{ "extends": ["./common.json", "./shared/base.json"] }"#,
    );

    let resolved = ConfigLoader::load_resolved(&config_path, &[]).unwrap();
    assert_eq!(resolved.effective.rule("quotes").unwrap().severity, Severity::Warn);
    assert_eq!(resolved.effective.rule("semi").unwrap().severity, Severity::Error);
}
