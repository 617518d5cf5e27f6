//! Configuration merging logic
//!
//! Resolution builds the effective configuration by laying documents on
//! top of each other. The layer applied last wins for map entries and
//! scalars; sets are unioned.

use super::configuration::*;
use indexmap::IndexMap;

impl Configuration {
    /// Lay `layer` on top of this configuration (layer takes precedence)
    ///
    /// - `globals`, `parserOptions`, `rules` and `settings` are merged
    ///   shallowly: an entry in `layer` replaces the whole entry here
    /// - `env` and `plugins` are unioned
    /// - `root` is replaced when `layer` sets it
    /// - `extends` is not merged (it is consumed by resolution)
    pub fn overlay(&mut self, layer: Configuration) {
        if layer.root.is_some() {
            self.root = layer.root;
        }

        self.env.union_with(layer.env);
        self.plugins.extend(layer.plugins);

        Self::overlay_map(&mut self.globals, layer.globals);
        Self::overlay_map(&mut self.parser_options, layer.parser_options);
        Self::overlay_map(&mut self.rules, layer.rules);
        Self::overlay_map(&mut self.settings, layer.settings);
    }

    /// Replace entries of `target` with those from `source`
    ///
    /// Keys already present keep their position; new keys are appended.
    fn overlay_map<V>(target: &mut IndexMap<String, V>, source: IndexMap<String, V>) {
        for (key, value) in source {
            target.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_overlay_rules_layer_wins() {
        let mut base = Configuration::new()
            .with_rule("no-unused-vars", Severity::Warn)
            .with_rule("eqeqeq", Severity::Error);

        let layer = Configuration::new().with_rule("no-unused-vars", Severity::Error);

        base.overlay(layer);

        assert_eq!(base.rules["no-unused-vars"].severity, Severity::Error);
        assert_eq!(base.rules["eqeqeq"].severity, Severity::Error);
        assert_eq!(base.rules.len(), 2);
    }

    #[test]
    fn test_overlay_rule_replaces_options() {
        let mut base = Configuration::new().with_rule(
            "quotes",
            RuleSetting::with_options(Severity::Error, vec![json!("double")]),
        );

        base.overlay(Configuration::new().with_rule("quotes", Severity::Warn));

        // Shallow merge: the base options do not survive
        assert_eq!(base.rules["quotes"], RuleSetting::new(Severity::Warn));
    }

    #[test]
    fn test_overlay_parser_options_is_shallow() {
        let mut base = Configuration::new()
            .with_parser_option("ecmaVersion", json!(2015))
            .with_parser_option("ecmaFeatures", json!({ "jsx": true, "globalReturn": true }));

        let layer = Configuration::new()
            .with_parser_option("ecmaFeatures", json!({ "jsx": false }))
            .with_parser_option("sourceType", json!("module"));

        base.overlay(layer);

        assert_eq!(base.parser_options["ecmaVersion"], json!(2015));
        assert_eq!(base.parser_options["ecmaFeatures"], json!({ "jsx": false }));
        assert_eq!(base.parser_options["sourceType"], json!("module"));
    }

    #[test]
    fn test_overlay_env_union() {
        let mut base = Configuration::new().with_env("browser");
        base.overlay(Configuration::new().with_env("node").with_env("browser"));

        assert_eq!(base.env.len(), 2);
        assert!(base.env.contains("browser"));
        assert!(base.env.contains("node"));
    }

    #[test]
    fn test_overlay_globals_and_root() {
        let mut base = Configuration::new().with_global("window", GlobalAccess::Readonly);
        base.root = Some(true);

        let layer = Configuration::new().with_global("window", GlobalAccess::Off);
        base.overlay(layer);

        assert_eq!(base.globals["window"], GlobalAccess::Off);
        // Unset root in the layer leaves the base value alone
        assert_eq!(base.root, Some(true));
    }

    #[test]
    fn test_overlay_keeps_key_order() {
        let mut base = Configuration::new()
            .with_rule("a", Severity::Warn)
            .with_rule("b", Severity::Warn);
        base.overlay(
            Configuration::new()
                .with_rule("c", Severity::Error)
                .with_rule("a", Severity::Error),
        );

        let names: Vec<&str> = base.rules.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_overlay_does_not_touch_extends() {
        let mut base = Configuration::new();
        base.overlay(Configuration::new().with_extends(["other"]));
        assert!(base.extends.is_empty());
    }
}
