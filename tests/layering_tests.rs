//! Integration tests for tier-ordered configuration layering.
//!
//! Mirrors a typical setup: built-in defaults, a project file, a user file
//! and command-line overrides, each already parsed into a node.

use config_node::{ConfigNode, ConfigTier, LayeredConfig, Value};

fn yaml(text: &str) -> ConfigNode {
    serde_yaml::from_str(text).expect("fixture should be valid YAML")
}

/// Helper to build the four-tier stack used by most tests.
fn standard_stack() -> LayeredConfig {
    let defaults = yaml(
        r#"
server:
  host: 127.0.0.1
  port: 8080
  workers: 4
log:
  level: info
plugins:
  0: core
"#,
    );
    let project = yaml(
        r#"
server:
  port: 3000
plugins:
  0: project-lint
"#,
    );
    let user = yaml(
        r#"
log:
  level: debug
  file: /tmp/app.log
"#,
    );
    let cli = yaml("server:\n  workers: 16\n");

    LayeredConfig::new()
        .with_layer(ConfigTier::Override, "--set", cli)
        .with_layer(ConfigTier::User, "~/.app/config.yaml", user)
        .with_layer(ConfigTier::Project, "app/config.yaml", project)
        .with_layer(ConfigTier::Defaults, "builtin", defaults)
}

#[test]
fn resolve_applies_tiers_in_order() {
    let effective = standard_stack().resolve();

    assert_eq!(
        effective.lookup(["server", "host"]).and_then(Value::as_str),
        Some("127.0.0.1")
    );
    assert_eq!(effective.lookup(["server", "port"]).and_then(Value::as_i64), Some(3000));
    assert_eq!(effective.lookup(["server", "workers"]).and_then(Value::as_i64), Some(16));
    assert_eq!(
        effective.lookup(["log", "level"]).and_then(Value::as_str),
        Some("debug")
    );
}

#[test]
fn plugin_lists_accumulate_across_tiers() {
    let effective = standard_stack().resolve();
    let plugins = effective.node("plugins").expect("plugins node");

    let names: Vec<&str> = plugins.values().filter_map(Value::as_str).collect();
    assert_eq!(names, ["core", "project-lint"]);
}

#[test]
fn origin_reports_winning_layer() {
    let stack = standard_stack();

    let origin = stack.origin_of(["server", "workers"]).expect("workers is defined");
    assert_eq!(origin.tier, ConfigTier::Override);

    let origin = stack.origin_of(["server", "host"]).expect("host is defined");
    assert_eq!(origin.name, "builtin");

    let origin = stack.origin_of(["log", "file"]).expect("file is defined");
    assert_eq!(origin.tier, ConfigTier::User);
}

#[test]
fn same_tier_layers_keep_push_order() {
    let mut stack = LayeredConfig::new();
    stack
        .push(ConfigTier::Project, "first.yaml", yaml("mode: first\n"))
        .push(ConfigTier::Project, "second.yaml", yaml("mode: second\n"));

    assert_eq!(stack.get(["mode"]), Some(Value::from("second")));
    assert_eq!(stack.len(), 2);
}

#[test]
fn resolved_tree_round_trips_through_yaml() {
    let effective = standard_stack().resolve();
    let text = serde_yaml::to_string(&effective).expect("serialize");
    let reparsed = yaml(&text);

    assert_eq!(reparsed.to_json(), effective.to_json());
}

#[test]
fn origin_is_none_when_scalar_replaces_section() {
    let stack = LayeredConfig::new()
        .with_layer(ConfigTier::Defaults, "builtin", yaml("cache:\n  ttl: 60\n"))
        .with_layer(ConfigTier::User, "~/.app/config.yaml", yaml("cache: off\n"));

    assert!(stack.resolve().lookup(["cache", "ttl"]).is_none());
    assert!(stack.origin_of(["cache", "ttl"]).is_none());
    assert_eq!(stack.origin_of(["cache"]).map(|layer| layer.tier), Some(ConfigTier::User));
}
