use ferrous_wiring::{ResolverOptions, DEFAULT_MAX_DEPTH};
use serial_test::serial;
use std::env;

fn clear(prefix: &str) {
    env::remove_var(format!("{}_MAX_DEPTH", prefix));
    env::remove_var(format!("{}_STRICT_STRATEGIES", prefix));
}

#[test]
fn test_defaults() {
    let options = ResolverOptions::default();
    assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    assert!(!options.strict_strategies);
}

#[test]
fn test_builder_setters() {
    let options = ResolverOptions::default().max_depth(8).strict_strategies(true);
    assert_eq!(options, ResolverOptions { max_depth: 8, strict_strategies: true });
}

#[test]
#[serial]
fn test_from_env_reads_prefixed_variables() {
    clear("WIRING");
    env::set_var("WIRING_MAX_DEPTH", "96");
    env::set_var("WIRING_STRICT_STRATEGIES", "true");

    let options = ResolverOptions::from_env("wiring");
    assert_eq!(options.max_depth, 96);
    assert!(options.strict_strategies);

    clear("WIRING");
}

#[test]
#[serial]
fn test_from_env_ignores_unparseable_values() {
    clear("WIRING");
    env::set_var("WIRING_MAX_DEPTH", "lots");
    env::set_var("WIRING_STRICT_STRATEGIES", " false ");

    let options = ResolverOptions::from_env("WIRING");
    assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    assert!(!options.strict_strategies);

    clear("WIRING");
}

#[test]
#[serial]
fn test_from_env_without_variables_is_default() {
    clear("WIRING");
    assert_eq!(ResolverOptions::from_env("WIRING"), ResolverOptions::default());
}

#[cfg(feature = "config")]
#[test]
fn test_from_json_fills_missing_fields_with_defaults() {
    let options = ResolverOptions::from_json(r#"{ "strict_strategies": true }"#).unwrap();
    assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    assert!(options.strict_strategies);

    assert!(ResolverOptions::from_json("{ not json").is_err());
}
