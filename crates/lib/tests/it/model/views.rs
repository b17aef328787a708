//! Flattened views, JSON text and the JSON cache.

use scoped_model::{CacheStats, ContentModel, ModelConfig, Value};

use crate::helpers::*;

#[test]
fn test_flat_view_keeps_only_resolved_keys() {
    let model = model_with(serde_json::json!({"a": {"b": 1}, "n": 2, "nil": null}));
    let flat = model.to_flat_view(["a.b", "missing", "n", "nil"]);

    let keys: Vec<_> = flat.keys().map(String::as_str).collect();
    assert_eq!(keys, ["a.b", "n"]);
    assert_eq!(flat["a.b"], Value::Int(1));
}

#[test]
fn test_view_orders_nearer_keys_first() {
    let model = model_with(serde_json::json!({"root_only": 1, "shared": "root"}));
    model.extend_scope().unwrap();
    model.set("child_only", 2).unwrap();
    model.set("shared", "child").unwrap();

    let view = model.to_view();
    let keys: Vec<_> = view.keys().map(String::as_str).collect();
    assert_eq!(keys, ["child_only", "shared", "root_only"]);
    assert_eq!(view["shared"], "child");
}

#[test]
fn test_json_text_is_cached_until_mutation() {
    let model = model_with(serde_json::json!({"k": 1}));

    let first = model.to_json_text().unwrap();
    assert!(model.is_json_cached());
    let second = model.to_json_text().unwrap();
    assert_eq!(first, second);
    assert_eq!(first, r#"{"k":1}"#);
    assert_eq!(
        model.cache_stats(),
        CacheStats {
            hits: 1,
            misses: 1,
            invalidations: 0,
        }
    );

    model.set("k", 2).unwrap();
    assert!(!model.is_json_cached());
    assert_eq!(model.to_json_text().unwrap(), r#"{"k":2}"#);
    assert_eq!(model.cache_stats().misses, 2);
}

#[test]
fn test_scope_changes_invalidate_the_cache() {
    let model = ContentModel::new();

    model.to_json_text().unwrap();
    model.extend_scope().unwrap();
    assert!(!model.is_json_cached());

    model.to_json_text().unwrap();
    model.retract_scope();
    assert!(!model.is_json_cached());

    // Even a retract at the root drops the cached text
    model.to_json_text().unwrap();
    model.retract_scope();
    assert!(!model.is_json_cached());
    assert_eq!(model.cache_stats().invalidations, 3);
}

#[test]
fn test_every_locality_invalidates_the_cache() {
    let model = ContentModel::new();
    for locality in [
        scoped_model::Locality::Root,
        scoped_model::Locality::Closest,
        scoped_model::Locality::Isolated,
    ] {
        model.to_json_text().unwrap();
        model.set_with("path.leaf", 1, locality).unwrap();
        assert!(!model.is_json_cached(), "{locality:?} kept a stale cache");
    }
}

#[test]
fn test_pretty_json_config() {
    let config = ModelConfig {
        pretty_json: true,
        ..Default::default()
    };
    let model = ContentModel::with_config(config, map_of(serde_json::json!({"k": 1})));

    assert_eq!(model.to_json_text().unwrap(), "{\n  \"k\": 1\n}");
}

#[test]
fn test_display_renders_json_text() {
    let model = model_with(serde_json::json!({"name": "Arya", "tags": ["a", "b"]}));
    assert_eq!(model.to_string(), r#"{"name":"Arya","tags":["a","b"]}"#);
}
