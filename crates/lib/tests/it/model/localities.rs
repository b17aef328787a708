//! Placement policies: Root, Closest (ancestor probing) and Isolated.

use scoped_model::{ContentModel, Locality, ModelConfig, Value};

use crate::helpers::*;

#[test]
fn test_root_writes_are_visible_from_child_scopes() {
    let model = ContentModel::new();
    model.set_with("x", "1", Locality::Root).unwrap();
    model.extend_scope().unwrap();

    assert_text(&model, "x", "1");
}

#[test]
fn test_root_writes_from_a_child_survive_retraction() {
    let model = ContentModel::new();
    model.extend_scope().unwrap();
    model.set_with("site.title", "Winterfell", Locality::Root).unwrap();
    model.retract_scope();

    assert_text(&model, "site.title", "Winterfell");
}

#[test]
fn test_closest_writes_vanish_with_their_scope() {
    let model = ContentModel::new();
    model.extend_scope().unwrap();
    model.set("user.name", "Bran").unwrap();
    assert_text(&model, "user.name", "Bran");
    model.retract_scope();

    assert_eq!(model.get("user.name"), None);
    assert!(model.to_view().is_empty());
}

#[test]
fn test_closest_write_descends_into_ancestor_map() {
    // Probing finds `a` in the root and writes through it, so the new key
    // lands in the root's map and outlives the child scope.
    let model = ContentModel::new();
    model.set("a.b", 1).unwrap();
    model.extend_scope().unwrap();
    model.set("a.c", 2).unwrap();

    assert_view(&model, serde_json::json!({"a": {"b": 1, "c": 2}}));
    model.retract_scope();
    assert_view(&model, serde_json::json!({"a": {"b": 1, "c": 2}}));
}

#[test]
fn test_non_map_ancestor_is_replaced_locally() {
    let model = model_with(serde_json::json!({"a": "scalar"}));
    model.extend_scope().unwrap();
    model.set("a.b", "x").unwrap();

    assert_text(&model, "a.b", "x");
    model.retract_scope();
    assert_text(&model, "a", "scalar");
}

#[test]
fn test_root_write_descends_into_nearer_scope_map() {
    // The root locality only picks where probing starts; an existing map found
    // through the scope chain is still reused.
    let model = ContentModel::new();
    model.extend_scope().unwrap();
    model.set_isolated("cfg.mode", "child").unwrap();
    model.set_with("cfg.level", 3, Locality::Root).unwrap();

    assert_view(&model, serde_json::json!({"cfg": {"mode": "child", "level": 3}}));
    model.retract_scope();
    assert!(!model.has("cfg"));
}

#[test]
fn test_root_write_of_fresh_path_from_child() {
    let model = ContentModel::new();
    model.extend_scope().unwrap();
    model.set_with("g.h", 1, Locality::Root).unwrap();
    model.retract_scope();

    assert_view(&model, serde_json::json!({"g": {"h": 1}}));
}

#[test]
fn test_isolated_write_never_mutates_ancestors() {
    let model = model_with(serde_json::json!({"a": {"b": 1}, "keep": true}));
    let parent_view = model.to_view();

    model.extend_scope().unwrap();
    model.set_with("a.c", 2, Locality::Isolated).unwrap();
    assert_view(&model, serde_json::json!({"a": {"c": 2}, "keep": true}));
    // Lookups still fall back to the root's `a.b`
    assert!(model.has("a.b"));

    model.retract_scope();
    assert_eq!(model.to_view(), parent_view);
}

#[test]
fn test_isolated_write_overwrites_collisions_and_keeps_siblings() {
    let model = model_with(serde_json::json!({"a": {"z": 1}, "q": 2}));
    model.set_isolated("a.b", "x").unwrap();

    assert_view(&model, serde_json::json!({"a": {"b": "x"}, "q": 2}));
}

#[test]
fn test_isolated_write_builds_full_nesting() {
    let model = ContentModel::new();
    model.set_isolated("one.two.three", 3).unwrap();

    assert_view(&model, serde_json::json!({"one": {"two": {"three": 3}}}));
}

#[test]
fn test_configured_default_locality() {
    let config = ModelConfig {
        default_locality: Locality::Isolated,
        ..Default::default()
    };
    let model = ContentModel::with_config(config, map_of(serde_json::json!({"a": {"b": 1}})));

    model.extend_scope().unwrap();
    model.set("a.c", 2).unwrap();
    model.retract_scope();

    assert_view(&model, serde_json::json!({"a": {"b": 1}}));
}

#[test]
fn test_probing_reaches_maps_inside_lists() {
    // `rows` is a list, so the root gets a fresh map for it; `rows.0` then
    // resolves to the child's list element, which receives the leaf.
    let model = ContentModel::new();
    model.extend_scope().unwrap();
    model
        .set_isolated("rows", Value::from(serde_json::json!([{"id": 1}])))
        .unwrap();
    model.set_with("rows.0.label", "first", Locality::Root).unwrap();

    assert_view(&model, serde_json::json!({"rows": [{"id": 1, "label": "first"}]}));
    model.retract_scope();
    assert_view(&model, serde_json::json!({"rows": {}}));
}

#[test]
fn test_probing_looks_past_nearer_nulls() {
    let model = model_with(serde_json::json!({"a": {"b": 1}}));
    model.extend_scope().unwrap();
    model.set_isolated("a", Value::Null).unwrap();

    model.set("a.c", 2).unwrap();
    model.retract_scope();

    assert_view(&model, serde_json::json!({"a": {"b": 1, "c": 2}}));
}
