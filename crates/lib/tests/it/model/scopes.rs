//! Scope lifecycle: extension, retraction, guards and contexts.

use scoped_model::{ContentModel, Value};

use crate::helpers::*;

#[test]
fn test_extend_and_retract_move_the_cursor() {
    let model = ContentModel::new();
    let root = model.root_scope();
    assert_eq!(model.current_scope(), root);
    assert_eq!(model.depth(), 0);

    let child = model.extend_scope().unwrap();
    let grandchild = model.extend_scope().unwrap();
    assert_eq!(model.current_scope(), grandchild);
    assert_eq!(model.depth(), 2);

    assert!(model.retract_scope());
    assert_eq!(model.current_scope(), child);
    assert!(model.retract_scope());
    assert_eq!(model.current_scope(), root);
}

#[test]
fn test_retract_at_root_is_a_no_op() {
    let model = model_with(serde_json::json!({"k": 1}));
    assert!(!model.retract_scope());
    assert!(!model.retract_scope());

    assert_eq!(model.current_scope(), model.root_scope());
    assert_view(&model, serde_json::json!({"k": 1}));
}

#[test]
fn test_scope_handles_are_not_reused() {
    let model = ContentModel::new();
    let first = model.extend_scope().unwrap();
    model.retract_scope();
    let second = model.extend_scope().unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_nearer_scope_shadows_parent() {
    let model = model_with(serde_json::json!({"k": "A", "other": 1}));
    model.extend_scope().unwrap();
    model.set("k", "B").unwrap();

    assert_text(&model, "k", "B");
    assert_view(&model, serde_json::json!({"k": "B", "other": 1}));

    model.retract_scope();
    assert_text(&model, "k", "A");
}

#[test]
fn test_guard_retracts_on_drop() {
    let model = ContentModel::new();
    {
        let scope = model.scope().unwrap();
        assert_eq!(model.current_scope(), scope.id());
        scope.set("temp", 1).unwrap();
        assert!(model.has("temp"));
    }
    assert_eq!(model.depth(), 0);
    assert!(!model.has("temp"));
}

#[test]
fn test_guard_leaves_unrelated_scopes_alone() {
    let model = ContentModel::new();
    let guard = model.scope().unwrap();
    model.retract_scope();
    let replacement = model.extend_scope().unwrap();

    drop(guard);
    assert_eq!(model.current_scope(), replacement);
    assert_eq!(model.depth(), 1);
}

#[test]
fn test_context_exposes_the_current_chain() {
    let model = model_with(serde_json::json!({"title": "root"}));
    let child = model.extend_scope().unwrap();
    model.set("item", "child").unwrap();

    let (id, title, item, parent_item) = model
        .with_context(|ctx| {
            let parent = ctx.parent().expect("child has a parent");
            (
                ctx.id(),
                ctx.get("title").cloned(),
                ctx.model().get("item").cloned(),
                parent.get("item").cloned(),
            )
        })
        .unwrap();

    assert_eq!(id, child);
    assert_eq!(title.unwrap(), "root");
    assert_eq!(item.unwrap(), "child");
    assert_eq!(parent_item, None);

    let root_is_root = model.with_root_context(|ctx| ctx.is_root()).unwrap();
    assert!(root_is_root);
}

#[test]
fn test_null_in_nearer_scope_does_not_hide_parent() {
    let model = model_with(serde_json::json!({"k": "A"}));
    model.extend_scope().unwrap();
    model.set_isolated("k", Value::Null).unwrap();

    assert_eq!(model.get("k"), Some(Value::from("A")));
    assert!(model.has("k"));
    assert_eq!(model.get_as_string("k"), "A");
}
