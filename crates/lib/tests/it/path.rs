//! Path segmentation as seen through the model.

use scoped_model::{ContentModel, ModelPath};

use crate::helpers::*;

#[test]
fn dot_and_slash_paths_address_the_same_value() {
    let model = ContentModel::new();
    model.set("site/nav/home", "/").unwrap();

    assert_text(&model, "site.nav.home", "/");
    assert_text(&model, "site/nav.home", "/");
}

#[test]
fn delimiter_free_paths_are_literal_keys() {
    let model = model_with(serde_json::json!({"a-b:c": 1}));
    assert!(model.has("a-b:c"));
}

#[test]
fn repeated_delimiters_collapse() {
    let model = ContentModel::new();
    model.set("a..b//c", 1).unwrap();
    assert_view(&model, serde_json::json!({"a": {"b": {"c": 1}}}));
}

#[test]
fn empty_paths_are_rejected_explicitly() {
    let model = ContentModel::new();

    for path in ["", ".", "./", "//"] {
        let err = model.set(path, 1).unwrap_err();
        assert!(err.is_invalid_path(), "{path:?} should be invalid");
        assert!(model.try_get(path).unwrap_err().is_invalid_path());
        assert_eq!(model.get(path), None);
        assert!(!model.has(path));
    }
    assert!(model.to_view().is_empty());
}

#[test]
fn parsed_path_parts() {
    let path: ModelPath = "lists.GoT.Starks.killed".parse().unwrap();
    assert_eq!(path.len(), 4);
    assert_eq!(path.leaf(), "killed");
    assert_eq!(path.ancestors(), ["lists", "GoT", "Starks"]);
}
