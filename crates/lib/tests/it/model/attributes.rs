//! The attribute side channel.

use scoped_model::{ContentModel, ModelConfig, Value};

use crate::helpers::*;

#[test]
fn test_attributes_stay_out_of_views() {
    let model = ContentModel::new();
    model.set("visible", 1).unwrap();
    model.set_attribute("secret", "token").unwrap();

    assert_eq!(model.get_attribute("secret"), Some(Value::from("token")));
    assert_view(&model, serde_json::json!({"visible": 1}));
    assert!(!model.to_json_text().unwrap().contains("token"));
    assert!(model.to_flat_view(["secret"]).is_empty());
}

#[test]
fn test_attributes_are_not_plain_lookups() {
    let model = ContentModel::new();
    model.set_attribute("secret", "token").unwrap();

    assert_eq!(model.get("secret"), None);
    assert_text(&model, "@secret", "token");
    assert!(model.has("@secret"));
}

#[test]
fn test_attribute_prefix_navigates_into_map_attributes() {
    let model = ContentModel::new();
    model
        .set_attribute("request", Value::from(serde_json::json!({"locale": "en"})))
        .unwrap();

    assert_text(&model, "@request.locale", "en");
    assert!(!model.has("@request.missing"));
    assert!(model.try_get("@").unwrap_err().is_invalid_path());
}

#[test]
fn test_attribute_prefix_can_be_disabled() {
    let config = ModelConfig {
        attribute_prefix: false,
        ..Default::default()
    };
    let model = ContentModel::with_config(config, map_of(serde_json::json!({"@handle": "literal"})));
    model.set_attribute("handle", "attr").unwrap();

    assert_text(&model, "@handle", "literal");
    assert_eq!(model.get_attribute("handle"), Some(Value::from("attr")));
}

#[test]
fn test_attributes_belong_to_their_scope() {
    let model = ContentModel::new();
    model.set_attribute("outer", 1).unwrap();

    model.extend_scope().unwrap();
    assert_eq!(model.get_attribute("outer"), None);
    model.set_attribute("inner", 2).unwrap();
    assert_eq!(model.get_attribute("inner"), Some(Value::Int(2)));

    model.retract_scope();
    assert_eq!(model.get_attribute("inner"), None);
    assert_eq!(model.get_attribute("outer"), Some(Value::Int(1)));
}
