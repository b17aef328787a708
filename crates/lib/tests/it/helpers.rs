use scoped_model::{ContentModel, Map, Value};

// ==========================
// CORE TEST FACTORIES
// ==========================

/// Creates a model whose root scope holds the given JSON object.
///
/// # Panics
/// Panics if `json` is not an object.
pub fn model_with(json: serde_json::Value) -> ContentModel {
    ContentModel::from_json(json).expect("test data must be a JSON object")
}

/// Builds a model map from a JSON object literal.
pub fn map_of(json: serde_json::Value) -> Map {
    match Value::from(json) {
        Value::Map(map) => map,
        other => panic!("expected a JSON object, got {other:?}"),
    }
}

// ==========================
// ASSERTION HELPERS
// ==========================

/// Asserts the flattened view of `model` equals `expected`.
pub fn assert_view(model: &ContentModel, expected: serde_json::Value) {
    assert_eq!(model.to_json_value(), expected, "unexpected view");
}

/// Asserts `path` resolves to a text value equal to `expected`.
pub fn assert_text(model: &ContentModel, path: &str, expected: &str) {
    match model.get(path) {
        Some(Value::Text(actual)) => {
            assert_eq!(actual, expected, "Value mismatch for path '{path}'")
        }
        Some(other) => panic!("Expected text value for path '{path}', got: {other:?}"),
        None => panic!("Path '{path}' not found in model"),
    }
}
