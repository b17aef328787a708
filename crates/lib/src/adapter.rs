//! Adapting foreign objects into model data.
//!
//! Anything the model cannot store natively is first serialized through
//! `serde` and must come out as a JSON object; the resulting fields become a
//! [`Map`]. Serialization failures and non-object results are reported as
//! [`ValueError`]s and propagate to the caller unchanged.

use serde::Serialize;

use crate::value::{Map, Value, ValueError, map_from_json};

/// Convert a serializable object into a model [`Map`].
///
/// # Errors
/// Returns [`ValueError::Conversion`] if serialization fails and
/// [`ValueError::NotAnObject`] if the object does not serialize to a map.
///
/// # Examples
///
/// ```
/// # use scoped_model::adapter::adapt;
/// #[derive(serde::Serialize)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// let map = adapt(&User { name: "Bran".into(), age: 10 })?;
/// assert_eq!(map["name"], "Bran");
/// assert_eq!(map["age"], 10);
/// # Ok::<(), scoped_model::value::ValueError>(())
/// ```
pub fn adapt<T>(object: &T) -> Result<Map, ValueError>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_value(object).map_err(|e| ValueError::Conversion {
        reason: e.to_string(),
    })?;

    match json {
        serde_json::Value::Object(object) => Ok(map_from_json(object)),
        other => Err(ValueError::NotAnObject {
            kind: Value::from(other).kind().to_string(),
        }),
    }
}
