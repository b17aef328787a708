//! The ordered container backing model data, attribute data and views.
//!
//! Two merge policies exist as separate functions:
//! isolated writes overwrite on conflict, scope flattening keeps whatever the
//! nearer scope already placed in the accumulator.

use indexmap::IndexMap;

use super::Value;

/// Insertion-ordered mapping from string keys to [`Value`]s.
pub type Map = IndexMap<String, Value>;

/// Shallow merge where `other` wins every key conflict.
///
/// Colliding keys are replaced wholesale; nested maps are not descended into.
pub fn merge_overwrite(target: &mut Map, other: Map) {
    for (key, value) in other {
        target.insert(key, value);
    }
}

/// Shallow merge where keys already present in `target` are left untouched.
pub fn merge_keep_existing(target: &mut Map, other: &Map) {
    for (key, value) in other {
        if !target.contains_key(key) {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// Resolve `segments` structurally inside `map`.
///
/// The first segment is a key of `map`; later segments descend through nested
/// maps by key and through lists by numeric index.
pub fn resolve<'a, S: AsRef<str>>(map: &'a Map, segments: &[S]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let mut current = map.get(first.as_ref())?;
    for segment in rest {
        current = match current {
            Value::Map(inner) => inner.get(segment.as_ref())?,
            Value::List(items) => {
                let index: usize = segment.as_ref().parse().ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Mutable access to the map found by walking `segments` from `map`.
///
/// Every segment must land on a map (or a list element holding one); an empty
/// `segments` returns `map` itself.
pub fn container_mut<'a, S: AsRef<str>>(map: &'a mut Map, segments: &[S]) -> Option<&'a mut Map> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(map);
    };
    let mut current = map.get_mut(first.as_ref())?;
    for segment in rest {
        current = match current {
            Value::Map(inner) => inner.get_mut(segment.as_ref())?,
            Value::List(items) => {
                let index: usize = segment.as_ref().parse().ok()?;
                items.get_mut(index)?
            }
            _ => return None,
        };
    }
    match current {
        Value::Map(inner) => Some(inner),
        _ => None,
    }
}

/// Build a nested map mirroring `segments`, holding `leaf` at the innermost key.
///
/// `["a", "b", "c"]` with `leaf` yields `{a: {b: {c: leaf}}}`.
pub fn nest<S: AsRef<str>>(segments: &[S], leaf: Value) -> Map {
    let mut value = leaf;
    let mut map = Map::new();
    for (i, segment) in segments.iter().enumerate().rev() {
        if i == 0 {
            map.insert(segment.as_ref().to_string(), value);
            break;
        }
        let mut wrapper = Map::new();
        wrapper.insert(segment.as_ref().to_string(), value);
        value = Value::Map(wrapper);
    }
    map
}
