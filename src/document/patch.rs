//! Sparse updates over nested payload maps.
//!
//! Legacy exports encoded field removal with sentinel key prefixes inside a
//! partial update. Here removal is a first-class operation: a patch is an
//! ordered list of `{Set, Delete}` operations addressed by dotted paths, so
//! one field can be dropped without disturbing its siblings.

use serde_json::{Map, Value};

/// A single patch operation on one dotted path.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    Set(Value),
    Delete,
}

/// An ordered list of sparse operations applied to a payload map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    ops: Vec<(String, FieldOp)>,
}

impl DocumentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a value write at `path`, creating intermediate objects as needed.
    pub fn set(mut self, path: impl Into<String>, value: Value) -> Self {
        self.ops.push((path.into(), FieldOp::Set(value)));
        self
    }

    /// Queue removal of the field at `path`. Missing paths are a no-op.
    pub fn delete(mut self, path: impl Into<String>) -> Self {
        self.ops.push((path.into(), FieldOp::Delete));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Apply every operation in order against `target`.
    pub fn apply(&self, target: &mut Map<String, Value>) {
        for (path, op) in &self.ops {
            match op {
                FieldOp::Set(value) => path_set(target, path, value.clone()),
                FieldOp::Delete => path_delete(target, path),
            }
        }
    }
}

/// Read the value at a dotted `path`, if the whole chain exists.
pub fn path_get<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = map.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Mutable access to the value at a dotted `path`.
pub fn path_get_mut<'a>(map: &'a mut Map<String, Value>, path: &str) -> Option<&'a mut Value> {
    let mut parts = path.split('.');
    let mut current = map.get_mut(parts.next()?)?;
    for part in parts {
        current = current.as_object_mut()?.get_mut(part)?;
    }
    Some(current)
}

/// Write `value` at `path`. Intermediate segments that are missing or hold
/// non-object values are replaced with fresh objects.
pub fn path_set(map: &mut Map<String, Value>, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((leaf, parents)) = segments.split_last() else {
        return;
    };
    let mut current = map;
    for part in parents {
        let slot = current
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            unreachable!("slot was just made an object");
        };
        current = next;
    }
    current.insert(leaf.to_string(), value);
}

/// Remove the field at `path`, leaving siblings untouched.
pub fn path_delete(map: &mut Map<String, Value>, path: &str) {
    let Some((parent_path, leaf)) = path.rsplit_once('.') else {
        map.remove(path);
        return;
    };
    if let Some(parent) = path_get_mut(map, parent_path).and_then(Value::as_object_mut) {
        parent.remove(leaf);
    }
}
