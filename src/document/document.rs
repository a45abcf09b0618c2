//! The in-memory document model the engine migrates.
//!
//! Documents arrive from the host as plain structured data: an identifier,
//! a schema-governed `system` payload, a namespaced `flags` block, and (for
//! actors) an ordered collection of embedded items. Shapes inside `system`
//! are whatever historical schema the document was saved under; units narrow
//! them defensively before mutating.

use crate::core::DocumentKind;
use crate::document::patch::{self, DocumentPatch};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub kind: DocumentKind,
    /// Host-defined subtype, e.g. "character"/"npc" for actors or
    /// "weapon"/"consumable" for items.
    #[serde(rename = "type", default)]
    pub subtype: String,
    #[serde(default)]
    pub system: Map<String, Value>,
    #[serde(default)]
    pub flags: Map<String, Value>,
    /// Embedded items, Actor roots only. Order is meaningful.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Document>,
    /// Owning actor reference, Token roots only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
}

impl Document {
    /// Create an empty document with a generated identifier.
    pub fn new(kind: DocumentKind, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind,
            subtype: String::new(),
            system: Map::new(),
            flags: Map::new(),
            items: Vec::new(),
            actor_id: None,
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = subtype.into();
        self
    }

    pub fn with_system(mut self, system: Value) -> Self {
        if let Value::Object(map) = system {
            self.system = map;
        }
        self
    }

    pub fn with_flags(mut self, flags: Value) -> Self {
        if let Value::Object(map) = flags {
            self.flags = map;
        }
        self
    }

    pub fn with_actor_id(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = Some(actor_id.into());
        self
    }

    /// Read a dotted path inside the `system` payload.
    pub fn system_value(&self, path: &str) -> Option<&Value> {
        patch::path_get(&self.system, path)
    }

    pub fn system_value_mut(&mut self, path: &str) -> Option<&mut Value> {
        patch::path_get_mut(&mut self.system, path)
    }

    /// Read a dotted path inside the `flags` block.
    pub fn flag_value(&self, path: &str) -> Option<&Value> {
        patch::path_get(&self.flags, path)
    }

    /// Apply a sparse patch to the `system` payload.
    pub fn patch_system(&mut self, patch: &DocumentPatch) {
        patch.apply(&mut self.system);
    }

    /// Apply a sparse patch to the `flags` block.
    pub fn patch_flags(&mut self, patch: &DocumentPatch) {
        patch.apply(&mut self.flags);
    }
}
