//! Per-document schema-version stamps.
//!
//! The stamp lives in the document's own payload at `system.schema` as
//! `{ "version": n, "previous": m|null }`. A missing or malformed stamp
//! reads as version 0, so never-migrated documents are eligible for every
//! unit. Stamps never decrease; this is what makes re-running the full unit
//! list over an already-migrated world a true no-op, layered on top of each
//! unit's own idempotence.

use crate::document::Document;
use serde_json::{Value, json};

const STAMP_KEY: &str = "schema";

pub struct VersionTracker;

impl VersionTracker {
    /// The highest migration version already applied to `doc` (0 if none).
    pub fn stamped_version(doc: &Document) -> u32 {
        doc.system
            .get(STAMP_KEY)
            .and_then(|stamp| stamp.get("version"))
            .and_then(Value::as_u64)
            .map(|v| v as u32)
            .unwrap_or(0)
    }

    /// Record `version` on `doc`, keeping the prior version in `previous`.
    /// Stamps are non-decreasing; a lower or equal version is ignored.
    pub fn stamp(doc: &mut Document, version: u32) {
        let current = Self::stamped_version(doc);
        if version <= current {
            return;
        }
        let previous = if current == 0 {
            Value::Null
        } else {
            json!(current)
        };
        doc.system.insert(
            STAMP_KEY.to_string(),
            json!({ "version": version, "previous": previous }),
        );
    }
}
