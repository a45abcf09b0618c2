// ============================================================================
// worldmigrate Library
// ============================================================================
//
// Upgrades persisted game-world documents (actors, items, tokens, macros,
// chat messages, roll tables, users, journal entries) from whatever
// historical schema version they were saved under to the current schema,
// by applying an ordered sequence of small, independently-versioned
// migration units.
//
// Architecture:
// - `registry`  - ordered, versioned set of units; rejects broken orders
// - `walker`    - dispatches one unit over one document with scoped context
// - `runner`    - sequences units, isolates per-document failures, honors
//                 flush boundaries, produces a `RunResult`
// - `cache`     - memoized per-run resolution of compendium lookups
// - `tracker`   - per-document schema-version stamps
// - `units`     - the shipped transformation units themselves

pub mod cache;
pub mod core;
pub mod document;
pub mod registry;
pub mod runner;
pub mod settings;
pub mod tracker;
pub mod unit;
pub mod units;
pub mod walker;

// Re-export main types for convenience
pub use cache::{ContentProvider, ReferenceCache};
pub use crate::core::{DocumentError, DocumentKind, MigrateError, Result};
pub use document::{Document, DocumentPatch, FieldOp};
pub use registry::MigrationRegistry;
pub use runner::{MigrationRunner, RunResult};
pub use settings::{MemorySettings, SettingsStore};
pub use tracker::VersionTracker;
pub use unit::{MigrationContext, MigrationUnit};
pub use walker::DocumentWalker;

