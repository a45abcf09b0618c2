//! Orchestrates a full migration pass.
//!
//! Units run strictly sequentially in ascending version order. Per unit:
//! the world hook first (exactly once, failure fatal), then every eligible
//! document through the walker with per-document failure isolation, then a
//! stop at the flush boundary if the unit demands one. Successful documents
//! are stamped incrementally as each unit completes for them.

use crate::cache::{ContentProvider, ReferenceCache};
use crate::core::{DocumentError, DocumentKind, MigrateError, Result};
use crate::document::Document;
use crate::registry::MigrationRegistry;
use crate::tracker::VersionTracker;
use crate::unit::{MigrationContext, MigrationUnit};
use crate::settings::SettingsStore;
use crate::walker::DocumentWalker;
use std::sync::Arc;
use tracing::{Instrument, Level, event, info_span};

/// Outcome of one migration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Highest unit version the pass completed.
    pub reached_version: u32,
    /// True when the pass stopped at a flush boundary; the caller must
    /// persist the working set and resume from `reached_version`.
    pub requires_followup_flush: bool,
    /// Isolated per-document failures. The run continues past these.
    pub per_document_errors: Vec<DocumentError>,
}

/// Drives a migration pass over a host-owned working set.
///
/// The host loads its documents, builds a registry (usually
/// [`crate::units::default_registry`]), and hands both to the runner
/// together with a content provider and a settings store.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use worldmigrate::{
///     ContentProvider, Document, DocumentKind, MemorySettings, MigrationRunner, Result, units,
/// };
///
/// struct NoContent;
///
/// #[async_trait::async_trait]
/// impl ContentProvider for NoContent {
///     async fn fetch_by_key(&self, _key: &str) -> Result<Option<Document>> {
///         Ok(None)
///     }
/// }
///
/// # fn main() -> Result<()> {
/// let registry = Arc::new(units::default_registry()?);
/// let runner = MigrationRunner::new(registry, Arc::new(NoContent));
///
/// let mut docs = vec![Document::new(DocumentKind::Actor, "Seelah").with_subtype("character")];
/// let mut settings = MemorySettings::new();
///
/// let result = tokio_test::block_on(runner.run(&mut docs, 0, &mut settings))?;
/// assert!(result.per_document_errors.is_empty());
/// # Ok(())
/// # }
/// ```
///
/// When `requires_followup_flush` is true the caller persists the working
/// set and calls [`MigrationRunner::run`] again from `reached_version`.
pub struct MigrationRunner {
    registry: Arc<MigrationRegistry>,
    provider: Arc<dyn ContentProvider>,
}

impl MigrationRunner {
    pub fn new(registry: Arc<MigrationRegistry>, provider: Arc<dyn ContentProvider>) -> Self {
        Self { registry, provider }
    }

    /// Apply every registered unit above `from_version` to `docs`.
    ///
    /// Documents already stamped at or above a unit's version are skipped
    /// for that unit. Mutations happen in place; persisting the revised
    /// working set is the caller's job.
    pub async fn run(
        &self,
        docs: &mut [Document],
        from_version: u32,
        settings: &mut dyn SettingsStore,
    ) -> Result<RunResult> {
        let span = info_span!("migration.run", from_version, documents = docs.len());
        self.run_inner(docs, from_version, settings)
            .instrument(span)
            .await
    }

    async fn run_inner(
        &self,
        docs: &mut [Document],
        from_version: u32,
        settings: &mut dyn SettingsStore,
    ) -> Result<RunResult> {
        let units = self.registry.units_above(from_version);
        // One cache per run; entries never outlive it.
        let cache = ReferenceCache::new(self.provider.clone());

        let mut errors: Vec<DocumentError> = Vec::new();
        let mut reached_version = from_version;
        let mut requires_followup_flush = false;

        for unit in &units {
            let version = unit.version();
            event!(Level::DEBUG, version, "applying migration unit");

            if unit.has_world_hook() {
                let ctx = MigrationContext { cache: &cache };
                if let Err(err) = unit.migrate_world(settings, &ctx).await {
                    event!(Level::ERROR, version, error = %err, "world hook failed, aborting run");
                    return Err(MigrateError::WorldHook {
                        version,
                        message: err.to_string(),
                    });
                }
            }

            // Tokens go last within the unit so their owning-actor context
            // reflects this unit's own actor changes.
            let mut token_indices = Vec::new();
            let mut touched = 0usize;
            for idx in 0..docs.len() {
                if VersionTracker::stamped_version(&docs[idx]) >= version {
                    continue;
                }
                if docs[idx].kind == DocumentKind::Token {
                    token_indices.push(idx);
                    continue;
                }
                let ctx = MigrationContext { cache: &cache };
                let outcome =
                    DocumentWalker::walk(&mut docs[idx], None, unit.as_ref(), &ctx).await;
                Self::settle(&mut docs[idx], version, outcome, &mut errors);
                touched += 1;
            }

            for idx in token_indices {
                let ctx = MigrationContext { cache: &cache };
                let actor_idx = docs[idx].actor_id.clone().and_then(|id| {
                    docs.iter()
                        .position(|d| d.kind == DocumentKind::Actor && d.id == id)
                });
                let outcome = match actor_idx {
                    Some(a_idx) if a_idx != idx => {
                        let (token, actor) = disjoint_pair(docs, idx, a_idx);
                        DocumentWalker::walk(token, Some(actor), unit.as_ref(), &ctx).await
                    }
                    _ => DocumentWalker::walk(&mut docs[idx], None, unit.as_ref(), &ctx).await,
                };
                Self::settle(&mut docs[idx], version, outcome, &mut errors);
                touched += 1;
            }

            reached_version = version;
            // A flush is only meaningful when the unit actually changed the
            // working set; skipping it keeps a re-run over an already
            // migrated world a single uninterrupted no-op pass.
            if unit.requires_flush() && touched > 0 {
                requires_followup_flush = true;
                event!(Level::INFO, version, "flush boundary reached, suspending run");
                break;
            }
        }

        event!(
            Level::INFO,
            reached_version,
            errors = errors.len(),
            "migration run complete"
        );
        Ok(RunResult {
            reached_version,
            requires_followup_flush,
            per_document_errors: errors,
        })
    }

    /// Stamp on success; record and log an isolated failure otherwise.
    /// A failed document keeps its prior stamp so a re-run retries it.
    fn settle(
        doc: &mut Document,
        version: u32,
        outcome: Result<()>,
        errors: &mut Vec<DocumentError>,
    ) {
        match outcome {
            Ok(()) => VersionTracker::stamp(doc, version),
            Err(err) => {
                event!(
                    Level::ERROR,
                    document_id = %doc.id,
                    document_name = %doc.name,
                    unit_version = version,
                    error = %err,
                    "document migration failed"
                );
                errors.push(DocumentError {
                    document_id: doc.id.clone(),
                    document_name: doc.name.clone(),
                    unit_version: version,
                    message: err.to_string(),
                });
            }
        }
    }
}

/// Borrow `docs[target]` mutably and `docs[other]` immutably at once.
/// Callers must guarantee the indices differ.
fn disjoint_pair(docs: &mut [Document], target: usize, other: usize) -> (&mut Document, &Document) {
    debug_assert_ne!(target, other);
    if target < other {
        let (left, right) = docs.split_at_mut(other);
        (&mut left[target], &right[0])
    } else {
        let (left, right) = docs.split_at_mut(target);
        (&mut right[0], &left[other])
    }
}
