//! The migration unit contract.
//!
//! A unit is one atomic, versioned schema transformation. Hundreds of them
//! share this trait; each implements only the hooks for the document kinds
//! it touches, and every default is a silent no-op. Units are registered
//! explicitly at startup, never discovered dynamically.
//!
//! Published units must be idempotent: applying one twice to a document
//! yields the same result as applying it once. Retried and partially
//! flushed runs rely on this.

use crate::cache::ReferenceCache;
use crate::core::Result;
use crate::document::Document;
use crate::settings::SettingsStore;
use async_trait::async_trait;

/// Shared per-run context handed to every hook.
pub struct MigrationContext<'a> {
    pub cache: &'a ReferenceCache,
}

#[async_trait]
pub trait MigrationUnit: Send + Sync {
    /// Unique, strictly increasing version of this unit within the registry.
    fn version(&self) -> u32;

    /// Whether the working set must be persisted before later units run.
    ///
    /// Set by units that make structural additions (new embedded items,
    /// restructured collections) that later units assume are fully formed,
    /// persisted documents.
    fn requires_flush(&self) -> bool {
        false
    }

    /// Whether this unit carries a world-level side effect.
    fn has_world_hook(&self) -> bool {
        false
    }

    /// Hooks are async only so they may await [`ReferenceCache::resolve`];
    /// they must not perform their own I/O.
    async fn update_actor(
        &self,
        _actor: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    /// `parent` is the owning actor for embedded items, `None` for
    /// standalone library items. Runs after `update_actor` for the same
    /// actor, so it may read actor state written by this same unit.
    async fn update_item(
        &self,
        _item: &mut Document,
        _parent: Option<&Document>,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    /// `actor` is the token's resolved owning actor when the runner knows it.
    async fn update_token(
        &self,
        _token: &mut Document,
        _actor: Option<&Document>,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    async fn update_macro(
        &self,
        _macro_doc: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    async fn update_message(
        &self,
        _message: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    async fn update_table(
        &self,
        _table: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    async fn update_user(
        &self,
        _user: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    async fn update_journal(
        &self,
        _journal: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    /// World-level side effect, invoked exactly once per run before any
    /// document hook of this unit. Only called when [`has_world_hook`]
    /// returns true; a failure here aborts the whole run.
    ///
    /// [`has_world_hook`]: MigrationUnit::has_world_hook
    async fn migrate_world(
        &self,
        _settings: &mut dyn SettingsStore,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        Ok(())
    }
}
