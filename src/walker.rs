//! Dispatches one migration unit over one root document.
//!
//! The walker picks the hook matching the document kind, scopes parent
//! context for embedded items and tokens, and treats a missing hook as a
//! silent no-op. For actors the actor hook completes fully before any item
//! hook of the same unit runs, a documented dependency: item-level logic is
//! permitted to read actor state just written by the same unit.

use crate::core::{DocumentKind, Result};
use crate::document::Document;
use crate::unit::{MigrationContext, MigrationUnit};

pub struct DocumentWalker;

impl DocumentWalker {
    /// Apply `unit` to `doc`, with `actor_ctx` carrying the resolved owning
    /// actor for Token roots. A hook error propagates to the caller, which
    /// isolates it per document.
    pub async fn walk(
        doc: &mut Document,
        actor_ctx: Option<&Document>,
        unit: &dyn MigrationUnit,
        ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        match doc.kind {
            DocumentKind::Actor => Self::walk_actor(doc, unit, ctx).await,
            DocumentKind::Item => unit.update_item(doc, None, ctx).await,
            DocumentKind::Token => unit.update_token(doc, actor_ctx, ctx).await,
            DocumentKind::Macro => unit.update_macro(doc, ctx).await,
            DocumentKind::ChatMessage => unit.update_message(doc, ctx).await,
            DocumentKind::RollTable => unit.update_table(doc, ctx).await,
            DocumentKind::User => unit.update_user(doc, ctx).await,
            DocumentKind::JournalEntry => unit.update_journal(doc, ctx).await,
        }
    }

    async fn walk_actor(
        actor: &mut Document,
        unit: &dyn MigrationUnit,
        ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        unit.update_actor(actor, ctx).await?;

        // The items are detached for the pass so the parent view (sans
        // items) can be borrowed immutably alongside each mutable item.
        let mut items = std::mem::take(&mut actor.items);
        let mut outcome = Ok(());
        for item in items.iter_mut() {
            if let Err(err) = unit.update_item(item, Some(actor), ctx).await {
                outcome = Err(err);
                break;
            }
        }
        actor.items = items;
        outcome
    }
}
