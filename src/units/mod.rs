//! Shipped migration units.
//!
//! Each file holds one atomic, versioned transformation. Versions are
//! sparse on purpose: the registry grew over years and retired units keep
//! their slots. Register order here is ascending, matching the run order.

mod add_focus_pool;
mod coerce_trait_lists;
mod drop_legacy_user_flags;
mod flatten_item_size;
mod grant_basic_unarmed_strike;
mod normalize_table_formulas;
mod raise_focus_cap;
mod recompute_token_dimensions;
mod refresh_stale_consumables;
mod relocate_icon_paths;
mod tag_damage_cards;
mod wrap_journal_content;

pub use add_focus_pool::AddFocusPool;
pub use coerce_trait_lists::CoerceTraitLists;
pub use drop_legacy_user_flags::DropLegacyUserFlags;
pub use flatten_item_size::FlattenItemSize;
pub use grant_basic_unarmed_strike::GrantBasicUnarmedStrike;
pub use normalize_table_formulas::NormalizeTableFormulas;
pub use raise_focus_cap::RaiseFocusCap;
pub use recompute_token_dimensions::RecomputeTokenDimensions;
pub use refresh_stale_consumables::RefreshStaleConsumables;
pub use relocate_icon_paths::RelocateIconPaths;
pub use tag_damage_cards::TagDamageCards;
pub use wrap_journal_content::WrapJournalContent;

use crate::core::Result;
use crate::registry::MigrationRegistry;
use std::sync::Arc;

/// Register every shipped unit, ascending.
pub fn register_all(registry: &mut MigrationRegistry) -> Result<()> {
    registry.register(Arc::new(FlattenItemSize))?;
    registry.register(Arc::new(CoerceTraitLists))?;
    registry.register(Arc::new(AddFocusPool))?;
    registry.register(Arc::new(RaiseFocusCap))?;
    registry.register(Arc::new(RefreshStaleConsumables))?;
    registry.register(Arc::new(RecomputeTokenDimensions))?;
    registry.register(Arc::new(RelocateIconPaths))?;
    registry.register(Arc::new(NormalizeTableFormulas))?;
    registry.register(Arc::new(DropLegacyUserFlags))?;
    registry.register(Arc::new(WrapJournalContent))?;
    registry.register(Arc::new(TagDamageCards))?;
    registry.register(Arc::new(GrantBasicUnarmedStrike))?;
    Ok(())
}

/// A registry pre-loaded with every shipped unit.
pub fn default_registry() -> Result<MigrationRegistry> {
    let mut registry = MigrationRegistry::new();
    register_all(&mut registry)?;
    Ok(registry)
}
