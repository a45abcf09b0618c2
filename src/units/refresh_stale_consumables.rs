use crate::core::Result;
use crate::document::{Document, patch};
use crate::unit::{MigrationContext, MigrationUnit};
use async_trait::async_trait;
use serde_json::Value;

/// Replaces stale consumable bodies with the canonical compendium copy.
///
/// The lookup key is the item's `flags.core.sourceId`. Caller-specific
/// fields (quantity, remaining charges) survive the swap; the document's
/// own identifier is never touched. An unresolvable key leaves the item
/// exactly as it was.
pub struct RefreshStaleConsumables;

#[async_trait]
impl MigrationUnit for RefreshStaleConsumables {
    fn version(&self) -> u32 {
        615
    }

    async fn update_item(
        &self,
        item: &mut Document,
        _parent: Option<&Document>,
        ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        if item.subtype != "consumable" {
            return Ok(());
        }
        let Some(key) = item.flag_value("core.sourceId").and_then(Value::as_str) else {
            return Ok(());
        };
        let Some(canonical) = ctx.cache.resolve(key).await else {
            return Ok(());
        };

        let quantity = item.system.get("quantity").cloned();
        let charges = item.system_value("charges.value").cloned();

        item.name = canonical.name.clone();
        item.system = canonical.system.clone();

        if let Some(quantity) = quantity {
            item.system.insert("quantity".to_string(), quantity);
        }
        if let Some(charges) = charges {
            patch::path_set(&mut item.system, "charges.value", charges);
        }
        Ok(())
    }
}
