use crate::core::Result;
use crate::document::{Document, DocumentPatch};
use crate::unit::{MigrationContext, MigrationUnit};
use async_trait::async_trait;
use serde_json::json;

/// Seeds `resources.focus` on player characters.
///
/// Later units assume the pool exists (see `RaiseFocusCap`), so this must
/// stay below them in the order.
pub struct AddFocusPool;

#[async_trait]
impl MigrationUnit for AddFocusPool {
    fn version(&self) -> u32 {
        610
    }

    async fn update_actor(
        &self,
        actor: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        if actor.subtype != "character" {
            return Ok(());
        }
        if actor.system_value("resources.focus").is_some() {
            return Ok(());
        }
        actor.patch_system(
            &DocumentPatch::new().set("resources.focus", json!({ "value": 0, "max": 1 })),
        );
        Ok(())
    }
}
