use crate::core::Result;
use crate::document::{Document, DocumentPatch};
use crate::unit::{MigrationContext, MigrationUnit};
use async_trait::async_trait;
use serde_json::{Value, json};

/// Moves the legacy `pf.damageRoll` chat flag under the roll context block
/// the card renderer reads today.
pub struct TagDamageCards;

#[async_trait]
impl MigrationUnit for TagDamageCards {
    fn version(&self) -> u32 {
        640
    }

    async fn update_message(
        &self,
        message: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        let legacy = message
            .flag_value("pf.damageRoll")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if legacy {
            message.patch_flags(
                &DocumentPatch::new()
                    .set("pf.context.type", json!("damage-roll"))
                    .delete("pf.damageRoll"),
            );
        }
        Ok(())
    }
}
