use crate::core::Result;
use crate::document::Document;
use crate::unit::{MigrationContext, MigrationUnit};
use async_trait::async_trait;
use serde_json::{Value, json};

/// Raises the focus pool cap to the two-point baseline.
///
/// Reads the pool `AddFocusPool` created; documents whose cap was already
/// raised are left alone, so a retried run converges.
pub struct RaiseFocusCap;

#[async_trait]
impl MigrationUnit for RaiseFocusCap {
    fn version(&self) -> u32 {
        612
    }

    async fn update_actor(
        &self,
        actor: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        let Some(max) = actor
            .system_value("resources.focus.max")
            .and_then(Value::as_u64)
        else {
            return Ok(());
        };
        if max < 2 {
            if let Some(slot) = actor.system_value_mut("resources.focus.max") {
                *slot = json!(max + 1);
            }
        }
        Ok(())
    }
}
