use crate::core::Result;
use crate::document::Document;
use crate::unit::{MigrationContext, MigrationUnit};
use async_trait::async_trait;
use serde_json::Value;

/// Repairs malformed `traits.value` fields.
///
/// Very old exports saved the trait list as a comma string or a bare
/// scalar; anything that is not an array of strings becomes an empty list,
/// and non-string entries inside an array are dropped.
pub struct CoerceTraitLists;

fn coerce(doc: &mut Document) {
    let Some(traits) = doc.system_value_mut("traits.value") else {
        return;
    };
    match traits {
        Value::Array(entries) => entries.retain(|entry| entry.is_string()),
        _ => *traits = Value::Array(Vec::new()),
    }
}

#[async_trait]
impl MigrationUnit for CoerceTraitLists {
    fn version(&self) -> u32 {
        605
    }

    async fn update_actor(
        &self,
        actor: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        coerce(actor);
        Ok(())
    }

    async fn update_item(
        &self,
        item: &mut Document,
        _parent: Option<&Document>,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        coerce(item);
        Ok(())
    }
}
