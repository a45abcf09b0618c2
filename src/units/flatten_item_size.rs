use crate::core::Result;
use crate::document::Document;
use crate::unit::{MigrationContext, MigrationUnit};
use async_trait::async_trait;
use serde_json::Value;

/// Flattens the legacy `size: { value }` wrapper on items to a plain string.
pub struct FlattenItemSize;

#[async_trait]
impl MigrationUnit for FlattenItemSize {
    fn version(&self) -> u32 {
        601
    }

    async fn update_item(
        &self,
        item: &mut Document,
        _parent: Option<&Document>,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        let Some(size) = item.system.get("size") else {
            return Ok(());
        };
        if let Some(wrapper) = size.as_object() {
            let flat = wrapper
                .get("value")
                .and_then(Value::as_str)
                .unwrap_or("med")
                .to_string();
            item.system.insert("size".to_string(), Value::String(flat));
        }
        Ok(())
    }
}
