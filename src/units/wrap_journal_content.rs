use crate::core::Result;
use crate::document::Document;
use crate::unit::{MigrationContext, MigrationUnit};
use async_trait::async_trait;
use serde_json::Value;

/// Wraps bare-text journal content in a paragraph element. Content that
/// already starts with markup is left alone, so re-application is a no-op.
pub struct WrapJournalContent;

#[async_trait]
impl MigrationUnit for WrapJournalContent {
    fn version(&self) -> u32 {
        636
    }

    async fn update_journal(
        &self,
        journal: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        if let Some(Value::String(content)) = journal.system.get_mut("content") {
            let trimmed = content.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('<') {
                *content = format!("<p>{}</p>", trimmed);
            }
        }
        Ok(())
    }
}
