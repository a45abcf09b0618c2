use crate::core::{DocumentKind, Result};
use crate::document::Document;
use crate::unit::{MigrationContext, MigrationUnit};
use async_trait::async_trait;
use serde_json::{Value, json};

const SLUG: &str = "basic-unarmed";

/// Grants every player character the basic unarmed strike item.
///
/// This is a structural addition: later units address the strike as a
/// persisted embedded document, so the run flushes after this one.
pub struct GrantBasicUnarmedStrike;

#[async_trait]
impl MigrationUnit for GrantBasicUnarmedStrike {
    fn version(&self) -> u32 {
        644
    }

    fn requires_flush(&self) -> bool {
        true
    }

    async fn update_actor(
        &self,
        actor: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        if actor.subtype != "character" {
            return Ok(());
        }
        let already_granted = actor.items.iter().any(|item| {
            item.subtype == "strike"
                && item.system_value("slug").and_then(Value::as_str) == Some(SLUG)
        });
        if already_granted {
            return Ok(());
        }
        actor.items.push(
            Document::new(DocumentKind::Item, "Unarmed")
                .with_subtype("strike")
                .with_system(json!({
                    "slug": SLUG,
                    "damage": { "die": "d4", "type": "bludgeoning" },
                    "traits": { "value": ["agile", "finesse", "nonlethal", "unarmed"] }
                })),
        );
        Ok(())
    }
}
