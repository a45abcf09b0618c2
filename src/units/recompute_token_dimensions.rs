use crate::core::Result;
use crate::document::{Document, DocumentPatch};
use crate::unit::{MigrationContext, MigrationUnit};
use async_trait::async_trait;
use serde_json::{Value, json};

/// Recomputes token grid dimensions from the owning actor's size trait.
///
/// Tokens without a resolvable actor keep their saved dimensions.
pub struct RecomputeTokenDimensions;

fn grid_squares(size: &str) -> f64 {
    match size {
        "tiny" => 0.5,
        "sm" | "med" => 1.0,
        "lg" => 2.0,
        "huge" => 3.0,
        "grg" => 4.0,
        _ => 1.0,
    }
}

#[async_trait]
impl MigrationUnit for RecomputeTokenDimensions {
    fn version(&self) -> u32 {
        620
    }

    async fn update_token(
        &self,
        token: &mut Document,
        actor: Option<&Document>,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        let Some(actor) = actor else {
            return Ok(());
        };
        let size = actor
            .system_value("traits.size")
            .and_then(Value::as_str)
            .unwrap_or("med");
        let dim = grid_squares(size);
        token.patch_system(
            &DocumentPatch::new()
                .set("width", json!(dim))
                .set("height", json!(dim)),
        );
        Ok(())
    }
}
