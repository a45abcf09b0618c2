use crate::core::Result;
use crate::document::Document;
use crate::unit::{MigrationContext, MigrationUnit};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref FORMULA_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Strips the whitespace padding hand-entered roll-table formulas
/// accumulated ("1 d 20 + 3" → "1d20+3").
pub struct NormalizeTableFormulas;

#[async_trait]
impl MigrationUnit for NormalizeTableFormulas {
    fn version(&self) -> u32 {
        628
    }

    async fn update_table(
        &self,
        table: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        if let Some(Value::String(formula)) = table.system.get_mut("formula") {
            let compact = FORMULA_WHITESPACE.replace_all(formula.trim(), "").into_owned();
            *formula = compact;
        }
        Ok(())
    }
}
