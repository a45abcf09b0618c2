use crate::core::Result;
use crate::document::{Document, DocumentPatch};
use crate::unit::{MigrationContext, MigrationUnit};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref LEGACY_ICON_DIR: Regex =
        Regex::new(r"^systems/pf/icons/(equipment|spells|conditions)/").unwrap();
}

/// Rewrites icon paths moved out of `systems/pf/icons/` and drops the
/// `iconTint` side-channel retired with the old icon set.
pub struct RelocateIconPaths;

fn relocate(doc: &mut Document) {
    if let Some(Value::String(img)) = doc.system.get_mut("img") {
        let next = LEGACY_ICON_DIR
            .replace(img, "systems/pf/assets/icons/$1/")
            .into_owned();
        *img = next;
    }
    doc.patch_system(&DocumentPatch::new().delete("iconTint"));
}

#[async_trait]
impl MigrationUnit for RelocateIconPaths {
    fn version(&self) -> u32 {
        624
    }

    async fn update_actor(
        &self,
        actor: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        relocate(actor);
        Ok(())
    }

    async fn update_item(
        &self,
        item: &mut Document,
        _parent: Option<&Document>,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        relocate(item);
        Ok(())
    }

    async fn update_macro(
        &self,
        macro_doc: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        relocate(macro_doc);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DocumentKind;
    use serde_json::json;

    #[test]
    fn relocates_legacy_directories_once() {
        let mut doc = Document::new(DocumentKind::Item, "Potion").with_system(json!({
            "img": "systems/pf/icons/equipment/potion.webp",
            "iconTint": "#ff0000"
        }));
        relocate(&mut doc);
        assert_eq!(
            doc.system_value("img"),
            Some(&json!("systems/pf/assets/icons/equipment/potion.webp"))
        );
        assert_eq!(doc.system_value("iconTint"), None);

        // Second application changes nothing.
        let snapshot = doc.clone();
        relocate(&mut doc);
        assert_eq!(doc, snapshot);
    }

    #[test]
    fn foreign_paths_are_untouched() {
        let mut doc = Document::new(DocumentKind::Macro, "Roll")
            .with_system(json!({ "img": "worlds/my-world/icons/roll.png" }));
        relocate(&mut doc);
        assert_eq!(
            doc.system_value("img"),
            Some(&json!("worlds/my-world/icons/roll.png"))
        );
    }
}
