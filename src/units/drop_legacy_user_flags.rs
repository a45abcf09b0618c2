use crate::core::Result;
use crate::document::{Document, DocumentPatch};
use crate::settings::SettingsStore;
use crate::unit::{MigrationContext, MigrationUnit};
use async_trait::async_trait;
use serde_json::json;

/// Removes the pre-permission-schema `core.legacyPermissions` user flag and
/// records the new schema revision in world settings.
pub struct DropLegacyUserFlags;

#[async_trait]
impl MigrationUnit for DropLegacyUserFlags {
    fn version(&self) -> u32 {
        632
    }

    fn has_world_hook(&self) -> bool {
        true
    }

    async fn update_user(
        &self,
        user: &mut Document,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        user.patch_flags(&DocumentPatch::new().delete("core.legacyPermissions"));
        Ok(())
    }

    async fn migrate_world(
        &self,
        settings: &mut dyn SettingsStore,
        _ctx: &MigrationContext<'_>,
    ) -> Result<()> {
        settings.set("world", "permissionSchema", json!(2))
    }
}
