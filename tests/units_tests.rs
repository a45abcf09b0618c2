//! End-to-end coverage of the shipped units through the full runner.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use worldmigrate::{
    ContentProvider, Document, DocumentKind, MemorySettings, MigrationRunner, Result,
    SettingsStore, VersionTracker, units,
};

const POTION_KEY: &str = "Compendium.pf.equipment.healing-potion";

struct Compendium {
    items: HashMap<String, Document>,
    calls: AtomicUsize,
}

impl Compendium {
    fn new() -> Self {
        let canonical = Document::new(DocumentKind::Item, "Minor Healing Potion")
            .with_subtype("consumable")
            .with_system(json!({
                "level": 1,
                "charges": { "value": 3, "max": 3 },
                "price": { "value": { "gp": 4 } }
            }));
        let mut items = HashMap::new();
        items.insert(POTION_KEY.to_string(), canonical);
        Self {
            items,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ContentProvider for Compendium {
    async fn fetch_by_key(&self, key: &str) -> Result<Option<Document>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.items.get(key).cloned())
    }
}

fn shipped_runner() -> (MigrationRunner, Arc<Compendium>) {
    let registry = Arc::new(units::default_registry().unwrap());
    let provider = Arc::new(Compendium::new());
    (MigrationRunner::new(registry, provider.clone()), provider)
}

/// Drives the full pipeline, resuming across flush boundaries until done.
async fn migrate_to_latest(
    runner: &MigrationRunner,
    docs: &mut Vec<Document>,
    settings: &mut MemorySettings,
) -> u32 {
    let mut from = 0;
    loop {
        let result = runner.run(docs, from, settings).await.unwrap();
        assert!(result.per_document_errors.is_empty());
        if !result.requires_followup_flush {
            return result.reached_version;
        }
        from = result.reached_version;
    }
}

#[tokio::test]
async fn legacy_size_wrapper_is_flattened() {
    let (runner, _) = shipped_runner();
    let mut docs = vec![
        Document::new(DocumentKind::Item, "Chain Shirt")
            .with_subtype("armor")
            .with_system(json!({ "size": { "value": "med" } })),
    ];
    let mut settings = MemorySettings::new();

    let reached = migrate_to_latest(&runner, &mut docs, &mut settings).await;

    assert_eq!(docs[0].system_value("size"), Some(&json!("med")));
    assert_eq!(VersionTracker::stamped_version(&docs[0]), reached);
}

#[tokio::test]
async fn malformed_traits_are_coerced_without_stopping_siblings() {
    let (runner, _) = shipped_runner();
    let mut actor = Document::new(DocumentKind::Actor, "Mutant").with_subtype("npc");
    actor.items.push(
        Document::new(DocumentKind::Item, "Mangled Claw")
            .with_subtype("weapon")
            .with_system(json!({ "traits": { "value": "agile,unarmed" } })),
    );
    actor.items.push(
        Document::new(DocumentKind::Item, "Tail")
            .with_subtype("weapon")
            .with_system(json!({ "traits": { "value": ["reach"] } })),
    );
    let mut docs = vec![actor];
    let mut settings = MemorySettings::new();

    migrate_to_latest(&runner, &mut docs, &mut settings).await;

    assert_eq!(
        docs[0].items[0].system_value("traits.value"),
        Some(&json!([]))
    );
    assert_eq!(
        docs[0].items[1].system_value("traits.value"),
        Some(&json!(["reach"]))
    );
}

#[tokio::test]
async fn focus_pool_is_seeded_then_raised_in_one_pass() {
    let (runner, _) = shipped_runner();
    let mut docs = vec![Document::new(DocumentKind::Actor, "Kyra").with_subtype("character")];
    let mut settings = MemorySettings::new();

    migrate_to_latest(&runner, &mut docs, &mut settings).await;

    // 610 seeds {value: 0, max: 1}; 612 reads that same-pass state and
    // raises the cap.
    assert_eq!(docs[0].system_value("resources.focus.value"), Some(&json!(0)));
    assert_eq!(docs[0].system_value("resources.focus.max"), Some(&json!(2)));
}

#[tokio::test]
async fn npcs_get_neither_focus_pool_nor_unarmed_strike() {
    let (runner, _) = shipped_runner();
    let mut docs = vec![Document::new(DocumentKind::Actor, "Goblin").with_subtype("npc")];
    let mut settings = MemorySettings::new();

    migrate_to_latest(&runner, &mut docs, &mut settings).await;

    assert_eq!(docs[0].system_value("resources.focus"), None);
    assert!(docs[0].items.is_empty());
}

#[tokio::test]
async fn stale_consumables_share_one_compendium_fetch() {
    let (runner, provider) = shipped_runner();
    let stale = |name: &str, quantity: u64| {
        Document::new(DocumentKind::Item, name)
            .with_subtype("consumable")
            .with_system(json!({
                "quantity": quantity,
                "charges": { "value": 1, "max": 2 }
            }))
            .with_flags(json!({ "core": { "sourceId": POTION_KEY } }))
    };
    let mut docs = vec![stale("Healing Potion (old)", 2), stale("Potion?", 5)];
    let mut settings = MemorySettings::new();

    migrate_to_latest(&runner, &mut docs, &mut settings).await;

    // One provider call served both documents.
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    for doc in &docs {
        assert_eq!(doc.name, "Minor Healing Potion");
        assert_eq!(doc.system_value("level"), Some(&json!(1)));
        assert_eq!(doc.system_value("charges.max"), Some(&json!(3)));
        // Caller-specific fields survive the swap.
        assert_eq!(doc.system_value("charges.value"), Some(&json!(1)));
    }
    assert_eq!(docs[0].system_value("quantity"), Some(&json!(2)));
    assert_eq!(docs[1].system_value("quantity"), Some(&json!(5)));
}

#[tokio::test]
async fn unresolvable_source_leaves_the_item_untouched() {
    let (runner, _) = shipped_runner();
    let mut docs = vec![
        Document::new(DocumentKind::Item, "Mystery Brew")
            .with_subtype("consumable")
            .with_system(json!({ "quantity": 1 }))
            .with_flags(json!({ "core": { "sourceId": "Compendium.pf.equipment.unknown" } })),
    ];
    let mut settings = MemorySettings::new();

    migrate_to_latest(&runner, &mut docs, &mut settings).await;

    assert_eq!(docs[0].name, "Mystery Brew");
    assert_eq!(docs[0].system_value("quantity"), Some(&json!(1)));
}

#[tokio::test]
async fn token_dimensions_follow_the_owning_actor() {
    let (runner, _) = shipped_runner();
    let ogre = Document::new(DocumentKind::Actor, "Ogre")
        .with_subtype("npc")
        .with_system(json!({ "traits": { "size": "lg" } }));
    let token = Document::new(DocumentKind::Token, "Ogre Token")
        .with_actor_id(ogre.id.clone())
        .with_system(json!({ "width": 1, "height": 1 }));
    let unowned = Document::new(DocumentKind::Token, "Decoration")
        .with_system(json!({ "width": 1, "height": 1 }));
    let mut docs = vec![token, ogre, unowned];
    let mut settings = MemorySettings::new();

    migrate_to_latest(&runner, &mut docs, &mut settings).await;

    assert_eq!(docs[0].system_value("width"), Some(&json!(2.0)));
    assert_eq!(docs[0].system_value("height"), Some(&json!(2.0)));
    assert_eq!(docs[2].system_value("width"), Some(&json!(1)));
}

#[tokio::test]
async fn full_world_migrates_end_to_end_and_is_idempotent() {
    let (runner, _) = shipped_runner();
    let mut character = Document::new(DocumentKind::Actor, "Seelah")
        .with_subtype("character")
        .with_system(json!({ "img": "systems/pf/icons/equipment/shield.webp" }));
    character.items.push(
        Document::new(DocumentKind::Item, "Longsword")
            .with_subtype("weapon")
            .with_system(json!({ "size": { "value": "med" }, "iconTint": "#fff" })),
    );

    let mut docs = vec![
        character,
        Document::new(DocumentKind::Macro, "Attack")
            .with_system(json!({ "img": "systems/pf/icons/spells/bolt.webp" })),
        Document::new(DocumentKind::RollTable, "Loot")
            .with_system(json!({ "formula": " 1 d 20 + 3 " })),
        Document::new(DocumentKind::User, "GM")
            .with_flags(json!({ "core": { "legacyPermissions": [1, 2], "keep": true } })),
        Document::new(DocumentKind::JournalEntry, "Day One")
            .with_system(json!({ "content": "We set out at dawn." })),
        Document::new(DocumentKind::ChatMessage, "hit!")
            .with_flags(json!({ "pf": { "damageRoll": true } })),
    ];
    let mut settings = MemorySettings::new();

    let reached = migrate_to_latest(&runner, &mut docs, &mut settings).await;
    let registry = units::default_registry().unwrap();
    assert_eq!(reached, registry.latest_version());

    // Actor: icon relocated, embedded item flattened and granted a strike.
    assert_eq!(
        docs[0].system_value("img"),
        Some(&json!("systems/pf/assets/icons/equipment/shield.webp"))
    );
    assert_eq!(docs[0].items[0].system_value("size"), Some(&json!("med")));
    assert_eq!(docs[0].items[0].system_value("iconTint"), None);
    assert!(
        docs[0]
            .items
            .iter()
            .any(|item| item.system_value("slug") == Some(&json!("basic-unarmed")))
    );

    // Macro, table, user, journal, chat message.
    assert_eq!(
        docs[1].system_value("img"),
        Some(&json!("systems/pf/assets/icons/spells/bolt.webp"))
    );
    assert_eq!(docs[2].system_value("formula"), Some(&json!("1d20+3")));
    assert_eq!(docs[3].flag_value("core.legacyPermissions"), None);
    assert_eq!(docs[3].flag_value("core.keep"), Some(&json!(true)));
    assert_eq!(
        docs[4].system_value("content"),
        Some(&json!("<p>We set out at dawn.</p>"))
    );
    assert_eq!(docs[5].flag_value("pf.damageRoll"), None);
    assert_eq!(
        docs[5].flag_value("pf.context.type"),
        Some(&json!("damage-roll"))
    );

    // World hook side effect landed once.
    assert_eq!(settings.get("world", "permissionSchema"), Some(json!(2)));

    // Re-running the whole list over the migrated world is a no-op.
    let snapshot = docs.clone();
    let rerun = runner.run(&mut docs, 0, &mut settings).await.unwrap();
    assert_eq!(docs, snapshot);
    assert!(rerun.per_document_errors.is_empty());
    assert!(!rerun.requires_followup_flush);
    assert_eq!(rerun.reached_version, reached);
}
