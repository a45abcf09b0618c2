use serde::{Deserialize, Serialize};
use std::fmt;

/// The eight root document kinds the engine migrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    Actor,
    Item,
    Token,
    Macro,
    ChatMessage,
    RollTable,
    User,
    JournalEntry,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Actor => "actor",
            DocumentKind::Item => "item",
            DocumentKind::Token => "token",
            DocumentKind::Macro => "macro",
            DocumentKind::ChatMessage => "chatMessage",
            DocumentKind::RollTable => "rollTable",
            DocumentKind::User => "user",
            DocumentKind::JournalEntry => "journalEntry",
        };
        write!(f, "{}", name)
    }
}

/// One isolated per-document failure, reported through `RunResult`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentError {
    pub document_id: String,
    pub document_name: String,
    pub unit_version: u32,
    pub message: String,
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) at migration {}: {}",
            self.document_name, self.document_id, self.unit_version, self.message
        )
    }
}
