use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Duplicate migration version {0}")]
    DuplicateVersion(u32),

    #[error("Migration version {version} registered after {after}; versions must strictly ascend")]
    NonMonotonicVersion { version: u32, after: u32 },

    #[error("Migration version 0 is reserved for unstamped documents")]
    ReservedVersion,

    #[error("Hook failed: {0}")]
    HookFailed(String),

    #[error("World hook for version {version} failed: {message}")]
    WorldHook { version: u32, message: String },

    #[error("Content lookup failed: {0}")]
    ContentLookup(String),

    #[error("Invalid document shape: {0}")]
    InvalidShape(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, MigrateError>;

impl From<serde_json::Error> for MigrateError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidShape(err.to_string())
    }
}
