pub mod error;
pub mod types;

pub use error::{MigrateError, Result};
pub use types::{DocumentError, DocumentKind};
