pub mod document;
pub mod patch;

pub use document::Document;
pub use patch::{DocumentPatch, FieldOp};
