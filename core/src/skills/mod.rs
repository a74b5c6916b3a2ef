pub mod document;
pub mod manifest;

pub use document::{Document, DocumentError, Metadata, parse_document, read_document};
pub use manifest::{Lifecycle, Manifest, ManifestEntry, ManifestError};

/// Entry point file every skill directory carries.
pub const SKILL_FILE: &str = "SKILL.md";
