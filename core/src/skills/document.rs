//! Two-section text format used by skill and agent definitions.
//!
//! A document may open with a metadata block: the first non-blank line is
//! `---`, and the block runs until the next line that is exactly `---`.
//! Everything after the closing delimiter is the body. Documents that do not
//! open with a delimiter have no metadata and the whole text is the body.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

const DELIMITER: &str = "---";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("metadata block opened on line {line} is never closed")]
    Unterminated { line: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub metadata: Option<String>,
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Document {
    /// Reads the metadata block as YAML. Missing or malformed metadata yields
    /// empty fields.
    pub fn fields(&self) -> Metadata {
        let Some(raw) = self.metadata.as_deref() else {
            return Metadata::default();
        };

        match serde_yaml::from_str::<Metadata>(raw) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::debug!("Ignoring unparseable metadata: {}", e);
                Metadata::default()
            }
        }
    }
}

pub fn parse_document(content: &str) -> Result<Document, DocumentError> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        lines.push((offset, line));
        offset += line.len();
    }

    let Some(open) = lines.iter().position(|(_, l)| !l.trim().is_empty()) else {
        return Ok(Document {
            metadata: None,
            body: String::new(),
        });
    };

    let (open_start, open_line) = lines[open];
    if open_line.trim() != DELIMITER {
        return Ok(Document {
            metadata: None,
            body: content.trim().to_string(),
        });
    }

    let metadata_start = open_start + open_line.len();
    let close = lines[open + 1..]
        .iter()
        .find(|(_, l)| l.trim() == DELIMITER)
        .ok_or(DocumentError::Unterminated { line: open + 1 })?;

    let (close_start, close_line) = *close;
    Ok(Document {
        metadata: Some(content[metadata_start..close_start].to_string()),
        body: content[close_start + close_line.len()..].trim().to_string(),
    })
}

pub fn read_document(path: &Path) -> Result<Document> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_document(&content).with_context(|| format!("Malformed definition {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn splits_metadata_and_body() {
        let doc = parse_document(
            "---\nname: waldo\ndescription: Planner\n---\n\n# Waldo\nPlans things.\n",
        )
        .unwrap();
        assert_eq!(doc.metadata.as_deref(), Some("name: waldo\ndescription: Planner\n"));
        assert_eq!(doc.body, "# Waldo\nPlans things.");

        let fields = doc.fields();
        assert_eq!(fields.name.as_deref(), Some("waldo"));
        assert_eq!(fields.description.as_deref(), Some("Planner"));
    }

    #[test]
    fn leading_blank_lines_before_metadata() {
        let doc = parse_document("\n\n---\nname: x\n---\nbody").unwrap();
        assert_eq!(doc.metadata.as_deref(), Some("name: x\n"));
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn document_without_metadata_is_all_body() {
        let doc = parse_document("# Title\n\nSome text\n").unwrap();
        assert_eq!(doc.metadata, None);
        assert_eq!(doc.body, "# Title\n\nSome text");
    }

    #[test]
    fn rules_inside_body_are_preserved() {
        let doc = parse_document("---\nname: x\n---\nintro\n---\noutro\n").unwrap();
        assert_eq!(doc.body, "intro\n---\noutro");

        let plain = parse_document("intro\n---\noutro").unwrap();
        assert_eq!(plain.metadata, None);
        assert_eq!(plain.body, "intro\n---\noutro");
    }

    #[test]
    fn unterminated_metadata_fails() {
        let err = parse_document("\n---\nname: x\nno closing\n").unwrap_err();
        assert_eq!(err, DocumentError::Unterminated { line: 2 });
    }

    #[test]
    fn crlf_delimiters() {
        let doc = parse_document("---\r\nname: x\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(doc.metadata.as_deref(), Some("name: x\r\n"));
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn empty_body_after_metadata() {
        let doc = parse_document("---\nname: x\n---\n   \n").unwrap();
        assert!(doc.body.is_empty());
    }

    #[test]
    fn malformed_yaml_yields_empty_fields() {
        let doc = parse_document("---\n: [unclosed\n---\nbody").unwrap();
        let fields = doc.fields();
        assert!(fields.name.is_none());
        assert!(fields.description.is_none());
    }

    #[test]
    fn read_document_from_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("SKILL.md");
        fs::write(&path, "---\ndescription: Test\n---\nBody text\n").unwrap();

        let doc = read_document(&path).unwrap();
        assert_eq!(doc.body, "Body text");
        assert!(read_document(&tmp.path().join("missing.md")).is_err());
    }
}
