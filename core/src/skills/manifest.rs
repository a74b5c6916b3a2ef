use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_MANIFEST: &str = include_str!("../../skills.toml");

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("skill '{0}' is listed more than once")]
    Duplicate(String),
    #[error("invalid skill name: {0:?}")]
    UnsafeName(String),
    #[error("legacy skill '{name}' is replaced by '{replaced_by}', which is not a current skill")]
    UnknownReplacement { name: String, replaced_by: String },
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default, rename = "skill")]
    skills: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    name: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    legacy: bool,
    #[serde(default)]
    removed_in: Option<String>,
    #[serde(default)]
    replaced_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    Current,
    Legacy {
        removed_in: Option<String>,
        replaced_by: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub summary: String,
    pub lifecycle: Lifecycle,
}

impl ManifestEntry {
    pub fn current(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            lifecycle: Lifecycle::Current,
        }
    }

    pub fn legacy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: String::new(),
            lifecycle: Lifecycle::Legacy {
                removed_in: None,
                replaced_by: None,
            },
        }
    }

    pub fn replaced_by(mut self, successor: impl Into<String>) -> Self {
        if let Lifecycle::Legacy { replaced_by, .. } = &mut self.lifecycle {
            *replaced_by = Some(successor.into());
        }
        self
    }

    pub fn is_current(&self) -> bool {
        self.lifecycle == Lifecycle::Current
    }

    pub fn replacement(&self) -> Option<&str> {
        match &self.lifecycle {
            Lifecycle::Legacy { replaced_by, .. } => replaced_by.as_deref(),
            Lifecycle::Current => None,
        }
    }

    /// Legacy entries that have a successor are removed before installing.
    pub fn purge_on_install(&self) -> bool {
        self.replacement().is_some()
    }
}

impl From<RawEntry> for ManifestEntry {
    fn from(raw: RawEntry) -> Self {
        let lifecycle = if raw.legacy {
            Lifecycle::Legacy {
                removed_in: raw.removed_in,
                replaced_by: raw.replaced_by,
            }
        } else {
            Lifecycle::Current
        };

        Self {
            name: raw.name,
            summary: raw.summary,
            lifecycle,
        }
    }
}

/// The set of skills this package manages, shared by install, uninstall and list.
#[derive(Debug, Clone)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Result<Self, ManifestError> {
        let mut seen = HashSet::new();

        for entry in &entries {
            if is_unsafe_skill_name(&entry.name) {
                return Err(ManifestError::UnsafeName(entry.name.clone()));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ManifestError::Duplicate(entry.name.clone()));
            }
        }

        for entry in &entries {
            if let Some(successor) = entry.replacement() {
                let known = entries
                    .iter()
                    .any(|other| other.is_current() && other.name == successor);
                if !known {
                    return Err(ManifestError::UnknownReplacement {
                        name: entry.name.clone(),
                        replaced_by: successor.to_string(),
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn builtin() -> Result<Self, ManifestError> {
        Self::from_toml(BUILTIN_MANIFEST)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest = toml::from_str(content)?;
        Self::new(raw.skills.into_iter().map(ManifestEntry::from).collect())
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn current(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter().filter(|e| e.is_current())
    }

    pub fn legacy(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter().filter(|e| !e.is_current())
    }

    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub(crate) fn is_unsafe_skill_name(name: &str) -> bool {
    name.contains("..")
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
        || name.trim().is_empty()
}
