use std::path::{Path, PathBuf};

use super::LifecycleError;
use crate::skills::{Manifest, SKILL_FILE, parse_document};
use crate::store::SkillStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillState {
    /// Current skill present in the store.
    Installed,
    /// Current skill not present.
    Missing,
    /// Legacy skill still present.
    Lingering,
    /// Legacy skill already gone.
    Absent,
}

#[derive(Debug, Clone)]
pub struct InventoryItem {
    pub name: String,
    pub summary: String,
    pub state: SkillState,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Inventory {
    pub root: PathBuf,
    pub root_exists: bool,
    pub items: Vec<InventoryItem>,
    /// Directories under the root that the manifest does not know about.
    pub unmanaged: Vec<String>,
}

impl Inventory {
    pub fn installed(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter().filter(|i| i.state == SkillState::Installed)
    }

    pub fn is_complete(&self) -> bool {
        self.items.iter().all(|i| i.state != SkillState::Missing)
    }
}

pub fn take_inventory(
    manifest: &Manifest,
    store: &dyn SkillStore,
) -> Result<Inventory, LifecycleError> {
    let root = store.root().to_path_buf();
    let names = store
        .names()
        .map_err(LifecycleError::io("read", root.display().to_string()))?;

    let mut items = Vec::with_capacity(manifest.len());
    for entry in manifest.entries() {
        let present = store.contains(&entry.name);
        let state = match (entry.is_current(), present) {
            (true, true) => SkillState::Installed,
            (true, false) => SkillState::Missing,
            (false, true) => SkillState::Lingering,
            (false, false) => SkillState::Absent,
        };
        let description = if present {
            skill_description(store, &entry.name)
        } else {
            None
        };

        items.push(InventoryItem {
            name: entry.name.clone(),
            summary: entry.summary.clone(),
            state,
            description,
        });
    }

    let unmanaged = names
        .into_iter()
        .filter(|name| !manifest.contains(name))
        .collect();

    Ok(Inventory {
        root_exists: store.root_exists(),
        root,
        items,
        unmanaged,
    })
}

fn skill_description(store: &dyn SkillStore, name: &str) -> Option<String> {
    let raw = match store.read_file(name, Path::new(SKILL_FILE)) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!("Failed to read {} for '{}': {}", SKILL_FILE, name, e);
            return None;
        }
    };

    match parse_document(&String::from_utf8_lossy(&raw)) {
        Ok(doc) => doc.fields().description,
        Err(e) => {
            tracing::warn!("Skipping metadata of '{}': {}", name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::ManifestEntry;
    use crate::store::{InMemoryStore, SkillTree};

    #[test]
    fn classifies_every_entry() {
        let manifest = Manifest::new(vec![
            ManifestEntry::current("alpha", "First"),
            ManifestEntry::current("beta", "Second"),
            ManifestEntry::legacy("old"),
            ManifestEntry::legacy("older"),
        ])
        .unwrap();
        let store = InMemoryStore::new("/skills")
            .with_skill(
                "alpha",
                SkillTree::new().with_file(SKILL_FILE, "---\ndescription: Does alpha\n---\nBody"),
            )
            .with_skill("old", SkillTree::new())
            .with_skill("mine", SkillTree::new());

        let inventory = take_inventory(&manifest, &store).unwrap();

        let states: Vec<_> = inventory.items.iter().map(|i| i.state).collect();
        assert_eq!(
            states,
            vec![
                SkillState::Installed,
                SkillState::Missing,
                SkillState::Lingering,
                SkillState::Absent
            ]
        );
        assert_eq!(inventory.items[0].description.as_deref(), Some("Does alpha"));
        assert_eq!(inventory.unmanaged, vec!["mine"]);
        assert!(!inventory.is_complete());
        assert_eq!(inventory.installed().count(), 1);
    }

    #[test]
    fn empty_store() {
        let manifest = Manifest::new(vec![ManifestEntry::current("alpha", "")]).unwrap();
        let store = InMemoryStore::new("/skills");

        let inventory = take_inventory(&manifest, &store).unwrap();
        assert!(!inventory.root_exists);
        assert_eq!(inventory.items[0].state, SkillState::Missing);
        assert!(inventory.unmanaged.is_empty());
    }

    #[test]
    fn malformed_skill_file_has_no_description() {
        let manifest = Manifest::new(vec![ManifestEntry::current("alpha", "")]).unwrap();
        let store = InMemoryStore::new("/skills").with_skill(
            "alpha",
            SkillTree::new().with_file(SKILL_FILE, "---\ndescription: never closed\n"),
        );

        let inventory = take_inventory(&manifest, &store).unwrap();
        assert_eq!(inventory.items[0].state, SkillState::Installed);
        assert!(inventory.items[0].description.is_none());
    }
}
