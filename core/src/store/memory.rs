use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use super::{Pruned, SkillSource, SkillStore, SkillTree};

/// In-memory stand-in for a skills directory.
///
/// The parent directory is modelled only as far as pruning needs: whether it
/// exists and whether it holds anything besides the root.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    root: PathBuf,
    root_exists: bool,
    parent_exists: bool,
    parent_occupied: bool,
    skills: BTreeMap<String, SkillTree>,
    mutations: usize,
}

impl InMemoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            root_exists: false,
            parent_exists: false,
            parent_occupied: false,
            skills: BTreeMap::new(),
            mutations: 0,
        }
    }

    pub fn with_skill(mut self, name: impl Into<String>, tree: SkillTree) -> Self {
        self.root_exists = true;
        self.parent_exists = true;
        self.skills.insert(name.into(), tree);
        self
    }

    pub fn with_empty_root(mut self) -> Self {
        self.root_exists = true;
        self.parent_exists = true;
        self
    }

    pub fn with_occupied_parent(mut self) -> Self {
        self.parent_exists = true;
        self.parent_occupied = true;
        self
    }

    pub fn tree(&self, name: &str) -> Option<&SkillTree> {
        self.skills.get(name)
    }

    pub fn parent_exists(&self) -> bool {
        self.parent_exists
    }

    /// Number of writes performed since construction.
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    fn materialize_root(&mut self) {
        self.root_exists = true;
        self.parent_exists = true;
    }
}

impl SkillSource for InMemoryStore {
    fn location(&self, name: &str) -> String {
        self.root.join(name).display().to_string()
    }

    fn contains(&self, name: &str) -> bool {
        self.root_exists && self.skills.contains_key(name)
    }

    fn read_tree(&self, name: &str) -> io::Result<SkillTree> {
        self.skills.get(name).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", self.location(name)),
            )
        })
    }

    fn read_file(&self, name: &str, relative: &Path) -> io::Result<Option<Vec<u8>>> {
        Ok(self
            .skills
            .get(name)
            .and_then(|tree| tree.get(relative))
            .map(<[u8]>::to_vec))
    }
}

impl SkillStore for InMemoryStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn root_exists(&self) -> bool {
        self.root_exists
    }

    fn ensure_root(&mut self) -> io::Result<bool> {
        if self.root_exists {
            return Ok(false);
        }
        self.materialize_root();
        self.mutations += 1;
        Ok(true)
    }

    fn names(&self) -> io::Result<Vec<String>> {
        if !self.root_exists {
            return Ok(Vec::new());
        }
        Ok(self.skills.keys().cloned().collect())
    }

    fn write_tree(&mut self, name: &str, tree: &SkillTree) -> io::Result<()> {
        self.materialize_root();
        self.skills.entry(name.to_string()).or_default().merge(tree);
        self.mutations += 1;
        Ok(())
    }

    fn remove(&mut self, name: &str) -> io::Result<bool> {
        if self.skills.remove(name).is_none() {
            return Ok(false);
        }
        self.mutations += 1;
        Ok(true)
    }

    fn prune(&mut self) -> io::Result<Pruned> {
        let mut pruned = Pruned::default();
        if !self.root_exists || !self.skills.is_empty() {
            return Ok(pruned);
        }

        self.root_exists = false;
        self.mutations += 1;
        pruned.root = true;

        if self.parent_exists && !self.parent_occupied {
            self.parent_exists = false;
            self.mutations += 1;
            pruned.parent = true;
        }
        Ok(pruned)
    }
}
