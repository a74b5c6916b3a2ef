//! Storage adapters for skill directories.
//!
//! Both the package's bundled skills and the per-user install target are a
//! flat namespace of skill names, each holding a tree of files. The install
//! and uninstall passes only talk to these traits, so they run unchanged
//! against the real filesystem or an in-memory fake.

pub mod fs;
pub mod memory;

pub use fs::FsSkillStore;
pub use memory::InMemoryStore;

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files of one skill, keyed by path relative to the skill directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillTree {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl SkillTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn get(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn files(&self) -> impl Iterator<Item = (&Path, &[u8])> {
        self.files.iter().map(|(p, c)| (p.as_path(), c.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Overlays `other` onto this tree, replacing files at the same path.
    pub fn merge(&mut self, other: &SkillTree) {
        for (path, content) in &other.files {
            self.files.insert(path.clone(), content.clone());
        }
    }

    pub fn load(dir: &Path) -> io::Result<Self> {
        if !std::fs::metadata(dir)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", dir.display()),
            ));
        }

        let mut tree = Self::new();
        for entry in WalkDir::new(dir).min_depth(1).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(dir)
                .map_err(io::Error::other)?
                .to_path_buf();
            tree.insert(relative, std::fs::read(entry.path())?);
        }
        Ok(tree)
    }

    pub fn write_to(&self, dir: &Path) -> io::Result<()> {
        std::fs::create_dir_all(dir)?;
        for (relative, content) in &self.files {
            let path = dir.join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, content)?;
        }
        Ok(())
    }
}

/// What [`SkillStore::prune`] removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pruned {
    pub root: bool,
    pub parent: bool,
}

pub trait SkillSource {
    /// Human-readable location of a skill, used in progress and error messages.
    fn location(&self, name: &str) -> String;

    fn contains(&self, name: &str) -> bool;

    /// On-disk directory backing `name`, when there is one.
    fn source_dir(&self, _name: &str) -> Option<PathBuf> {
        None
    }

    fn read_tree(&self, name: &str) -> io::Result<SkillTree>;

    fn read_file(&self, name: &str, relative: &Path) -> io::Result<Option<Vec<u8>>>;
}

pub trait SkillStore: SkillSource {
    fn root(&self) -> &Path;

    fn root_exists(&self) -> bool;

    /// Creates the root if needed. Returns `true` when it was created.
    fn ensure_root(&mut self) -> io::Result<bool>;

    /// Names of every skill directory under the root, sorted.
    fn names(&self) -> io::Result<Vec<String>>;

    fn write_tree(&mut self, name: &str, tree: &SkillTree) -> io::Result<()>;

    /// Copies skill `name` from `source` over whatever is stored under the same name.
    fn put(&mut self, name: &str, source: &dyn SkillSource) -> io::Result<()> {
        let tree = source.read_tree(name)?;
        self.write_tree(name, &tree)
    }

    /// Returns `true` if something was removed.
    fn remove(&mut self, name: &str) -> io::Result<bool>;

    /// Removes the root if it is empty, then its parent if that became empty.
    fn prune(&mut self) -> io::Result<Pruned>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn tree_load_and_write() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("skill");
        std::fs::create_dir_all(src.join("refs")).unwrap();
        std::fs::write(src.join("SKILL.md"), "# s").unwrap();
        std::fs::write(src.join("refs/a.md"), "a").unwrap();

        let tree = SkillTree::load(&src).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(Path::new("refs/a.md")), Some(b"a".as_slice()));

        let dest = tmp.path().join("copy");
        tree.write_to(&dest).unwrap();
        assert_eq!(SkillTree::load(&dest).unwrap(), tree);
    }

    #[cfg(unix)]
    #[test]
    fn tree_load_follows_symlinks() {
        let tmp = TempDir::new().unwrap();
        let shared = tmp.path().join("shared");
        let src = tmp.path().join("skill");
        std::fs::create_dir_all(&shared).unwrap();
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(shared.join("guide.md"), "g").unwrap();
        std::fs::write(src.join("SKILL.md"), "# s").unwrap();
        std::os::unix::fs::symlink(&shared, src.join("references")).unwrap();

        let tree = SkillTree::load(&src).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(Path::new("references/guide.md")), Some(b"g".as_slice()));
    }

    #[test]
    fn tree_load_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let err = SkillTree::load(&tmp.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn merge_overwrites_matching_paths() {
        let mut base = SkillTree::new()
            .with_file("SKILL.md", "old")
            .with_file("keep.md", "keep");
        base.merge(&SkillTree::new().with_file("SKILL.md", "new"));

        assert_eq!(base.get(Path::new("SKILL.md")), Some(b"new".as_slice()));
        assert_eq!(base.get(Path::new("keep.md")), Some(b"keep".as_slice()));
    }
}
