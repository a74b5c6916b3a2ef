use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{Pruned, SkillSource, SkillStore, SkillTree};
use crate::fsutil::{copy_dir_recursive, remove_dir_if_empty};

/// A directory whose immediate subdirectories are skills.
#[derive(Debug, Clone)]
pub struct FsSkillStore {
    root: PathBuf,
}

impl FsSkillStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl SkillSource for FsSkillStore {
    fn location(&self, name: &str) -> String {
        self.path(name).display().to_string()
    }

    fn contains(&self, name: &str) -> bool {
        self.path(name).is_dir()
    }

    fn source_dir(&self, name: &str) -> Option<PathBuf> {
        Some(self.path(name))
    }

    fn read_tree(&self, name: &str) -> io::Result<SkillTree> {
        SkillTree::load(&self.path(name))
    }

    fn read_file(&self, name: &str, relative: &Path) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path(name).join(relative)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl SkillStore for FsSkillStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn root_exists(&self) -> bool {
        self.root.is_dir()
    }

    fn ensure_root(&mut self) -> io::Result<bool> {
        if self.root_exists() {
            return Ok(false);
        }
        fs::create_dir_all(&self.root)?;
        Ok(true)
    }

    fn names(&self) -> io::Result<Vec<String>> {
        if !self.root_exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::warn!("Skipping non UTF-8 entry: {:?}", raw),
            }
        }
        names.sort();
        Ok(names)
    }

    fn write_tree(&mut self, name: &str, tree: &SkillTree) -> io::Result<()> {
        tree.write_to(&self.path(name))
    }

    fn put(&mut self, name: &str, source: &dyn SkillSource) -> io::Result<()> {
        let dest = self.path(name);
        match source.source_dir(name) {
            Some(dir) => {
                let copied = copy_dir_recursive(&dir, &dest)?;
                tracing::debug!(skill = name, files = copied, "Copied skill directory");
                Ok(())
            }
            None => source.read_tree(name)?.write_to(&dest),
        }
    }

    fn remove(&mut self, name: &str) -> io::Result<bool> {
        let path = self.path(name);
        let metadata = match fs::symlink_metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };

        if metadata.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        Ok(true)
    }

    fn prune(&mut self) -> io::Result<Pruned> {
        let root = remove_dir_if_empty(&self.root)?;
        let parent = match self.root.parent() {
            Some(parent) if root => remove_dir_if_empty(parent)?,
            _ => false,
        };
        Ok(Pruned { root, parent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn skill(root: &Path, name: &str) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("SKILL.md"), format!("# {name}\n")).unwrap();
    }

    #[test]
    fn put_copies_from_directory_source() {
        let tmp = TempDir::new().unwrap();
        let package = FsSkillStore::new(tmp.path().join("pkg/skills"));
        skill(package.root(), "alpha");

        let mut target = FsSkillStore::new(tmp.path().join("home/.claude/skills"));
        target.put("alpha", &package).unwrap();

        assert!(target.contains("alpha"));
        assert_eq!(
            target.read_tree("alpha").unwrap(),
            package.read_tree("alpha").unwrap()
        );
    }

    #[test]
    fn names_lists_only_directories() {
        let tmp = TempDir::new().unwrap();
        let store = FsSkillStore::new(tmp.path());
        skill(tmp.path(), "b");
        skill(tmp.path(), "a");
        fs::write(tmp.path().join("README.md"), "x").unwrap();

        assert_eq!(store.names().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn read_file_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = FsSkillStore::new(tmp.path());
        skill(tmp.path(), "a");

        assert!(store.read_file("a", Path::new("SKILL.md")).unwrap().is_some());
        assert!(store.read_file("a", Path::new("other.md")).unwrap().is_none());
    }

    #[test]
    fn remove_reports_presence() {
        let tmp = TempDir::new().unwrap();
        let mut store = FsSkillStore::new(tmp.path());
        skill(tmp.path(), "a");

        assert!(store.remove("a").unwrap());
        assert!(!store.remove("a").unwrap());
        assert!(!tmp.path().join("a").exists());
    }

    #[test]
    fn prune_cascades_to_empty_parent() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join(".claude/skills");
        fs::create_dir_all(&root).unwrap();
        let mut store = FsSkillStore::new(&root);

        let pruned = store.prune().unwrap();
        assert_eq!(pruned, Pruned { root: true, parent: true });
        assert!(!tmp.path().join(".claude").exists());
        assert!(tmp.path().exists());
    }

    #[test]
    fn prune_keeps_occupied_parent() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join(".claude/skills");
        fs::create_dir_all(&root).unwrap();
        fs::write(tmp.path().join(".claude/settings.json"), "{}").unwrap();
        let mut store = FsSkillStore::new(&root);

        let pruned = store.prune().unwrap();
        assert_eq!(pruned, Pruned { root: true, parent: false });
        assert!(tmp.path().join(".claude/settings.json").exists());
    }

    #[test]
    fn prune_keeps_non_empty_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join(".claude/skills");
        skill(&root, "someone-else");
        let mut store = FsSkillStore::new(&root);

        assert_eq!(store.prune().unwrap(), Pruned::default());
        assert!(root.join("someone-else").exists());
    }
}
