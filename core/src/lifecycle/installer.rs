use super::{LifecycleError, LifecycleEvent, Observer, notify};
use crate::skills::Manifest;
use crate::store::{SkillSource, SkillStore};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub root_created: bool,
    pub purged: Vec<String>,
    pub installed: Vec<String>,
}

/// Copies every current skill of a manifest from `source` into a store.
///
/// The first missing source aborts the pass. Skills copied before that point
/// stay installed; nothing is rolled back.
pub struct Installer<'a> {
    manifest: &'a Manifest,
    source: &'a dyn SkillSource,
    observer: Option<Observer<'a>>,
}

impl<'a> Installer<'a> {
    pub fn new(manifest: &'a Manifest, source: &'a dyn SkillSource) -> Self {
        Self {
            manifest,
            source,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: impl FnMut(&LifecycleEvent) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn run(&mut self, store: &mut dyn SkillStore) -> Result<InstallReport, LifecycleError> {
        let manifest = self.manifest;
        let source = self.source;
        let root = store.root().to_path_buf();
        let mut report = InstallReport::default();

        tracing::info!(
            target_dir = %root.display(),
            skills = manifest.current().count(),
            "Installing skills"
        );

        report.root_created = store
            .ensure_root()
            .map_err(LifecycleError::io("create", root.display().to_string()))?;
        if report.root_created {
            notify(&mut self.observer, LifecycleEvent::RootCreated { path: root });
        }

        for entry in manifest.legacy().filter(|e| e.purge_on_install()) {
            let location = store.location(&entry.name);
            let removed = store
                .remove(&entry.name)
                .map_err(LifecycleError::io("remove", location.clone()))?;
            if removed {
                report.purged.push(entry.name.clone());
                notify(
                    &mut self.observer,
                    LifecycleEvent::LegacyRemoved {
                        name: entry.name.clone(),
                        replaced_by: entry.replacement().map(str::to_string),
                        location,
                    },
                );
            }
        }

        for entry in manifest.current() {
            let name = entry.name.as_str();
            if !source.contains(name) {
                tracing::error!(skill = name, "Skill source missing, aborting install");
                return Err(LifecycleError::MissingSource {
                    name: name.to_string(),
                    location: source.location(name),
                });
            }

            let location = store.location(name);
            store
                .put(name, source)
                .map_err(LifecycleError::io("install", location.clone()))?;
            report.installed.push(name.to_string());
            notify(
                &mut self.observer,
                LifecycleEvent::Installed {
                    name: name.to_string(),
                    location,
                },
            );
        }

        let missing: Vec<String> = manifest
            .current()
            .filter(|e| !store.contains(&e.name))
            .map(|e| e.name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(LifecycleError::VerificationFailed { missing });
        }

        tracing::info!(
            installed = report.installed.len(),
            purged = report.purged.len(),
            "Install complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::ManifestEntry;
    use crate::store::{InMemoryStore, SkillTree};
    use std::path::Path;

    fn manifest() -> Manifest {
        Manifest::new(vec![
            ManifestEntry::current("alpha", "First"),
            ManifestEntry::current("beta", "Second"),
            ManifestEntry::current("gamma", "Third"),
            ManifestEntry::legacy("old-alpha").replaced_by("alpha"),
            ManifestEntry::legacy("retired"),
        ])
        .unwrap()
    }

    fn tree(name: &str) -> SkillTree {
        SkillTree::new()
            .with_file("SKILL.md", format!("# {name}\n"))
            .with_file("refs/extra.md", "extra")
    }

    fn package(names: &[&str]) -> InMemoryStore {
        names
            .iter()
            .fold(InMemoryStore::new("/pkg/skills"), |store, name| {
                store.with_skill(*name, tree(name))
            })
    }

    #[test]
    fn installs_every_current_skill() {
        let manifest = manifest();
        let source = package(&["alpha", "beta", "gamma"]);
        let mut target = InMemoryStore::new("/home/u/.claude/skills");

        let mut events = Vec::new();
        let report = Installer::new(&manifest, &source)
            .with_observer(|e| events.push(e.clone()))
            .run(&mut target)
            .unwrap();

        assert!(report.root_created);
        assert_eq!(report.installed, vec!["alpha", "beta", "gamma"]);
        for name in ["alpha", "beta", "gamma"] {
            assert_eq!(target.tree(name), Some(&tree(name)));
        }
        assert!(!target.contains("retired"));
        assert_eq!(
            events[0],
            LifecycleEvent::RootCreated {
                path: "/home/u/.claude/skills".into()
            }
        );
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn missing_source_aborts_and_keeps_earlier_copies() {
        let manifest = manifest();
        let source = package(&["alpha", "gamma"]);
        let mut target = InMemoryStore::new("/home/u/.claude/skills");

        let err = Installer::new(&manifest, &source)
            .run(&mut target)
            .unwrap_err();

        match err {
            LifecycleError::MissingSource { name, location } => {
                assert_eq!(name, "beta");
                assert_eq!(location, Path::new("/pkg/skills/beta").display().to_string());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(target.contains("alpha"));
        assert!(!target.contains("gamma"));
    }

    #[test]
    fn purges_superseded_legacy_skills_only() {
        let manifest = manifest();
        let source = package(&["alpha", "beta", "gamma"]);
        let mut target = InMemoryStore::new("/home/u/.claude/skills")
            .with_skill("old-alpha", tree("old-alpha"))
            .with_skill("retired", tree("retired"));

        let report = Installer::new(&manifest, &source)
            .run(&mut target)
            .unwrap();

        assert!(!report.root_created);
        assert_eq!(report.purged, vec!["old-alpha"]);
        assert!(!target.contains("old-alpha"));
        assert!(target.contains("retired"));
    }

    #[test]
    fn reinstall_overwrites_existing_files() {
        let manifest = Manifest::new(vec![ManifestEntry::current("alpha", "")]).unwrap();
        let source = InMemoryStore::new("/pkg/skills")
            .with_skill("alpha", SkillTree::new().with_file("SKILL.md", "v2"));
        let mut target = InMemoryStore::new("/t").with_skill(
            "alpha",
            SkillTree::new()
                .with_file("SKILL.md", "v1")
                .with_file("local.md", "mine"),
        );

        Installer::new(&manifest, &source).run(&mut target).unwrap();

        let installed = target.tree("alpha").unwrap();
        assert_eq!(installed.get(Path::new("SKILL.md")), Some(b"v2".as_slice()));
        assert_eq!(installed.get(Path::new("local.md")), Some(b"mine".as_slice()));
    }
}
