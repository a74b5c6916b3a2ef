use super::{LifecycleError, LifecycleEvent, Observer, notify};
use crate::skills::Manifest;
use crate::store::{Pruned, SkillStore};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallReport {
    pub nothing_to_clean: bool,
    pub removed: Vec<String>,
    pub pruned: Pruned,
}

/// Removes every skill a manifest names, current and legacy alike, then
/// prunes the root (and its parent) if nothing else lives there.
pub struct Uninstaller<'a> {
    manifest: &'a Manifest,
    observer: Option<Observer<'a>>,
}

impl<'a> Uninstaller<'a> {
    pub fn new(manifest: &'a Manifest) -> Self {
        Self {
            manifest,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: impl FnMut(&LifecycleEvent) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn run(&mut self, store: &mut dyn SkillStore) -> Result<UninstallReport, LifecycleError> {
        let manifest = self.manifest;
        let root = store.root().to_path_buf();
        let mut report = UninstallReport::default();

        if !store.root_exists() {
            tracing::info!(target_dir = %root.display(), "Skills directory absent");
            report.nothing_to_clean = true;
            notify(&mut self.observer, LifecycleEvent::NothingToClean { path: root });
            return Ok(report);
        }

        for entry in manifest.entries() {
            let location = store.location(&entry.name);
            let removed = store
                .remove(&entry.name)
                .map_err(LifecycleError::io("remove", location.clone()))?;
            if removed {
                report.removed.push(entry.name.clone());
                notify(
                    &mut self.observer,
                    LifecycleEvent::Removed {
                        name: entry.name.clone(),
                        location,
                    },
                );
            }
        }

        report.pruned = store
            .prune()
            .map_err(LifecycleError::io("clean up", root.display().to_string()))?;
        if report.pruned.root {
            notify(
                &mut self.observer,
                LifecycleEvent::RootPruned { path: root.clone() },
            );
        }
        if report.pruned.parent
            && let Some(parent) = root.parent()
        {
            notify(
                &mut self.observer,
                LifecycleEvent::ParentPruned {
                    path: parent.to_path_buf(),
                },
            );
        }

        tracing::info!(removed = report.removed.len(), "Uninstall complete");
        Ok(report)
    }
}
