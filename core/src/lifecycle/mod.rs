pub mod installer;
pub mod inventory;
pub mod uninstaller;

pub use installer::{InstallReport, Installer};
pub use inventory::{Inventory, InventoryItem, SkillState, take_inventory};
pub use uninstaller::{UninstallReport, Uninstaller};

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("{name} skill not found at {location}")]
    MissingSource { name: String, location: String },
    #[error("Verification failed - skills not properly installed: {}", .missing.join(", "))]
    VerificationFailed { missing: Vec<String> },
    #[error("Failed to {action} {target}: {source}")]
    Io {
        action: &'static str,
        target: String,
        #[source]
        source: io::Error,
    },
}

impl LifecycleError {
    pub(crate) fn io(
        action: &'static str,
        target: impl Into<String>,
    ) -> impl FnOnce(io::Error) -> Self {
        let target = target.into();
        move |source| Self::Io {
            action,
            target,
            source,
        }
    }
}

/// Progress reported while installing or uninstalling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    RootCreated { path: PathBuf },
    LegacyRemoved {
        name: String,
        replaced_by: Option<String>,
        location: String,
    },
    Installed { name: String, location: String },
    Removed { name: String, location: String },
    RootPruned { path: PathBuf },
    ParentPruned { path: PathBuf },
    NothingToClean { path: PathBuf },
}

pub type Observer<'a> = Box<dyn FnMut(&LifecycleEvent) + 'a>;

pub(crate) fn notify(observer: &mut Option<Observer<'_>>, event: LifecycleEvent) {
    tracing::debug!(?event, "Lifecycle event");
    if let Some(observer) = observer.as_mut() {
        observer(&event);
    }
}
