pub mod config;
pub mod fsutil;
pub mod lifecycle;
pub mod skills;
pub mod store;

pub use config::{Config, Layout};
pub use lifecycle::{
    InstallReport, Installer, Inventory, LifecycleError, LifecycleEvent, UninstallReport,
    Uninstaller, take_inventory,
};
pub use skills::{Document, Manifest, ManifestEntry, parse_document};
pub use store::{FsSkillStore, InMemoryStore, SkillSource, SkillStore, SkillTree};
