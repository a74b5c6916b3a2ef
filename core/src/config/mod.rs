use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::skills::{Manifest, SKILL_FILE};

const INTUITION_DIR: &str = ".intuition";
const CLAUDE_DIR: &str = ".claude";

pub const PACKAGE_ROOT_ENV: &str = "INTUITION_PACKAGE_ROOT";
pub const TARGET_DIR_ENV: &str = "INTUITION_TARGET_DIR";

/// Optional overrides read from `~/.intuition/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub package_root: Option<PathBuf>,
    pub target_dir: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
}

impl Config {
    pub fn load_or_default() -> Result<Self> {
        let path = get_config_path()?;
        if path.exists() {
            load_config(&path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var_os(key))
    }

    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        if let Some(root) = lookup(PACKAGE_ROOT_ENV).filter(|v| !v.is_empty()) {
            self.package_root = Some(PathBuf::from(root));
        }
        if let Some(target) = lookup(TARGET_DIR_ENV).filter(|v| !v.is_empty()) {
            self.target_dir = Some(PathBuf::from(target));
        }
        self
    }

    pub fn load_manifest(&self) -> Result<Manifest> {
        match &self.manifest {
            Some(path) => Manifest::load(path)
                .with_context(|| format!("Failed to load manifest from {}", path.display())),
            None => Manifest::builtin().context("Built-in manifest is invalid"),
        }
    }
}

pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Could not determine the home directory")
}

pub fn get_intuition_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(INTUITION_DIR))
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_intuition_dir()?.join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))
}

/// The binaries ship in `<packageRoot>/bin/`, so the package root sits two
/// levels above the executable.
pub fn default_package_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Could not locate the running executable")?;
    exe.parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .with_context(|| format!("Executable {} has no package root", exe.display()))
}

/// Every path the installer, uninstaller and dev CLI touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub package_root: PathBuf,
    pub home_dir: PathBuf,
    pub target_root: PathBuf,
}

impl Layout {
    pub fn new(package_root: impl Into<PathBuf>, home_dir: impl Into<PathBuf>) -> Self {
        let home_dir = home_dir.into();
        Self {
            package_root: package_root.into(),
            target_root: home_dir.join(CLAUDE_DIR).join("skills"),
            home_dir,
        }
    }

    pub fn with_target_root(mut self, target_root: impl Into<PathBuf>) -> Self {
        self.target_root = target_root.into();
        self
    }

    pub fn resolve(config: &Config) -> Result<Self> {
        let package_root = match &config.package_root {
            Some(root) => root.clone(),
            None => default_package_root()?,
        };

        let layout = Self::new(package_root, home_dir()?);
        Ok(match &config.target_dir {
            Some(target) => layout.with_target_root(target),
            None => layout,
        })
    }

    pub fn skills_source_dir(&self) -> PathBuf {
        self.package_root.join("skills")
    }

    pub fn agents_dir(&self) -> PathBuf {
        self.package_root.join("agents")
    }

    pub fn agent_path(&self, name: &str) -> PathBuf {
        self.agents_dir().join(format!("{name}.md"))
    }

    pub fn skill_file(&self, name: &str) -> PathBuf {
        self.skills_source_dir().join(name).join(SKILL_FILE)
    }

    pub fn package_metadata(&self) -> PathBuf {
        self.package_root.join("package.json")
    }

    pub fn notes_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join("docs").join("project_notes")
    }
}
