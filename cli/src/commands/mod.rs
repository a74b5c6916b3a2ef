//! Dev CLI dispatcher. Loads agent and skill definitions from the package and
//! describes what the hosting assistant would do with them; nothing is
//! actually invoked.

pub mod agent;
pub mod memory;

use anyhow::Result;
use intuition_core::Layout;
use serde::Deserialize;
use std::io::Write;
use std::path::Path;

use crate::error::UsageError;
use crate::templates::{HELP, HELP_HINT, TITLE};

pub use agent::{Agent, invoke_agent};
pub use memory::setup_memory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevCommand {
    Plan { description: String },
    Execute,
    MemorySetup,
    Help,
    Version,
    /// No command given.
    Hint,
}

impl DevCommand {
    /// Parses the arguments following the program name. Everything after the
    /// command word is joined with single spaces.
    pub fn parse<I, S>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let rest = args.get(1..).map(|r| r.join(" ")).unwrap_or_default();

        match args.first().map(String::as_str) {
            None | Some("") => Ok(Self::Hint),
            Some("plan") => {
                if rest.trim().is_empty() {
                    Err(UsageError::MissingDescription)
                } else {
                    Ok(Self::Plan { description: rest })
                }
            }
            Some("execute") => Ok(Self::Execute),
            Some("memory") => {
                if rest == "setup" {
                    Ok(Self::MemorySetup)
                } else {
                    Err(UsageError::UnknownMemorySubcommand)
                }
            }
            Some("help" | "-h" | "--help") => Ok(Self::Help),
            Some("version" | "-v" | "--version") => Ok(Self::Version),
            Some(other) => Err(UsageError::UnknownCommand(other.to_string())),
        }
    }

    /// Runs the command. `layout` is only resolved for commands that read
    /// from the package.
    pub fn run(
        &self,
        layout: impl FnOnce() -> Result<Layout>,
        cwd: &Path,
        out: &mut dyn Write,
    ) -> Result<()> {
        match self {
            Self::Hint => {
                writeln!(out, "{TITLE}\n")?;
                writeln!(out, "{HELP_HINT}\n")?;
            }
            Self::Help => writeln!(out, "{HELP}")?,
            Self::Version => {
                let line = match layout() {
                    Ok(layout) => version_line(&layout),
                    Err(e) => {
                        tracing::debug!("No package layout for version: {:#}", e);
                        UNKNOWN_VERSION.to_string()
                    }
                };
                writeln!(out, "{line}")?;
            }
            Self::Plan { description } => invoke_agent(&layout()?, Agent::Waldo, description, out)?,
            Self::Execute => invoke_agent(&layout()?, Agent::Architect, "", out)?,
            Self::MemorySetup => setup_memory(&layout()?, cwd, out)?,
        }
        Ok(())
    }
}

const UNKNOWN_VERSION: &str = "Intuition version unknown";

#[derive(Debug, Deserialize)]
struct PackageMetadata {
    version: String,
}

pub fn version_line(layout: &Layout) -> String {
    let path = layout.package_metadata();
    let metadata = std::fs::read_to_string(&path)
        .map_err(anyhow::Error::from)
        .and_then(|raw| Ok(serde_json::from_str::<PackageMetadata>(&raw)?));

    match metadata {
        Ok(metadata) => format!("Intuition v{}", metadata.version),
        Err(e) => {
            tracing::debug!("No version from {}: {}", path.display(), e);
            UNKNOWN_VERSION.to_string()
        }
    }
}
