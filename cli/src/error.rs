use std::path::PathBuf;
use thiserror::Error;

/// Bad invocation of the dev CLI. Always carries a hint for the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("plan command requires a description")]
    MissingDescription,
    #[error("unknown memory subcommand")]
    UnknownMemorySubcommand,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}

impl UsageError {
    pub fn hint(&self) -> &'static str {
        match self {
            Self::MissingDescription => "Usage: intuition plan \"description\"",
            Self::UnknownMemorySubcommand => "Usage: intuition memory setup",
            Self::UnknownCommand(_) => "Run \"intuition help\" for usage information",
        }
    }
}

/// A definition file the dev CLI needs is missing or has no body.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Agent '{name}' not found at {}", .path.display())]
    AgentNotFound { name: String, path: PathBuf },
    #[error("Agent definition for '{0}' is empty")]
    EmptyAgent(String),
    #[error("Project memory skill not found at {}", .path.display())]
    SkillNotFound { path: PathBuf },
    #[error("Project memory skill definition is empty")]
    EmptySkill,
}
