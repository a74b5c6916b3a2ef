pub mod commands;
pub mod error;
pub mod logging;
pub mod skills;
pub mod templates;

pub use commands::DevCommand;
pub use error::{DefinitionError, UsageError};
