use anyhow::Result;
use intuition_core::Layout;
use intuition_core::skills::read_document;
use std::io::Write;

use crate::error::DefinitionError;
use crate::templates::SEPARATOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agent {
    /// Planning agent behind `intuition plan`.
    Waldo,
    /// Execution agent behind `intuition execute`.
    Architect,
}

impl Agent {
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Waldo => "waldo",
            Self::Architect => "architect",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Waldo => "Waldo",
            Self::Architect => "Architect",
        }
    }
}

/// Loads the agent definition and prints what invoking it would do.
pub fn invoke_agent(
    layout: &Layout,
    agent: Agent,
    description: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let path = layout.agent_path(agent.file_stem());
    if !path.is_file() {
        return Err(DefinitionError::AgentNotFound {
            name: agent.file_stem().to_string(),
            path,
        }
        .into());
    }

    let definition = read_document(&path)?;
    if definition.body.is_empty() {
        return Err(DefinitionError::EmptyAgent(agent.file_stem().to_string()).into());
    }
    let length = definition.body.chars().count();
    tracing::debug!(agent = agent.file_stem(), length, "Agent definition loaded");

    let name = agent.display_name();
    writeln!(out, "\nInvoking {name}...")?;
    writeln!(out, "{SEPARATOR}\n")?;

    match agent {
        Agent::Waldo => {
            let task = if description.is_empty() {
                "General planning"
            } else {
                description
            };
            writeln!(out, "Planning Task: {task}")?;
            writeln!(out, "\nAgent Definition Loaded ({length} characters)")?;
            writeln!(out, "\nInvoking {name} agent for planning...\n")?;
            writeln!(out, "(In actual usage, this invokes the {name} planning agent)")?;
            writeln!(out, "({name} now has full context of the agent definition)")?;
            writeln!(
                out,
                "(Check docs/project_notes/ after {name} completes for the plan)\n"
            )?;
        }
        Agent::Architect => {
            writeln!(out, "Execution Task: Read plan and execute")?;
            writeln!(out, "\nAgent Definition Loaded ({length} characters)")?;
            writeln!(out, "\nInvoking {name} agent for execution...\n")?;
            writeln!(out, "(In actual usage, this invokes the {name} execution agent)")?;
            writeln!(out, "({name} has full context of the agent definition)")?;
            writeln!(out, "({name} reads the plan from docs/project_notes/)\n")?;
        }
    }
    Ok(())
}
