use anyhow::{Context, Result};
use intuition_core::Layout;
use intuition_core::skills::read_document;
use std::io::Write;
use std::path::Path;

use crate::error::DefinitionError;

const INITIALIZE_SKILL: &str = "intuition-initialize";

/// `intuition memory setup`. An existing notes directory is only listed,
/// never modified.
pub fn setup_memory(layout: &Layout, cwd: &Path, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Initializing project memory system...\n")?;

    let notes_dir = layout.notes_dir(cwd);
    if notes_dir.exists() {
        writeln!(
            out,
            "Project memory already initialized at: {}",
            notes_dir.display()
        )?;
        writeln!(out, "Memory files:")?;
        for file in list_markdown_files(&notes_dir)? {
            writeln!(out, "  - {file}")?;
        }
        return Ok(());
    }

    let skill_path = layout.skill_file(INITIALIZE_SKILL);
    if !skill_path.is_file() {
        return Err(DefinitionError::SkillNotFound { path: skill_path }.into());
    }

    let definition = read_document(&skill_path)?;
    if definition.body.is_empty() {
        return Err(DefinitionError::EmptySkill.into());
    }

    writeln!(out, "Setting up project memory structure...")?;
    writeln!(
        out,
        "\nSkill Definition Loaded ({} characters)",
        definition.body.chars().count()
    )?;
    writeln!(out, "\nInvoking {INITIALIZE_SKILL} skill...\n")?;
    writeln!(out, "(In actual usage, this invokes the {INITIALIZE_SKILL} skill)")?;
    writeln!(
        out,
        "(This creates: docs/project_notes/ with bugs.md, decisions.md, key_facts.md, issues.md)"
    )?;
    writeln!(out, "(Skill has full context of setup procedures)\n")?;
    writeln!(out, "Memory system ready! You can now use:")?;
    writeln!(out, "  intuition plan \"your description\"")?;
    writeln!(out, "  intuition execute\n")?;
    Ok(())
}

fn list_markdown_files(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read notes directory {}", dir.display()))?;

    let mut files: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".md"))
        .collect();
    files.sort();
    Ok(files)
}
