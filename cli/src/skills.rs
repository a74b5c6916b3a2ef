use anyhow::Result;
use console::style;
use intuition_core::lifecycle::SkillState;
use intuition_core::{
    FsSkillStore, Installer, Layout, LifecycleError, LifecycleEvent, Manifest, Uninstaller,
    take_inventory,
};
use std::io::{self, Write};

use crate::templates::{INSTALL_PREFIX, SKILLS_PREFIX, UNINSTALL_PREFIX};

#[derive(clap::Subcommand, Clone, Debug)]
pub enum SkillsCommands {
    /// Copy every bundled skill into the target directory
    Install,
    /// Remove every managed skill, current and legacy
    Uninstall,
    /// Show which managed skills are installed
    List,
}

impl SkillsCommands {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Install => INSTALL_PREFIX,
            Self::Uninstall => UNINSTALL_PREFIX,
            Self::List => SKILLS_PREFIX,
        }
    }
}

pub fn handle_command(
    command: SkillsCommands,
    manifest: &Manifest,
    layout: &Layout,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        SkillsCommands::Install => install_skills(manifest, layout, out),
        SkillsCommands::Uninstall => uninstall_skills(manifest, layout, out),
        SkillsCommands::List => list_skills(manifest, layout, out),
    }
}

fn install_skills(manifest: &Manifest, layout: &Layout, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{INSTALL_PREFIX} Installing Intuition skills...")?;
    writeln!(
        out,
        "{INSTALL_PREFIX} Package root: {}",
        layout.package_root.display()
    )?;
    writeln!(
        out,
        "{INSTALL_PREFIX} Target directory: {}",
        layout.target_root.display()
    )?;

    let source = FsSkillStore::new(layout.skills_source_dir());
    let mut target = FsSkillStore::new(&layout.target_root);

    Installer::new(manifest, &source)
        .with_observer(|event| print_event(INSTALL_PREFIX, event, &mut *out))
        .run(&mut target)?;

    writeln!(
        out,
        "{INSTALL_PREFIX} {} Installation complete!",
        style("✓").green().bold()
    )?;
    writeln!(out, "{INSTALL_PREFIX} Skills are now available globally:")?;
    let width = manifest
        .current()
        .map(|e| e.name.len() + 1)
        .max()
        .unwrap_or_default();
    for entry in manifest.current() {
        let command = format!("/{}", entry.name);
        writeln!(
            out,
            "{INSTALL_PREFIX}   {command:<width$}  - {}",
            entry.summary
        )?;
    }
    writeln!(
        out,
        "{INSTALL_PREFIX} \nYou can now use these skills in any project with Claude Code."
    )?;
    Ok(())
}

fn uninstall_skills(manifest: &Manifest, layout: &Layout, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{UNINSTALL_PREFIX} Uninstalling Intuition skills...")?;
    writeln!(
        out,
        "{UNINSTALL_PREFIX} Target directory: {}",
        layout.target_root.display()
    )?;

    let mut target = FsSkillStore::new(&layout.target_root);
    let report = Uninstaller::new(manifest)
        .with_observer(|event| print_event(UNINSTALL_PREFIX, event, &mut *out))
        .run(&mut target)?;

    if !report.nothing_to_clean {
        writeln!(
            out,
            "{UNINSTALL_PREFIX} {} Uninstallation complete!",
            style("✓").green().bold()
        )?;
    }
    Ok(())
}

fn list_skills(manifest: &Manifest, layout: &Layout, out: &mut dyn Write) -> Result<()> {
    let store = FsSkillStore::new(&layout.target_root);
    let inventory = take_inventory(manifest, &store)?;

    if !inventory.root_exists {
        writeln!(
            out,
            "{} No skills directory found at {}",
            style("!").yellow(),
            inventory.root.display()
        )?;
        writeln!(out, "  Run: intuition-skills install")?;
        return Ok(());
    }

    writeln!(
        out,
        "{} Installed skills ({}/{})",
        style("✓").green().bold(),
        inventory.installed().count(),
        manifest.current().count()
    )?;
    writeln!(out)?;

    for item in &inventory.items {
        let about = item.description.as_deref().unwrap_or(&item.summary);
        match item.state {
            SkillState::Installed => writeln!(
                out,
                "  {} /{} — {}",
                style("✓").green(),
                style(&item.name).white().bold(),
                about
            )?,
            SkillState::Missing => writeln!(
                out,
                "  {} /{} — not installed",
                style("✗").red(),
                style(&item.name).dim()
            )?,
            SkillState::Lingering => writeln!(
                out,
                "  {} /{} — legacy skill still present, run: intuition-skills uninstall",
                style("!").yellow(),
                item.name
            )?,
            SkillState::Absent => {}
        }
    }

    if !inventory.unmanaged.is_empty() {
        writeln!(out)?;
        writeln!(out, "Other skills in {}:", inventory.root.display())?;
        for name in &inventory.unmanaged {
            writeln!(out, "  {name}")?;
        }
    }

    Ok(())
}

fn print_event(prefix: &str, event: &LifecycleEvent, out: &mut dyn Write) {
    let check = style("✓").green();
    let line = match event {
        LifecycleEvent::RootCreated { path } => format!("Created {}", path.display()),
        LifecycleEvent::LegacyRemoved {
            name, replaced_by, ..
        } => match replaced_by {
            Some(successor) => format!("Removed old /{name} skill (replaced by /{successor})"),
            None => format!("Removed old /{name} skill"),
        },
        LifecycleEvent::Installed { name, location } => {
            format!("{check} Installed /{name} skill to {location}")
        }
        LifecycleEvent::Removed { name, location } => {
            format!("{check} Removed /{name} skill from {location}")
        }
        LifecycleEvent::RootPruned { .. } => format!("{check} Removed empty skills directory"),
        LifecycleEvent::ParentPruned { path } => {
            let dir = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            format!("{check} Removed empty {dir} directory")
        }
        LifecycleEvent::NothingToClean { .. } => {
            "Skills directory not found - nothing to clean up".to_string()
        }
    };

    if let Err(e) = writeln!(out, "{prefix} {line}") {
        tracing::warn!("Failed to write progress: {}", e);
    }
}

/// Writes a failed command's error. Filesystem failures are unexpected, so
/// they also get the full cause chain.
pub fn report_error(prefix: &str, e: &anyhow::Error, err: &mut dyn Write) -> io::Result<()> {
    writeln!(err, "{} {} {:#}", prefix, style("ERROR:").red().bold(), e)?;
    if matches!(
        e.downcast_ref::<LifecycleError>(),
        Some(LifecycleError::Io { .. })
    ) {
        writeln!(err, "{e:?}")?;
    }
    Ok(())
}
