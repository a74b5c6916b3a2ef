use anyhow::Result;
use clap::Parser;
use intuition_cli::logging;
use intuition_cli::skills::{self, SkillsCommands};
use intuition_core::{Config, Layout};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "intuition-skills")]
#[command(
    about = "Install, remove and inspect the Intuition skills for Claude Code",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: SkillsCommands,

    /// Package directory containing skills/ (defaults to the executable's package)
    #[arg(long, global = true, value_name = "DIR")]
    package_root: Option<PathBuf>,

    /// Install target (defaults to ~/.claude/skills)
    #[arg(long, global = true, value_name = "DIR")]
    target_dir: Option<PathBuf>,

    /// Alternate skill manifest (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Log diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default()?.with_env();
    if let Some(root) = cli.package_root {
        config.package_root = Some(root);
    }
    if let Some(target) = cli.target_dir {
        config.target_dir = Some(target);
    }
    if let Some(manifest) = cli.manifest {
        config.manifest = Some(manifest);
    }

    let manifest = config.load_manifest()?;
    let layout = Layout::resolve(&config)?;
    tracing::debug!(?layout, skills = manifest.len(), "Resolved configuration");

    skills::handle_command(cli.command, &manifest, &layout, &mut std::io::stdout().lock())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let prefix = cli.command.prefix();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let mut stderr = std::io::stderr().lock();
            if let Err(write_err) = skills::report_error(prefix, &e, &mut stderr) {
                tracing::warn!("Failed to write error: {}", write_err);
            }
            tracing::debug!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}
