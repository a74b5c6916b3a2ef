use anyhow::Result;
use console::style;
use intuition_cli::{DevCommand, UsageError, logging};
use intuition_core::{Config, Layout};
use std::process::ExitCode;

fn resolve_layout() -> Result<Layout> {
    let config = Config::load_or_default()?.with_env();
    Layout::resolve(&config)
}

fn main() -> ExitCode {
    logging::init(false);

    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());

    let command = match DevCommand::parse(args) {
        Ok(command) => command,
        Err(e) => {
            report_usage(&e);
            return ExitCode::FAILURE;
        }
    };

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| command.run(resolve_layout, &cwd, &mut std::io::stdout().lock()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            tracing::debug!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}

fn report_usage(e: &UsageError) {
    eprintln!("{} {}", style("Error:").red().bold(), e);
    eprintln!("{}", e.hint());
}
