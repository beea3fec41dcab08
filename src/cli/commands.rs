//! Command dispatch: wires CLI arguments to application services

use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::ReplayReport;
use crate::application::Outcome;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{render_forest, Forest};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::IdStyle;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let command = cli
        .command
        .as_ref()
        .ok_or_else(|| CliError::Usage("no command given, see --help".into()))?;

    // completions need no settings
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings loaded");

    match command {
        Commands::Show { ids } => cmd_show(settings, *ids),
        Commands::Run {
            script,
            strict,
            empty,
            check,
            ids,
            id_style,
        } => cmd_run(
            settings,
            script,
            RunOptions {
                strict: *strict,
                empty: *empty,
                check: *check,
                ids: *ids,
                id_style: *id_style,
            },
        ),
        Commands::Check { script, empty } => cmd_check(settings, script, *empty),
        Commands::Config { command } => cmd_config(&settings, command),
        Commands::Completion { .. } => Ok(()),
    }
}

#[derive(Debug, Clone, Copy)]
struct RunOptions {
    strict: bool,
    empty: bool,
    check: bool,
    ids: bool,
    id_style: Option<IdStyle>,
}

fn print_outline(forest: &Forest, show_ids: bool) -> CliResult<()> {
    let tree = render_forest(forest, show_ids);
    writeln!(io::stdout().lock(), "{}", tree).map_err(|e| InfraError::io("write outline", e))?;
    Ok(())
}

fn report_unchanged(report: &ReplayReport) {
    for step in &report.steps {
        if let Outcome::Unchanged(reason) = &step.outcome {
            output::no_effect(step.line, &step.command, reason);
        }
    }
}

/// The outline a session starts from under these settings.
fn starting_outline(settings: Settings) -> Forest {
    ServiceContainer::new(settings).session(false).into_snapshot()
}

#[instrument(skip(settings))]
fn cmd_show(settings: Settings, ids: bool) -> CliResult<()> {
    print_outline(&starting_outline(settings), ids)
}

#[instrument(skip(settings))]
fn cmd_run(mut settings: Settings, script: &Path, opts: RunOptions) -> CliResult<()> {
    if let Some(style) = opts.id_style {
        settings.id_style = style;
    }
    if opts.strict {
        settings.strict = true;
    }

    let container = ServiceContainer::new(settings);
    let service = container.script_service();
    let lines = service.load(script)?;

    let mut session = container.session(opts.empty);
    let report = service.replay(&mut session, &lines, opts.check)?;

    report_unchanged(&report);
    print_outline(session.snapshot(), opts.ids)?;
    output::success(&format!(
        "{} commands, {} changed the outline, {} had no effect",
        report.steps.len(),
        report.changed(),
        report.unchanged()
    ));
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_check(settings: Settings, script: &Path, empty: bool) -> CliResult<()> {
    let container = ServiceContainer::new(settings);
    let service = container.script_service();
    let lines = service.load(script)?;

    let mut session = container.session(empty);
    session.set_strict(false);
    match service.replay(&mut session, &lines, true) {
        Ok(report) => {
            output::success(&format!(
                "invariants hold after all {} commands ({} nodes)",
                report.steps.len(),
                session.snapshot().len()
            ));
            Ok(())
        }
        Err(e) => {
            output::failure(&e);
            Err(e.into())
        }
    }
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => return Err(CliError::Usage("cannot determine config directory".into())),
        },
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_seed_disabled_when_showing_then_outline_is_empty() {
        let settings = Settings {
            seed: false,
            ..Settings::default()
        };
        assert!(starting_outline(settings).is_empty());
    }

    #[test]
    fn given_default_settings_when_showing_then_sample_outline() {
        assert_eq!(
            starting_outline(Settings::default()),
            crate::domain::sample_outline()
        );
    }
}
