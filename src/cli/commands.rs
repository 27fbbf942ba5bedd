//! Subcommand dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::menu::{print_summary, print_traversal, Menu};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;

/// Load settings for this invocation, honoring `--config` and `--no-seed`.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.no_seed {
        settings.seed_examples = false;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = load_settings(cli)?;
    let mut container = ServiceContainer::new(settings);

    match &cli.command {
        None | Some(Commands::Menu) => _menu(&mut container),
        Some(Commands::Show) => _show(&container),
        Some(Commands::Traverse { order }) => {
            print_traversal(&container.catalog, (*order).into());
            Ok(())
        }
        Some(Commands::Search { name }) => _search(&container, name),
        Some(Commands::Config { command }) => _config(&container, command),
        Some(Commands::Completion { .. }) => Ok(()),
    }
}

#[instrument(skip_all)]
fn _menu(container: &mut ServiceContainer) -> CliResult<()> {
    if container.settings.seed_examples {
        output::info("Example species have been pre-inserted.");
    }
    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), container.settings.confirm_delete);
    let result = menu.run(&mut container.catalog);

    let released = container.catalog.clear();
    output::info(&format!("Exiting. Released {} nodes.", released));
    result
}

#[instrument(skip_all)]
fn _show(container: &ServiceContainer) -> CliResult<()> {
    if container.catalog.tree().is_empty() {
        output::info("The tree is currently empty.");
    } else {
        output::info(&container.catalog.render());
    }
    Ok(())
}

#[instrument(skip(container))]
fn _search(container: &ServiceContainer, name: &str) -> CliResult<()> {
    match container.catalog.lookup(name)? {
        Some(summary) => {
            print_summary(&summary);
            Ok(())
        }
        None => Err(ApplicationError::NotFound(name.to_string()).into()),
    }
}

#[instrument(skip_all)]
fn _config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("no config directory on this platform".to_string()))?;
            output::info(&path.display());
            Ok(())
        }
    }
}
