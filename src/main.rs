//! git-me: store named Git identities and switch the active one.

mod cli;
mod commands;
mod error;
mod git;
mod profile;
mod storage;
mod validation;

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use clap::FromArgMatches;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Action, Cli},
    error::AppError,
    git::{GitCli, Scope},
    storage::{ProfileStore, default_profiles_path},
    validation::{Prompter, prompt_text},
};

/// Environment variable holding the log filter
const LOG_ENV: &str = "GIT_ME_LOG";

// Main
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let config_location = match default_profiles_path() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("<unavailable: {err}>"),
    };
    let mut command = cli::command_with_config_path(&config_location);
    let matches = command.clone().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

    let action = cli.action();
    if action == Action::Help {
        return match command.print_long_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    }

    match run(action) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            if matches!(err, AppError::ProfileNotFound { .. }) {
                eprintln!("use 'git-me add <profile> <name> <email>' to create a new profile");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(action: Action) -> Result<(), AppError> {
    let store = ProfileStore::open_default()?;
    debug!(path = %store.path().display(), "using profile store");
    let git = GitCli;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match action {
        Action::Switch { profile, global } => {
            commands::switch_profile(&store, &git, &profile, Scope::from_global_flag(global), &mut out)
        }
        Action::List => commands::list_profiles(&store, &git, &mut out),
        Action::Add { profile, name, email } => {
            let prompt: Prompter<'_> = &prompt_text;
            let prompter = io::stdin().is_terminal().then_some(prompt);
            commands::add_profile(&store, &profile, name, email, prompter, &mut out).map(|_| ())
        }
        Action::Remove { profile } => commands::remove_profile(&store, &profile, &mut out).map(|_| ()),
        Action::Current => commands::show_current(&git, &mut out).map(|_| ()),
        Action::Completion { shell } => commands::generate_completion(&store, shell, &mut out),
        Action::Version => {
            writeln!(out, "git-me version {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        Action::Help => Ok(()),
    }
}
