use std::io::Write;

use clap_complete::{generate, shells};
use colored::Colorize;
use tracing::debug;

use crate::{
    cli::{self, Shell},
    error::AppError,
    git::{Identity, IdentityBridge, Scope},
    profile::Profile,
    storage::ProfileStore,
    validation::{Prompter, fill_missing, require_profile, supplied},
};

/// Result of `add`: either existing values were shown or new ones saved
#[derive(Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Shown(Profile),
    Saved(Profile),
}

/// Applies a stored profile as the live git identity
pub fn switch_profile<G: IdentityBridge, W: Write>(
    store: &ProfileStore,
    git: &G,
    key: &str,
    scope: Scope,
    out: &mut W,
) -> Result<(), AppError> {
    let profiles = store.load()?;
    let profile = profiles.require(key)?;

    debug!(profile = key, %scope, "switching identity");
    git.write_identity(&Identity::new(&profile.name, &profile.email), scope)?;

    writeln!(
        out,
        "{}",
        format!("switched to '{key}' profile {}", scope.describe()).green()
    )?;
    write_profile_details(out, profile)?;
    Ok(())
}

/// Lists every stored profile, marking those matching the live identity
pub fn list_profiles<G: IdentityBridge, W: Write>(
    store: &ProfileStore,
    git: &G,
    out: &mut W,
) -> Result<(), AppError> {
    let profiles = store.load()?;
    if profiles.is_empty() {
        writeln!(out, "{}", "no profiles stored".yellow())?;
        return Ok(());
    }

    let live = git.read_identity();
    let current = profiles.current_keys(live.as_ref());

    writeln!(out, "{}", "available profiles:".blue())?;
    writeln!(out, "{}", "-".repeat(50))?;
    for (key, profile) in profiles.iter() {
        if current.contains(&key.as_str()) {
            writeln!(out, "{}", format!("→ {key}").green())?;
        } else {
            writeln!(out, "  {key}")?;
        }
        write_profile_details(out, profile)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Adds, updates, or shows a profile
///
/// An existing key without both values is shown, not modified. Otherwise
/// missing values are prompted for (when a prompter is given) and the
/// profile is overwritten.
pub fn add_profile<W: Write>(
    store: &ProfileStore,
    key: &str,
    name: Option<String>,
    email: Option<String>,
    prompter: Option<Prompter<'_>>,
    out: &mut W,
) -> Result<AddOutcome, AppError> {
    let mut profiles = store.load()?;
    let name = supplied(name);
    let email = supplied(email);

    if let Some(existing) = profiles.get(key) {
        if name.is_none() || email.is_none() {
            writeln!(out, "{}", format!("profile '{key}' already exists:").yellow())?;
            write_profile_details(out, existing)?;
            writeln!(out, "\nto update, provide both name and email")?;
            return Ok(AddOutcome::Shown(existing.clone()));
        }
    }

    let name = fill_missing(name, "enter name:", prompter)?;
    let email = fill_missing(email, "enter email:", prompter)?;
    let profile = require_profile(name, email)?;

    profiles.upsert(key, profile.clone());
    store.save(&profiles)?;

    writeln!(out, "{}", format!("profile '{key}' saved").green())?;
    write_profile_details(out, &profile)?;
    writeln!(out, "\nuse: git-me {key}")?;
    Ok(AddOutcome::Saved(profile))
}

/// Deletes a single profile from the store
pub fn remove_profile<W: Write>(
    store: &ProfileStore,
    key: &str,
    out: &mut W,
) -> Result<Profile, AppError> {
    let mut profiles = store.load()?;
    let removed = profiles.remove(key)?;
    store.save(&profiles)?;

    writeln!(out, "{}", format!("profile '{key}' removed").green())?;
    Ok(removed)
}

/// Shows the live git identity
pub fn show_current<G: IdentityBridge, W: Write>(
    git: &G,
    out: &mut W,
) -> Result<Option<Identity>, AppError> {
    let live = git.read_identity();
    match &live {
        Some(identity) => {
            writeln!(out, "{}", "current git identity:".blue())?;
            writeln!(out, "   Name:  {}", identity.name)?;
            writeln!(out, "   Email: {}", identity.email)?;
        }
        None => writeln!(out, "{}", "no git identity configured".red())?,
    }
    Ok(live)
}

/// Writes a completion script offering the stored profile keys
pub fn generate_completion<W: Write>(
    store: &ProfileStore,
    shell: Shell,
    out: &mut W,
) -> Result<(), AppError> {
    let profiles = store.load()?;
    let mut cmd = cli::command_with_profiles(&profiles.keys());
    let name = cmd.get_name().to_string();

    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, &name, out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, &name, out),
        Shell::Fish => generate(shells::Fish, &mut cmd, &name, out),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, &name, out),
    }
    Ok(())
}

fn write_profile_details<W: Write>(out: &mut W, profile: &Profile) -> Result<(), AppError> {
    writeln!(out, "   Name:  {}", profile.name)?;
    writeln!(out, "   Email: {}", profile.email)?;
    Ok(())
}
