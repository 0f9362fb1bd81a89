use std::{
    fmt,
    io::ErrorKind,
    process::{Command, Output},
};

use tracing::debug;

use crate::error::AppError;

/// Git config scope an identity is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Current repository only (`--local`)
    Local,
    /// Invoking user's defaults (`--global`)
    Global,
}

impl Scope {
    pub fn from_global_flag(global: bool) -> Self {
        if global { Scope::Global } else { Scope::Local }
    }

    fn flag(self) -> &'static str {
        match self {
            Scope::Local => "--local",
            Scope::Global => "--global",
        }
    }

    /// Human wording used in switch confirmations
    pub fn describe(self) -> &'static str {
        match self {
            Scope::Local => "for this repository",
            Scope::Global => "globally",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flag()[2..])
    }
}

/// A (user.name, user.email) pair as git sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Reads and writes the live git identity.
pub trait IdentityBridge {
    /// Effective identity, or `None` when either key is unset or git fails.
    fn read_identity(&self) -> Option<Identity>;

    /// Sets `user.name` then `user.email` at `scope`.
    ///
    /// The two writes are independent; a failure on the second leaves the
    /// first applied.
    fn write_identity(&self, identity: &Identity, scope: Scope) -> Result<(), AppError>;
}

/// Bridge backed by the `git` executable on PATH
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl IdentityBridge for GitCli {
    fn read_identity(&self) -> Option<Identity> {
        let read = || -> Result<Identity, AppError> {
            Ok(Identity {
                name: get_git_config("user.name")?,
                email: get_git_config("user.email")?,
            })
        };
        match read() {
            Ok(identity) if !identity.name.is_empty() && !identity.email.is_empty() => {
                Some(identity)
            }
            Ok(_) => None,
            Err(err) => {
                debug!(error = %err, "no live git identity");
                None
            }
        }
    }

    fn write_identity(&self, identity: &Identity, scope: Scope) -> Result<(), AppError> {
        set_git_config(scope, "user.name", &identity.name)?;
        set_git_config(scope, "user.email", &identity.email)?;
        Ok(())
    }
}

/// Executes Git config get command against the effective scope
///
/// # Arguments
/// * `key` - Git config key (user.name or user.email)
pub fn get_git_config(key: &str) -> Result<String, AppError> {
    let git_command_output: Output = run_git(&["config", key])?;
    Ok(String::from_utf8_lossy(&git_command_output.stdout)
        .trim()
        .to_string())
}

/// Executes a Git config set command
///
/// # Arguments
/// * `scope` - Config scope to write to
/// * `key` - Git config key to set (user.name or user.email)
/// * `value` - Value to set for key (username or email)
pub fn set_git_config(scope: Scope, key: &str, value: &str) -> Result<(), AppError> {
    run_git(&["config", scope.flag(), key, value])?;
    Ok(())
}

fn run_git(args: &[&str]) -> Result<Output, AppError> {
    let git_command_output: Output = Command::new("git")
        .args(args)
        .output()
        .map_err(|err| match err.kind() {
            ErrorKind::NotFound => AppError::GitNotInstalled,
            _ => AppError::Io(err),
        })?;
    debug!(?args, status = %git_command_output.status, "ran git");

    if !git_command_output.status.success() {
        let stderr = String::from_utf8_lossy(&git_command_output.stderr)
            .trim()
            .to_string();
        let message = if stderr.is_empty() {
            format!("`git {}` exited with {}", args.join(" "), git_command_output.status)
        } else {
            stderr
        };
        return Err(AppError::GitCommand(message));
    }

    Ok(git_command_output)
}
