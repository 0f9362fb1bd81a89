use clap::{Command, CommandFactory, Parser, Subcommand, ValueEnum, builder::PossibleValuesParser};

/// Usage examples appended to the help output
const EXAMPLES: &str = "\
Examples:
  git-me work                   Switch to work profile (local)
  git-me personal --global      Switch to personal profile (global)
  git-me add work \"John Doe\" \"john@company.com\"
  git-me list                   List all available profiles";

/// CLI arguments parser using `clap`
#[derive(Parser, Debug)]
#[command(
    name = "git-me",
    version,
    about = "Store Git identity profiles and switch between them"
)]
pub struct Cli {
    /// Apply the switch to the global git config instead of the repository
    #[arg(long, global = true)]
    pub global: bool,

    /// Profile to switch to
    #[arg(value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Subcommand chosen to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lists all profiles, marking the one matching the current Git identity
    List,
    /// Adds or updates a profile (prompts for missing values)
    Add {
        /// Profile key
        profile: String,
        /// Git username
        name: Option<String>,
        /// Git email
        email: Option<String>,
    },
    /// Removes a profile
    Remove {
        /// Profile key to remove
        profile: String,
    },
    /// Displays current Git identity
    Current,
    /// Generates a shell completion script
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Shows version information
    Version,
}

/// Shells completion scripts can be generated for
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

/// What a parsed command line asks for
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Switch { profile: String, global: bool },
    List,
    Add {
        profile: String,
        name: Option<String>,
        email: Option<String>,
    },
    Remove { profile: String },
    Current,
    Completion { shell: Shell },
    Version,
    Help,
}

impl Cli {
    /// Resolves the action; a subcommand takes precedence over a bare profile.
    pub fn action(self) -> Action {
        match (self.command, self.profile) {
            (Some(Commands::List), _) => Action::List,
            (Some(Commands::Add { profile, name, email }), _) => Action::Add { profile, name, email },
            (Some(Commands::Remove { profile }), _) => Action::Remove { profile },
            (Some(Commands::Current), _) => Action::Current,
            (Some(Commands::Completion { shell }), _) => Action::Completion { shell },
            (Some(Commands::Version), _) => Action::Version,
            (None, Some(profile)) => Action::Switch {
                profile,
                global: self.global,
            },
            (None, None) => Action::Help,
        }
    }
}

/// Builds the clap command with help text naming the profiles file
pub fn command_with_config_path(config_location: &str) -> Command {
    Cli::command().after_help(format!("{EXAMPLES}\n\nConfig location: {config_location}"))
}

/// Builds the clap command with stored profile keys as completion candidates
pub fn command_with_profiles(profile_keys: &[String]) -> Command {
    let keys: Vec<String> = profile_keys.to_vec();
    Cli::command()
        .mut_arg("profile", |arg| {
            arg.value_parser(PossibleValuesParser::new(keys.clone()))
        })
        .mut_subcommand("remove", |remove| {
            remove.mut_arg("profile", |arg| {
                arg.value_parser(PossibleValuesParser::new(keys.clone()))
            })
        })
}
