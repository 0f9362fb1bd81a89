use inquire::Text;

use crate::{error::AppError, profile::Profile};

/// Asks for a single value; `None` means prompting is not possible
pub type Prompter<'a> = &'a dyn Fn(&str) -> Result<String, AppError>;

/// Prompts on the terminal and trims the answer
pub fn prompt_text(message: &str) -> Result<String, AppError> {
    let input: String = Text::new(message).prompt()?;
    Ok(input.trim().to_string())
}

/// Treats empty or whitespace-only arguments as not supplied
pub fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Fills a missing value from the prompter when one is available
pub fn fill_missing(
    value: Option<String>,
    message: &str,
    prompter: Option<Prompter<'_>>,
) -> Result<Option<String>, AppError> {
    match (supplied(value), prompter) {
        (Some(value), _) => Ok(Some(value)),
        (None, Some(prompt)) => Ok(supplied(Some(prompt(message)?))),
        (None, None) => Ok(None),
    }
}

/// Validates that both name and email are present
pub fn require_profile(name: Option<String>, email: Option<String>) -> Result<Profile, AppError> {
    match (supplied(name), supplied(email)) {
        (Some(name), Some(email)) => Ok(Profile::new(name, email)),
        _ => Err(AppError::MissingInput),
    }
}
