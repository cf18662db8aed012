//! Interactive collaborators: field prompts and confirmations.
//!
//! With the `interactive` feature these use `dialoguer`; without it (or when
//! stdin is not a terminal) nothing is asked and callers fall back to flags.

use std::io::IsTerminal;

use crate::error::{CliError, CliResult};

/// `true` when a human can answer prompts.
pub fn is_interactive() -> bool {
    cfg!(feature = "interactive") && std::io::stdin().is_terminal()
}

/// Ask a yes/no question. `default` is returned when nobody can answer.
pub fn confirm(question: &str, default: bool) -> CliResult<bool> {
    if !is_interactive() {
        return Ok(default);
    }
    ask_confirm(question, default)
}

/// Ask for a text value, checking it with `validate`.
///
/// Fails with [`CliError::InvalidInput`] naming `flag` when no terminal is
/// available.
pub fn text<V>(label: &str, flag: &str, default: Option<&str>, validate: V) -> CliResult<String>
where
    V: Fn(&str) -> Result<(), String> + 'static,
{
    if !is_interactive() {
        return Err(CliError::InvalidInput {
            message: format!("{label} is required (pass {flag})"),
        });
    }
    ask_text(label, default, validate)
}

#[cfg(feature = "interactive")]
fn ask_confirm(question: &str, default: bool) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(question)
        .default(default)
        .interact()
        .map_err(map_dialoguer)
}

#[cfg(not(feature = "interactive"))]
fn ask_confirm(_question: &str, default: bool) -> CliResult<bool> {
    Ok(default)
}

#[cfg(feature = "interactive")]
fn ask_text<V>(label: &str, default: Option<&str>, validate: V) -> CliResult<String>
where
    V: Fn(&str) -> Result<(), String> + 'static,
{
    let mut input = dialoguer::Input::<String>::new()
        .with_prompt(label)
        .validate_with(move |value: &String| validate(value));
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    input.interact_text().map_err(map_dialoguer)
}

#[cfg(not(feature = "interactive"))]
fn ask_text<V>(label: &str, _default: Option<&str>, _validate: V) -> CliResult<String>
where
    V: Fn(&str) -> Result<(), String> + 'static,
{
    Err(CliError::InvalidInput {
        message: format!("{label} is required"),
    })
}

#[cfg(feature = "interactive")]
fn map_dialoguer(err: dialoguer::Error) -> CliError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
            CliError::Cancelled
        }
        dialoguer::Error::IO(e) => CliError::IoError {
            message: "failed to read from the terminal".into(),
            source: e,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test harnesses never attach a terminal to stdin.
    #[test]
    fn confirm_without_terminal_returns_default() {
        assert!(confirm("Overwrite?", true).unwrap());
        assert!(!confirm("Overwrite?", false).unwrap());
    }

    #[test]
    fn text_without_terminal_names_the_flag() {
        let err = text("Project name", "--name", None, |_| Ok(())).unwrap_err();
        assert!(err.to_string().contains("--name"));
    }
}
