//! The interactive input boundary.
//!
//! The core treats every interaction as one blocking call: `ask(prompt)`
//! eventually returns a line of text or signals an abort. The terminal
//! implementation sits on `dialoguer`; tests drive the session through the
//! same trait with scripted answers.

use std::io;

use dialoguer::{Input, theme::ColorfulTheme};
use thiserror::Error;

/// Failures at the prompter boundary. `Aborted` is the only path that
/// terminates the session; it is never treated as a recoverable order error.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The customer interrupted input (Ctrl-C or a closed terminal).
    #[error("input aborted")]
    Aborted,

    #[error("failed to read input")]
    Io(#[from] io::Error),
}

/// Synchronous request/response contract between the session loop and
/// whatever supplies customer input.
pub trait Prompter {
    fn ask(&mut self, prompt: &str) -> Result<String, PromptError>;
}

/// Reads from the terminal via `dialoguer` with the standard colorful theme.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|err| match err {
                dialoguer::Error::IO(io_err) if io_err.kind() == io::ErrorKind::Interrupted => {
                    PromptError::Aborted
                }
                dialoguer::Error::IO(io_err) => PromptError::Io(io_err),
            })
    }
}
