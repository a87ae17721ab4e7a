//! End-of-run acknowledgment.
//!
//! An interactive run can wait for the user to press a key before it exits.
//! The wait sits behind the [`Confirmation`] trait so tests and scripted runs
//! never block on a terminal.

use console::Term;
use std::io;

/// Waits for the user to acknowledge the end of a run.
pub trait Confirmation {
    fn confirm(&mut self, prompt: &str) -> io::Result<()>;
}

/// Prompts on the terminal and waits for a single key press.
///
/// When stdout is not a terminal the prompt is skipped and the call returns
/// immediately.
pub struct TerminalConfirmation {
    term: Term,
}

impl TerminalConfirmation {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TerminalConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirmation for TerminalConfirmation {
    fn confirm(&mut self, prompt: &str) -> io::Result<()> {
        if !self.term.is_term() {
            return Ok(());
        }
        self.term.write_line(prompt)?;
        self.term.read_key()?;
        Ok(())
    }
}

/// Never waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoConfirmation;

impl Confirmation for NoConfirmation {
    fn confirm(&mut self, _prompt: &str) -> io::Result<()> {
        Ok(())
    }
}
