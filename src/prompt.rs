//! Interactive confirmation before deleting duplicates.

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Prompt shown before removal.
pub const DELETE_PROMPT: &str = "Delete duplicates(Y/n): ";

/// Error reading the user's answer.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Writing the prompt or reading the answer failed.
    #[error("failed to read confirmation: {0}")]
    Io(#[from] io::Error),

    /// Input ended before an answer was given.
    #[error("no confirmation given: input closed")]
    NoInput,
}

/// Whether `answer` is an affirmative response (`y` or `yes`, any case).
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Write `prompt` to `out` and read one line from `input`.
///
/// Returns `Ok(true)` only for an affirmative answer.
///
/// # Errors
///
/// [`PromptError::NoInput`] on end of input, [`PromptError::Io`] on I/O
/// failure.
pub fn confirm<R, W>(prompt: &str, input: &mut R, out: &mut W) -> Result<bool, PromptError>
where
    R: BufRead,
    W: Write,
{
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Err(PromptError::NoInput);
    }

    Ok(is_affirmative(&answer))
}
