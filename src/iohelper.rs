/**
 * Helper functions for terminal input and output.
 *
 * Version: November 2025
 */
use colored::*;
use std::io::Write;

use rustyline::error::ReadlineError;

use super::common::{QuizError, Result};

#[macro_export]
macro_rules! my_println {
    ($($arg:tt)*) => (
        writeln!(std::io::stdout(), $($arg)*).map_err($crate::common::QuizError::Io)
    );
}

#[macro_export]
macro_rules! my_print {
    ($($arg:tt)*) => (
        write!(std::io::stdout(), $($arg)*).map_err($crate::common::QuizError::Io)
    );
}

// Used when the terminal size cannot be determined, e.g. when output is piped.
const DEFAULT_WIDTH: usize = 80;

/// Display a prompt and read one line of input. Unlike a question prompt, an empty line
/// is a valid response (it means "go on"). If the user presses Ctrl+D then `Ok(None)` is
/// returned; Ctrl+C gives `Err(QuizError::ReadlineInterrupted)`. Otherwise the line is
/// returned without leading and trailing whitespace.
pub fn prompt(message: &str) -> Result<Option<String>> {
    let mut rl = rustyline::Editor::<()>::new();
    match rl.readline(message) {
        Ok(response) => Ok(Some(response.trim().to_string())),
        Err(ReadlineError::Interrupted) => Err(QuizError::ReadlineInterrupted),
        Err(ReadlineError::Eof) => Ok(None),
        Err(ReadlineError::Io(e)) => Err(QuizError::Io(e)),
        Err(_) => Ok(None),
    }
}

/// Return the width of the terminal in columns.
pub fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(DEFAULT_WIDTH)
}

/// Print `message` to standard output, breaking lines according to the current width
/// of the terminal. Prepend `prefix` to the first line and indent all subsequent lines
/// by its length.
pub fn prettyprint(message: &str, prefix: &str) -> Result<()> {
    prettyprint_colored(message, prefix, None, None)
}

pub fn prettyprint_colored(
    message: &str,
    prefix: &str,
    message_color: Option<Color>,
    prefix_color: Option<Color>,
) -> Result<()> {
    let width = terminal_width().saturating_sub(prefix.len()).max(20);
    let mut lines = textwrap::wrap_iter(message, width);

    if let Some(first_line) = lines.next() {
        let colored_prefix = color_optional(&prefix, prefix_color);
        let colored_line = color_optional(&first_line, message_color);
        my_println!("{}{}", colored_prefix, colored_line)?;
    }

    let indent = " ".repeat(prefix.len());
    for line in lines {
        let colored_line = color_optional(&line, message_color);
        my_println!("{}{}", indent, colored_line)?;
    }
    Ok(())
}

fn color_optional(text: &str, color: Option<Color>) -> ColoredString {
    if let Some(color) = color {
        text.color(color)
    } else {
        text.normal()
    }
}
