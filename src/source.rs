//! Reading command streams from files and interactive input.
//!
//! Commands are case-insensitive: every line is lowercased before it is handed to the
//! [Interpreter](crate::interpreter::Interpreter).

use std::io::{self, BufRead};
use std::path::Path;

use crate::command::QUIT_KEYWORD;

/// Splits a command file into lines.
///
/// Every line is trimmed and lowercased. A final `quit` line is dropped, as it only marks the end
/// of the stream.
pub fn lines_from_str(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text
        .lines()
        .map(|line| line.trim().to_lowercase())
        .collect();

    if lines.last().map(String::as_str) == Some(QUIT_KEYWORD) {
        lines.pop();
    }

    lines
}

/// Reads the lines of a command file.
pub fn read_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;

    Ok(lines_from_str(&text))
}

/// Reads lowercased lines until a line reading `quit` or the end of the input.
///
/// The `quit` line itself is not returned.
pub fn read_interactive<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();

    for line in reader.lines() {
        let line = line?.trim().to_lowercase();

        if line == QUIT_KEYWORD {
            break;
        }

        lines.push(line);
    }

    Ok(lines)
}
