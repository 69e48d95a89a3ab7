//! Errors reported for rejected commands.
//!
//! None of these are fatal: the interpreter reports the error and continues with the next line.

use std::fmt::{self, Display};

use itertools::Itertools;

use crate::operator::Operator;

/// The reason a command was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The line did not consist of two or three words.
    CommandArity,

    /// The operator of an operate command is not in the operator table.
    UnknownOperation {
        operator: String,

        /// A known operator with a similar name, if there is one.
        suggestion: Option<Operator>,
    },

    /// The target of an operate command is a number.
    NumericRegisterName {
        name: String,
    },

    /// A two word command that does not start with `print`.
    InvalidPrint,

    /// A print command naming a register that has never been mentioned.
    UndeclaredRegister {
        name: String,
    },

    /// Forcing the register requires forcing a register that is already being forced.
    CyclicDependency {
        /// The register that was asked to resolve while it was already resolving.
        register: String,

        /// The names along the dependency path, starting and ending with `register`.
        cycle: Vec<String>,
    },
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::CommandArity => write!(f, "Command must have 2 or 3 arguments."),
            ErrorKind::UnknownOperation { operator, suggestion } => {
                write!(f, "Operation \"{}\" is not defined.", operator)?;

                if let Some(suggestion) = suggestion {
                    write!(f, " Did you mean \"{}\"?", suggestion)?;
                }

                Ok(())
            }
            ErrorKind::NumericRegisterName { name } => {
                write!(f, "Register \"{}\" should not be a number.", name)
            }
            ErrorKind::InvalidPrint | ErrorKind::UndeclaredRegister { .. } => {
                write!(f, "Print command is not well specified.")
            }
            ErrorKind::CyclicDependency { register, .. } => {
                write!(f, "Register \"{}\" is dependent on itself.", register)
            }
        }
    }
}

/// A rejected command together with the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandError {
    /// The offending command. Arity and cycle errors quote the line as it was given, the others
    /// quote its words separated by single spaces.
    pub line: String,
    pub kind: ErrorKind,
}

impl CommandError {
    pub fn new<S: Into<String>>(line: S, kind: ErrorKind) -> CommandError {
        CommandError {
            line: line.into(),
            kind,
        }
    }

    pub fn from_words(words: &[&str], kind: ErrorKind) -> CommandError {
        CommandError::new(words.iter().join(" "), kind)
    }

    /// Quotes `line` unchanged if the error is about the command as a whole.
    pub fn quoting(mut self, line: &str) -> CommandError {
        match self.kind {
            ErrorKind::CommandArity | ErrorKind::CyclicDependency { .. } => {
                self.line = line.to_string();
                self
            }
            _ => self,
        }
    }

    /// The dependency path of a cycle error, formatted as `a -> b -> a`.
    pub fn cycle(&self) -> Option<String> {
        match self.kind {
            ErrorKind::CyclicDependency { ref cycle, .. } => Some(cycle.iter().join(" -> ")),
            _ => None,
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid command \"{}\" was ignored. {}", self.line, self.kind)
    }
}

impl std::error::Error for CommandError {}
