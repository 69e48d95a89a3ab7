//! Tokenizing and validating a single command line.

use logos::Logos;

use std::fmt;

use crate::error::{CommandError, ErrorKind};
use crate::operator::Operator;

/// The keyword that starts a print command.
pub const PRINT_KEYWORD: &str = "print";

/// The word that ends a command stream.
pub const QUIT_KEYWORD: &str = "quit";

/// Tokens of a command line.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token<'a> {
    /// Never produced, every character is either whitespace or part of a word.
    #[error]
    #[regex(r"[ \t\n\r\f]+", logos::skip)]
    Error,

    /// A run of non-whitespace characters.
    #[regex(r"[^ \t\n\r\f]+", logos::Lexer::slice)]
    Word(&'a str),
}

/// Splits a line into its whitespace separated words.
pub fn words(line: &str) -> Vec<&str> {
    Token::lexer(line)
        .filter_map(|token| match token {
            Token::Word(word) => Some(word),
            Token::Error => None,
        })
        .collect()
}

/// Reads `word` as a number.
///
/// Besides everything `f64` parses, single underscores between digits are accepted as digit
/// group separators (`1_000`, `0.000_1`).
pub fn parse_number(word: &str) -> Option<f64> {
    if !word.contains('_') {
        return word.parse().ok();
    }

    let bytes = word.as_bytes();
    let separates_digits = |i: usize| {
        i > 0
            && bytes[i - 1].is_ascii_digit()
            && bytes.get(i + 1).map_or(false, u8::is_ascii_digit)
    };

    let grouped = bytes
        .iter()
        .enumerate()
        .all(|(i, byte)| *byte != b'_' || separates_digits(i));

    if !grouped {
        return None;
    }

    word.replace('_', "").parse().ok()
}

/// Returns true if `word` would be read as a number rather than a register name.
pub fn is_number(word: &str) -> bool {
    parse_number(word).is_some()
}

/// The second argument of an operate command, before registers have been looked up.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument<'a> {
    Number(f64),
    Register(&'a str),
}

impl<'a> Argument<'a> {
    fn parse(word: &'a str) -> Argument<'a> {
        match parse_number(word) {
            Some(number) => Argument::Number(number),
            None => Argument::Register(word),
        }
    }
}

/// A validated command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    /// `<target> <operator> <operand>`: record an operation against `target`.
    Operate {
        target: &'a str,
        operator: Operator,
        operand: Argument<'a>,
    },

    /// `print <register>`: force `register` and report its value.
    Print { register: &'a str },

    /// `quit`: stop processing the stream.
    Quit,
}

impl<'a> Command<'a> {
    /// Tokenizes and validates a line.
    ///
    /// Whether the register of a print command exists is not checked here, as that depends on
    /// the commands that came before.
    pub fn parse(line: &'a str) -> Result<Command<'a>, CommandError> {
        Command::from_words(&words(line)).map_err(|err| err.quoting(line))
    }

    pub fn from_words(words: &[&'a str]) -> Result<Command<'a>, CommandError> {
        match *words {
            [word] if word == QUIT_KEYWORD => Ok(Command::Quit),
            [target, operator, operand] => {
                let operator = Operator::from_name(operator).ok_or_else(|| {
                    CommandError::from_words(
                        words,
                        ErrorKind::UnknownOperation {
                            operator: operator.to_string(),
                            suggestion: Operator::suggest(operator),
                        },
                    )
                })?;

                if is_number(target) {
                    return Err(CommandError::from_words(
                        words,
                        ErrorKind::NumericRegisterName {
                            name: target.to_string(),
                        },
                    ));
                }

                Ok(Command::Operate {
                    target,
                    operator,
                    operand: Argument::parse(operand),
                })
            }
            [keyword, register] => {
                if keyword != PRINT_KEYWORD {
                    return Err(CommandError::from_words(words, ErrorKind::InvalidPrint));
                }

                Ok(Command::Print { register })
            }
            _ => Err(CommandError::from_words(words, ErrorKind::CommandArity)),
        }
    }
}

impl<'a> fmt::Display for Command<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::Operate {
                target,
                operator,
                operand: Argument::Number(number),
            } => write!(f, "{} {} {}", target, operator, number),
            Command::Operate {
                target,
                operator,
                operand: Argument::Register(register),
            } => write!(f, "{} {} {}", target, operator, register),
            Command::Print { register } => write!(f, "{} {}", PRINT_KEYWORD, register),
            Command::Quit => write!(f, "{}", QUIT_KEYWORD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words() {
        assert_eq!(words("  a   add\t5 "), vec!["a", "add", "5"]);
        assert_eq!(words("print a"), vec!["print", "a"]);
        assert!(words("").is_empty());
        assert!(words(" \t ").is_empty());
    }

    #[test]
    fn test_is_number() {
        assert!(is_number("5"));
        assert!(is_number("-3.25"));
        assert!(is_number("1e3"));
        assert!(!is_number("a5"));
        assert!(!is_number("x"));
    }

    #[test]
    fn test_digit_group_separators() {
        assert_eq!(parse_number("1_000"), Some(1000.0));
        assert_eq!(parse_number("0.000_1"), Some(0.0001));
        assert_eq!(parse_number("1_0e1_0"), Some(1e11));

        for word in &["_1", "1_", "1__0", "1_.5", "a_1", "nan_"] {
            assert_eq!(parse_number(word), None, "{}", word);
        }

        let err = Command::parse("1_000 add 1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NumericRegisterName { name: "1_000".into() });

        assert_eq!(
            Command::parse("a add 1_000").unwrap(),
            Command::Operate {
                target: "a",
                operator: Operator::Add,
                operand: Argument::Number(1000.0),
            }
        );

        assert_eq!(
            Command::parse("a add _1").unwrap(),
            Command::Operate {
                target: "a",
                operator: Operator::Add,
                operand: Argument::Register("_1"),
            }
        );
    }

    #[test]
    fn test_parse_operate() {
        assert_eq!(
            Command::parse("a add 5").unwrap(),
            Command::Operate {
                target: "a",
                operator: Operator::Add,
                operand: Argument::Number(5.0),
            }
        );

        assert_eq!(
            Command::parse("total multiply rate").unwrap(),
            Command::Operate {
                target: "total",
                operator: Operator::Multiply,
                operand: Argument::Register("rate"),
            }
        );
    }

    #[test]
    fn test_parse_print_and_quit() {
        assert_eq!(Command::parse("print a").unwrap(), Command::Print { register: "a" });
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        let err = Command::parse("foo bar baz qux").unwrap_err();
        assert_eq!(err.kind, ErrorKind::CommandArity);
        assert_eq!(err.line, "foo bar baz qux");

        assert_eq!(Command::parse("").unwrap_err().kind, ErrorKind::CommandArity);
        assert_eq!(Command::parse("a").unwrap_err().kind, ErrorKind::CommandArity);

        let err = Command::parse("a divide 2").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnknownOperation {
                operator: "divide".into(),
                suggestion: None,
            }
        );

        let err = Command::parse("5 add 2").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NumericRegisterName { name: "5".into() });

        let err = Command::parse("show a").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidPrint);
        assert_eq!(err.line, "show a");
    }

    #[test]
    fn test_error_line_spacing() {
        assert_eq!(Command::parse("foo  bar baz  qux").unwrap_err().line, "foo  bar baz  qux");
        assert_eq!(Command::parse("a  divide 2").unwrap_err().line, "a divide 2");
        assert_eq!(Command::parse("5 add\t1").unwrap_err().line, "5 add 1");
        assert_eq!(Command::parse("show   a").unwrap_err().line, "show a");
    }

    #[test]
    fn test_unknown_operator_checked_before_register_name() {
        let err = Command::parse("5 foo 2").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnknownOperation {
                operator: "foo".into(),
                suggestion: None,
            }
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::parse("a   add  b").unwrap().to_string(), "a add b");
        assert_eq!(Command::parse("a add 2.5").unwrap().to_string(), "a add 2.5");
        assert_eq!(Command::parse("print  a").unwrap().to_string(), "print a");
    }
}
