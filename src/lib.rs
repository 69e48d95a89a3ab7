//! A crate for a small register calculator with lazy evaluation.
//!
//! Each command either records an arithmetic operation against a named register or prints the
//! value of a register. Recording does not compute anything; printing forces every operation
//! recorded so far for the register and, depth-first, for the registers it depends on.
//!
//! Currently this crate provides the functionality to:
//! - Tokenize and validate command lines.
//! - Record operations in per-register logs.
//! - Force registers on demand, applying every log entry exactly once.
//! - Detect registers that depend on themselves instead of looping forever.
//!
//! # Commands
//!
//! ```text
//! <register> <operation> <value>   where operation is add, subtract or multiply
//!                                  and value is a number or a register
//! print <register>
//! quit
//! ```
//!
//! # Example
//! ```
//! use regcalc::interpreter::{Interpreter, TestIo};
//!
//! let mut interpreter = Interpreter::new(TestIo::new());
//!
//! interpreter.run(vec![
//!     "a add 5",
//!     "b add a",
//!     "a multiply 2",
//!     "print b",
//!     "print a",
//! ]);
//!
//! assert_eq!(interpreter.io.lines(), vec!["10", "10"]);
//! ```
//!
//! `b` references `a` and is printed after `a multiply 2` was recorded, so the forced value of
//! `a` is 10 at that point.
//!
//! # Executables
//!
//! ## `regcalcrun`
//!
//! Executes the commands in a file, or the lines typed on standard input up to `quit` when no
//! file is given.
//!
//! ## `regcalcrepl`
//!
//! Executes commands as they are typed and provides commands for inspecting the register logs.
//!
//! ```text
//! > a add 2
//! > a multiply b
//! > .registers
//! a = 0 (2 pending)
//! b = 0
//! > print a
//! 0
//! ```
pub mod command;
pub mod error;
pub mod event;
pub mod interpreter;
pub mod operator;
pub mod register;
pub mod source;
pub mod value;

mod resolver;

pub use interpreter::{Interpreter, Output, StdIo, TestIo};
