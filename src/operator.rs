//! The arithmetic operators a register log can record.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use edit_distance::edit_distance;
use lazy_static::lazy_static;

/// Operators that can be appended to the log of a register.
///
/// Adding an operator means adding a variant here, a name in [Operator::name] and a case in
/// [Operator::apply]. The lookup table picks it up from [Operator::ALL].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Adds the operand to the value of the register. (`add`)
    Add,

    /// Subtracts the operand from the value of the register. (`subtract`)
    Subtract,

    /// Multiplies the value of the register by the operand. (`multiply`)
    Multiply,
}

lazy_static! {
    static ref OPERATORS: HashMap<&'static str, Operator> = Operator::ALL
        .iter()
        .map(|op| (op.name(), *op))
        .collect();
}

/// Names further away than this from every known operator get no suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 2;

impl Operator {
    /// Every operator, in the order they are listed to the user.
    pub const ALL: &'static [Operator] = &[
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
    ];

    /// The name used for the operator in commands.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Subtract => "subtract",
            Operator::Multiply => "multiply",
        }
    }

    /// Looks up an operator by the name used in commands.
    ///
    /// Names are matched exactly. Commands are lowercased before they reach the interpreter.
    pub fn from_name(name: &str) -> Option<Operator> {
        OPERATORS.get(name).copied()
    }

    /// Returns the known operator whose name is closest to `name`, if any is close enough to be
    /// a plausible typo.
    pub fn suggest(name: &str) -> Option<Operator> {
        Operator::ALL
            .iter()
            .map(|op| (edit_distance(name, op.name()), *op))
            .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, op)| op)
    }

    /// Computes the new value of a register.
    ///
    /// # Parameters
    /// - `value`: The current value of the register.
    /// - `operand`: The resolved value of the operand.
    pub fn apply(self, value: f64, operand: f64) -> f64 {
        match self {
            Operator::Add => value + operand,
            Operator::Subtract => value - operand,
            Operator::Multiply => value * operand,
        }
    }
}

/// Error returned when parsing an unknown operator name.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownOperator(pub String);

impl fmt::Display for UnknownOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown operator '{}'", self.0)
    }
}

impl std::error::Error for UnknownOperator {}

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Operator, UnknownOperator> {
        Operator::from_name(s).ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
