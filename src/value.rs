//! Display of resolved register values.

use std::fmt;

/// Wrapper that prints a register value the way the calculator reports it.
///
/// Integral values are printed without a fractional part (`4`, not `4.0`) and negative zero is
/// printed as `0`. Everything else uses the shortest decimal representation that round-trips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Value(pub f64);

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = self.0;

        if value.is_nan() {
            write!(f, "nan")
        } else if value == 0.0 {
            write!(f, "0")
        } else {
            // f64's Display never emits an exponent and drops the fraction of integral values.
            write!(f, "{}", value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Value;

    #[test]
    fn test_integral_values() {
        assert_eq!(Value(4.0).to_string(), "4");
        assert_eq!(Value(-12.0).to_string(), "-12");
        assert_eq!(Value(-0.0).to_string(), "0");
        assert_eq!(Value(1e20).to_string(), "100000000000000000000");
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(Value(3.5).to_string(), "3.5");
        assert_eq!(Value(-0.25).to_string(), "-0.25");
        assert_eq!(Value(0.1 + 0.2).to_string(), "0.30000000000000004");
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(Value(std::f64::INFINITY).to_string(), "inf");
        assert_eq!(Value(std::f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(Value(std::f64::NAN).to_string(), "nan");
    }
}
