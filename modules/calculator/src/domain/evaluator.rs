//! Binary arithmetic over `f64` operands.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while evaluating a single operation.
///
/// The `Display` output is the exact message returned to REST clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The operator name is not one of `add`, `subtract`, `multiply`, `divide`.
    #[error("Invalid operator")]
    InvalidOperator { operator: String },

    /// Division with a zero divisor.
    #[error("Cannot divide by zero")]
    DivideByZero,
}

impl EvalError {
    #[must_use]
    pub fn invalid_operator(operator: impl Into<String>) -> Self {
        Self::InvalidOperator {
            operator: operator.into(),
        }
    }
}

/// Supported calculator operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl OperatorKind {
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Wire name of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Applies the operator to `a` and `b`.
    ///
    /// # Errors
    /// Returns [`EvalError::DivideByZero`] when dividing by zero.
    pub fn apply(self, a: f64, b: f64) -> Result<f64, EvalError> {
        match self {
            Self::Add => Ok(a + b),
            Self::Subtract => Ok(a - b),
            Self::Multiply => Ok(a * b),
            Self::Divide => {
                if b == 0.0 {
                    return Err(EvalError::DivideByZero);
                }
                Ok(a / b)
            }
        }
    }
}

impl FromStr for OperatorKind {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| EvalError::invalid_operator(s))
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluates `a <operator> b` where `operator` is a wire name.
///
/// # Errors
/// Returns [`EvalError::InvalidOperator`] for unknown operator names and
/// [`EvalError::DivideByZero`] for a zero divisor.
pub fn evaluate(a: f64, b: f64, operator: &str) -> Result<f64, EvalError> {
    operator.parse::<OperatorKind>()?.apply(a, b)
}
