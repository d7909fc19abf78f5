use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Multiply,
    Divide,
    Add,
    Subtract,
}

impl Operation {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Add => "+",
            Self::Subtract => "-",
        }
    }

    fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "×" => Some(Self::Multiply),
            "÷" => Some(Self::Divide),
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            _ => None,
        }
    }
}

/// A binary arithmetic problem whose answer is always a whole number.
///
/// Division and subtraction are built as inverses of multiplication and
/// addition, so `lhs ÷ rhs` never has a remainder and `lhs - rhs` is never
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Problem {
    operation: Operation,
    lhs: u32,
    rhs: u32,
}

impl Problem {
    pub fn multiply(a: u32, b: u32) -> Self {
        Self {
            operation: Operation::Multiply,
            lhs: a,
            rhs: b,
        }
    }

    /// `(a × b) ÷ a`, answered by `b`. `a` must be non-zero.
    pub fn divide(a: u32, b: u32) -> Self {
        Self {
            operation: Operation::Divide,
            lhs: a * b,
            rhs: a,
        }
    }

    pub fn add(a: u32, b: u32) -> Self {
        Self {
            operation: Operation::Add,
            lhs: a,
            rhs: b,
        }
    }

    /// `(a + b) - a`, answered by `b`.
    pub fn subtract(a: u32, b: u32) -> Self {
        Self {
            operation: Operation::Subtract,
            lhs: a + b,
            rhs: a,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn lhs(&self) -> u32 {
        self.lhs
    }

    pub fn rhs(&self) -> u32 {
        self.rhs
    }

    pub fn answer(&self) -> u32 {
        match self.operation {
            Operation::Multiply => self.lhs * self.rhs,
            Operation::Divide => self.lhs / self.rhs,
            Operation::Add => self.lhs + self.rhs,
            Operation::Subtract => self.lhs - self.rhs,
        }
    }

    pub fn expression(&self) -> String {
        format!("{} {} {}", self.lhs, self.operation.symbol(), self.rhs)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}

impl FromStr for Problem {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || QuizError::MalformedExpression(s.to_string());

        let mut parts = s.split_whitespace();
        let (Some(lhs), Some(symbol), Some(rhs), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let lhs: u32 = lhs.parse().map_err(|_| malformed())?;
        let rhs: u32 = rhs.parse().map_err(|_| malformed())?;
        let operation = Operation::from_symbol(symbol).ok_or_else(malformed)?;

        let valid = match operation {
            Operation::Multiply => lhs.checked_mul(rhs).is_some(),
            Operation::Divide => rhs != 0 && lhs % rhs == 0,
            Operation::Add => lhs.checked_add(rhs).is_some(),
            Operation::Subtract => lhs >= rhs,
        };
        if !valid {
            return Err(malformed());
        }

        Ok(Self {
            operation,
            lhs,
            rhs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_expressions() {
        assert_eq!(Problem::multiply(7, 8).expression(), "7 × 8");
        assert_eq!(Problem::divide(7, 8).expression(), "56 ÷ 7");
        assert_eq!(Problem::add(4, 9).expression(), "4 + 9");
        assert_eq!(Problem::subtract(4, 9).expression(), "13 - 4");
    }

    #[test]
    fn inverse_operations_answer_with_second_operand() {
        assert_eq!(Problem::divide(6, 9).answer(), 9);
        assert_eq!(Problem::subtract(6, 9).answer(), 9);
        assert_eq!(Problem::multiply(6, 9).answer(), 54);
        assert_eq!(Problem::add(6, 9).answer(), 15);
    }

    #[test]
    fn parses_back_from_expression() {
        for problem in [
            Problem::multiply(12, 3),
            Problem::divide(5, 11),
            Problem::add(1, 1),
            Problem::subtract(50, 50),
        ] {
            let parsed: Problem = problem.expression().parse().unwrap();
            assert_eq!(parsed, problem);
            assert_eq!(parsed.answer(), problem.answer());
        }
    }

    #[test]
    fn rejects_inexact_or_garbled_expressions() {
        for bad in ["7 ÷ 0", "10 ÷ 3", "3 - 4", "7 * 8", "7 ×", "1 + 2 + 3", ""] {
            assert_eq!(
                bad.parse::<Problem>(),
                Err(QuizError::MalformedExpression(bad.to_string())),
                "{bad:?}"
            );
        }
    }
}
