use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Inclusive upper bound for randomly drawn operands.
    pub fn max_operand(self) -> u32 {
        match self {
            Self::Easy => 10,
            Self::Medium => 20,
            Self::Hard => 50,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl FromStr for DifficultyTier {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(QuizError::InvalidTier(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseMode {
    /// Multiplication and exact division.
    Mix,
    /// Addition and subtraction.
    Add,
    /// Multiplication drill against a fixed table number.
    Table,
}

impl ExerciseMode {
    pub const ALL: [ExerciseMode; 3] = [Self::Mix, Self::Add, Self::Table];

    pub fn label(self) -> &'static str {
        match self {
            Self::Mix => "Multiplication / Division",
            Self::Add => "Addition / Subtraction",
            Self::Table => "Times table",
        }
    }

    pub fn needs_table_number(self) -> bool {
        self == Self::Table
    }
}

impl FromStr for ExerciseMode {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mix" => Ok(Self::Mix),
            "add" => Ok(Self::Add),
            "table" => Ok(Self::Table),
            _ => Err(QuizError::InvalidMode(s.to_string())),
        }
    }
}

/// A multiplication table in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TableNumber(u32);

impl TableNumber {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 10;

    pub fn new(n: u32) -> Result<Self, QuizError> {
        if (Self::MIN..=Self::MAX).contains(&n) {
            Ok(Self(n))
        } else {
            Err(QuizError::InvalidTableNumber(n))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = TableNumber> {
        (Self::MIN..=Self::MAX).map(TableNumber)
    }
}

impl TryFrom<u32> for TableNumber {
    type Error = QuizError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<TableNumber> for u32 {
    fn from(t: TableNumber) -> u32 {
        t.0
    }
}

impl fmt::Display for TableNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The selections a question is generated from.
///
/// `table` is only ever `Some` for [`ExerciseMode::Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    pub tier: DifficultyTier,
    pub mode: ExerciseMode,
    pub table: Option<TableNumber>,
}

impl QuizSettings {
    pub fn new(
        tier: DifficultyTier,
        mode: ExerciseMode,
        table: Option<TableNumber>,
    ) -> Result<Self, QuizError> {
        let table = if mode.needs_table_number() {
            Some(table.ok_or(QuizError::MissingTableNumber)?)
        } else {
            None
        };
        Ok(Self { tier, mode, table })
    }
}
