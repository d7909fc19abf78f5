use thiserror::Error;

/// Errors raised while building quiz settings or questions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("unknown difficulty tier: {0:?}")]
    InvalidTier(String),
    #[error("unknown exercise mode: {0:?}")]
    InvalidMode(String),
    #[error("table number {0} is outside 1..=10")]
    InvalidTableNumber(u32),
    #[error("table mode requires a table number")]
    MissingTableNumber,
    #[error("malformed expression: {0:?}")]
    MalformedExpression(String),
}

/// Errors raised by [`crate::session::Session`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {action} while in stage {stage}")]
    WrongStage {
        action: &'static str,
        stage: &'static str,
    },
    #[error("{0} is not one of the offered options")]
    AnswerNotOffered(u32),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
