//! Arithmetic quiz core: question generation and the session state machine
//! that drives it.

pub mod config;
pub mod error;
pub mod problem;
pub mod question;
pub mod score;
pub mod session;
pub mod settings;

pub use config::SessionConfig;
pub use error::{QuizError, SessionError};
pub use problem::{Operation, Problem};
pub use question::{generate, generate_question, generate_with, Question, OPTION_COUNT};
pub use score::Scoreboard;
pub use session::{OptionMark, PendingAdvance, Session, Stage, Submitted, Verdict};
pub use settings::{DifficultyTier, ExerciseMode, QuizSettings, TableNumber};
