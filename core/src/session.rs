//! Quiz session state machine.
//!
//! A session walks `SelectTier -> SelectMode -> SelectTable (table mode only)
//! -> Answering`, then alternates between `Answering` and `Feedback` until it is
//! restarted. Leaving `Feedback` is driven by a [`PendingAdvance`] that is only
//! honoured while it still belongs to the current session epoch.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::question::{generate_with, Question};
use crate::score::Scoreboard;
use crate::settings::{DifficultyTier, ExerciseMode, QuizSettings, TableNumber};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    SelectTier,
    SelectMode {
        tier: DifficultyTier,
    },
    SelectTable {
        tier: DifficultyTier,
    },
    Answering {
        settings: QuizSettings,
        question: Question,
    },
    Feedback {
        settings: QuizSettings,
        question: Question,
        verdict: Verdict,
        advance: PendingAdvance,
    },
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectTier => "select-tier",
            Self::SelectMode { .. } => "select-mode",
            Self::SelectTable { .. } => "select-table",
            Self::Answering { .. } => "answering",
            Self::Feedback { .. } => "feedback",
        }
    }
}

/// The judged answer shown while feedback is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub selected: u32,
    pub correct_answer: u32,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Correct,
    WrongPick,
    Neutral,
}

impl Verdict {
    pub fn mark(&self, option: u32) -> OptionMark {
        if option == self.correct_answer {
            OptionMark::Correct
        } else if option == self.selected {
            OptionMark::WrongPick
        } else {
            OptionMark::Neutral
        }
    }
}

/// A scheduled move from feedback to the next question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    epoch: u64,
    due_at: Instant,
}

impl PendingAdvance {
    pub fn due_at(&self) -> Instant {
        self.due_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submitted {
    pub verdict: Verdict,
    pub advance: PendingAdvance,
}

pub struct Session<R = StdRng> {
    config: SessionConfig,
    stage: Stage,
    score: Scoreboard,
    epoch: u64,
    rng: R,
}

impl Session<StdRng> {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl Default for Session<StdRng> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: SessionConfig, rng: R) -> Self {
        Self {
            config,
            stage: Stage::SelectTier,
            score: Scoreboard::default(),
            epoch: 0,
            rng,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn score(&self) -> &Scoreboard {
        &self.score
    }

    pub fn settings(&self) -> Option<&QuizSettings> {
        match &self.stage {
            Stage::Answering { settings, .. } | Stage::Feedback { settings, .. } => Some(settings),
            _ => None,
        }
    }

    pub fn question(&self) -> Option<&Question> {
        match &self.stage {
            Stage::Answering { question, .. } | Stage::Feedback { question, .. } => Some(question),
            _ => None,
        }
    }

    pub fn select_tier(&mut self, tier: DifficultyTier) -> Result<(), SessionError> {
        if self.stage != Stage::SelectTier {
            return Err(self.wrong_stage("select a tier"));
        }
        info!(?tier, "tier selected");
        self.stage = Stage::SelectMode { tier };
        Ok(())
    }

    pub fn select_mode(&mut self, mode: ExerciseMode) -> Result<(), SessionError> {
        let Stage::SelectMode { tier } = self.stage else {
            return Err(self.wrong_stage("select a mode"));
        };
        info!(?tier, ?mode, "mode selected");
        if mode.needs_table_number() {
            self.stage = Stage::SelectTable { tier };
            return Ok(());
        }
        self.begin(QuizSettings::new(tier, mode, None)?)
    }

    pub fn select_table(&mut self, table: TableNumber) -> Result<(), SessionError> {
        let Stage::SelectTable { tier } = self.stage else {
            return Err(self.wrong_stage("select a table"));
        };
        info!(%table, "table selected");
        self.begin(QuizSettings::new(tier, ExerciseMode::Table, Some(table))?)
    }

    /// Judges `answer` and freezes the question until the returned advance
    /// fires.
    pub fn submit(&mut self, answer: u32, now: Instant) -> Result<Submitted, SessionError> {
        let Stage::Answering { settings, question } = &self.stage else {
            return Err(self.wrong_stage("submit an answer"));
        };
        if !question.contains(answer) {
            return Err(SessionError::AnswerNotOffered(answer));
        }

        let verdict = Verdict {
            selected: answer,
            correct_answer: question.correct_answer,
            is_correct: question.is_correct(answer),
        };
        let advance = PendingAdvance {
            epoch: self.epoch,
            due_at: now + self.config.feedback_delay(verdict.is_correct),
        };
        let (settings, question) = (*settings, question.clone());

        self.score.record(verdict.is_correct);
        info!(
            answer,
            correct = verdict.is_correct,
            score = self.score.correct,
            total = self.score.total,
            "answer submitted"
        );
        self.stage = Stage::Feedback {
            settings,
            question,
            verdict,
            advance,
        };
        Ok(Submitted { verdict, advance })
    }

    pub fn pending_advance(&self) -> Option<PendingAdvance> {
        match &self.stage {
            Stage::Feedback { advance, .. } => Some(*advance),
            _ => None,
        }
    }

    pub fn time_until_advance(&self, now: Instant) -> Option<Duration> {
        self.pending_advance()
            .map(|advance| advance.due_at.saturating_duration_since(now))
    }

    /// Moves to the next question if `advance` is still the live one.
    /// Returns `false` for stale advances, e.g. after a restart.
    pub fn fire(&mut self, advance: PendingAdvance) -> Result<bool, SessionError> {
        let settings = match &self.stage {
            Stage::Feedback {
                settings,
                advance: live,
                ..
            } if *live == advance && advance.epoch == self.epoch => *settings,
            _ => {
                debug!(epoch = advance.epoch, current = self.epoch, "ignoring stale advance");
                return Ok(false);
            }
        };
        self.epoch += 1;
        self.begin(settings)?;
        Ok(true)
    }

    /// Fires the pending advance once it is due.
    pub fn tick(&mut self, now: Instant) -> Result<bool, SessionError> {
        match self.pending_advance() {
            Some(advance) if now >= advance.due_at => self.fire(advance),
            _ => Ok(false),
        }
    }

    pub fn restart(&mut self) {
        info!(
            correct = self.score.correct,
            total = self.score.total,
            "session restarted"
        );
        self.epoch += 1;
        self.stage = Stage::SelectTier;
        self.score.reset();
    }

    fn begin(&mut self, settings: QuizSettings) -> Result<(), SessionError> {
        let question = generate_with(&mut self.rng, &settings)?;
        self.stage = Stage::Answering { settings, question };
        Ok(())
    }

    fn wrong_stage(&self, action: &'static str) -> SessionError {
        SessionError::WrongStage {
            action,
            stage: self.stage.name(),
        }
    }
}
