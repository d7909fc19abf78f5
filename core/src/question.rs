use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::QuizError;
use crate::problem::Problem;
use crate::settings::{DifficultyTier, ExerciseMode, QuizSettings, TableNumber};

pub const OPTION_COUNT: usize = 4;

/// Largest multiplier drawn against a fixed table number.
const TABLE_MULTIPLIER_MAX: u32 = 10;

/// Distractors start within this distance of the correct answer.
const DISTRACTOR_SPREAD: u32 = 5;
const DRAWS_PER_ROUND: usize = 64;
const WIDENING_ROUNDS: u32 = 4;

/// One multiple-choice exercise.
///
/// `options` holds four distinct positive values in presentation order, exactly
/// one of which is `correct_answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(skip)]
    pub problem: Problem,
    pub expression: String,
    pub correct_answer: u32,
    pub options: [u32; OPTION_COUNT],
}

impl Question {
    pub fn contains(&self, option: u32) -> bool {
        self.options.contains(&option)
    }

    pub fn is_correct(&self, answer: u32) -> bool {
        answer == self.correct_answer
    }
}

/// Generates a question using the thread-local RNG.
pub fn generate(settings: &QuizSettings) -> Result<Question, QuizError> {
    generate_with(&mut rand::thread_rng(), settings)
}

/// Generates a question from plain selections, validating the table number.
pub fn generate_question(
    tier: DifficultyTier,
    mode: ExerciseMode,
    table: Option<u32>,
) -> Result<Question, QuizError> {
    let table = table.map(TableNumber::new).transpose()?;
    let settings = QuizSettings::new(tier, mode, table)?;
    generate(&settings)
}

pub fn generate_with<R: Rng + ?Sized>(
    rng: &mut R,
    settings: &QuizSettings,
) -> Result<Question, QuizError> {
    let problem = draw_problem(rng, settings)?;
    let correct_answer = problem.answer();

    let mut options = synthesize_options(rng, correct_answer);
    options.shuffle(rng);

    let question = Question {
        problem,
        expression: problem.expression(),
        correct_answer,
        options,
    };
    debug!(
        expression = %question.expression,
        answer = question.correct_answer,
        options = ?question.options,
        "generated question"
    );
    Ok(question)
}

fn draw_problem<R: Rng + ?Sized>(
    rng: &mut R,
    settings: &QuizSettings,
) -> Result<Problem, QuizError> {
    let max = settings.tier.max_operand();

    let problem = match settings.mode {
        ExerciseMode::Mix => {
            let (a, b) = (rng.gen_range(1..=max), rng.gen_range(1..=max));
            if rng.gen_bool(0.5) {
                Problem::multiply(a, b)
            } else {
                Problem::divide(a, b)
            }
        }
        ExerciseMode::Add => {
            let (a, b) = (rng.gen_range(1..=max), rng.gen_range(1..=max));
            if rng.gen_bool(0.5) {
                Problem::add(a, b)
            } else {
                Problem::subtract(a, b)
            }
        }
        ExerciseMode::Table => {
            let table = settings.table.ok_or(QuizError::MissingTableNumber)?;
            Problem::multiply(table.get(), rng.gen_range(1..=TABLE_MULTIPLIER_MAX))
        }
    };
    Ok(problem)
}

/// Builds the option set: `correct` plus three distinct positive distractors
/// near it. Order is not randomized here.
fn synthesize_options<R: Rng + ?Sized>(rng: &mut R, correct: u32) -> [u32; OPTION_COUNT] {
    let mut options = [correct; OPTION_COUNT];
    let mut filled = 1;

    let mut spread = DISTRACTOR_SPREAD;
    for round in 1..=WIDENING_ROUNDS {
        let mut draws = 0;
        while filled < OPTION_COUNT && draws < DRAWS_PER_ROUND {
            draws += 1;
            let delta = rng.gen_range(1..=spread);
            let candidate = if rng.gen_bool(0.5) {
                correct.checked_add(delta)
            } else {
                correct.checked_sub(delta)
            };
            if let Some(value) = candidate.filter(|v| *v > 0 && !options[..filled].contains(v)) {
                options[filled] = value;
                filled += 1;
            }
        }
        if filled == OPTION_COUNT {
            return options;
        }
        spread = spread.saturating_mul(2);
        warn!(round, spread, correct, "distractor draws exhausted, widening range");
    }

    // Nearest unused values, upward first.
    let upward = correct.saturating_add(1)..=u32::MAX;
    let downward = (1..correct).rev();
    for value in upward.chain(downward) {
        if filled == OPTION_COUNT {
            break;
        }
        if !options[..filled].contains(&value) {
            options[filled] = value;
            filled += 1;
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Operation;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TRIALS: usize = 1000;

    fn settings(tier: DifficultyTier, mode: ExerciseMode, table: Option<u32>) -> QuizSettings {
        let table = table.map(|n| TableNumber::new(n).unwrap());
        QuizSettings::new(tier, mode, table).unwrap()
    }

    fn assert_well_formed(q: &Question) {
        assert!(q.options.iter().all(|o| *o > 0), "{q:?}");
        let mut sorted = q.options;
        sorted.sort_unstable();
        assert!(sorted.windows(2).all(|w| w[0] != w[1]), "{q:?}");
        assert_eq!(q.options.iter().filter(|o| **o == q.correct_answer).count(), 1);
        assert_eq!(q.expression, q.problem.expression());
        assert_eq!(q.correct_answer, q.problem.answer());
    }

    #[test]
    fn every_tier_and_mode_yields_well_formed_questions() {
        let mut rng = StdRng::seed_from_u64(42);
        for tier in DifficultyTier::ALL {
            for mode in [ExerciseMode::Mix, ExerciseMode::Add] {
                let s = settings(tier, mode, None);
                for _ in 0..TRIALS {
                    let q = generate_with(&mut rng, &s).unwrap();
                    assert_well_formed(&q);
                }
            }
            for table in TableNumber::all() {
                let s = settings(tier, ExerciseMode::Table, Some(table.get()));
                for _ in 0..TRIALS {
                    assert_well_formed(&generate_with(&mut rng, &s).unwrap());
                }
            }
        }
    }

    #[test]
    fn mix_operands_stay_within_tier_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        for tier in DifficultyTier::ALL {
            let max = tier.max_operand();
            let s = settings(tier, ExerciseMode::Mix, None);
            for _ in 0..TRIALS {
                let q = generate_with(&mut rng, &s).unwrap();
                let p = q.problem;
                match p.operation() {
                    Operation::Multiply => {
                        assert!((1..=max).contains(&p.lhs()));
                        assert!((1..=max).contains(&p.rhs()));
                    }
                    Operation::Divide => {
                        assert!((1..=max).contains(&p.rhs()));
                        assert!((1..=max).contains(&q.correct_answer));
                        assert_eq!(p.lhs() % p.rhs(), 0);
                        assert_eq!(p.lhs() / p.rhs(), q.correct_answer);
                    }
                    other => panic!("unexpected operation {other:?}"),
                }
            }
        }
    }

    #[test]
    fn add_operands_stay_within_tier_bound() {
        let mut rng = StdRng::seed_from_u64(8);
        for tier in DifficultyTier::ALL {
            let max = tier.max_operand();
            let s = settings(tier, ExerciseMode::Add, None);
            for _ in 0..TRIALS {
                let q = generate_with(&mut rng, &s).unwrap();
                let p = q.problem;
                match p.operation() {
                    Operation::Add => {
                        assert!((1..=max).contains(&p.lhs()));
                        assert!((1..=max).contains(&p.rhs()));
                    }
                    Operation::Subtract => {
                        assert!((1..=max).contains(&p.rhs()));
                        assert!((1..=max).contains(&q.correct_answer));
                    }
                    other => panic!("unexpected operation {other:?}"),
                }
            }
        }
    }

    #[test]
    fn both_sub_operations_are_chosen() {
        let mut rng = StdRng::seed_from_u64(9);
        let s = settings(DifficultyTier::Easy, ExerciseMode::Mix, None);
        let divisions = (0..TRIALS)
            .map(|_| generate_with(&mut rng, &s).unwrap().problem.operation())
            .filter(|op| *op == Operation::Divide)
            .count();
        assert!((400..=600).contains(&divisions), "{divisions}");
    }

    #[test]
    fn table_mode_without_table_number_fails() {
        let s = QuizSettings {
            tier: DifficultyTier::Easy,
            mode: ExerciseMode::Table,
            table: None,
        };
        assert_eq!(
            generate_with(&mut StdRng::seed_from_u64(1), &s),
            Err(QuizError::MissingTableNumber)
        );
    }

    #[test]
    fn distractors_stay_close_to_answer() {
        let mut rng = StdRng::seed_from_u64(3);
        for correct in [1, 2, 3, 10, 2500] {
            for _ in 0..200 {
                let options = synthesize_options(&mut rng, correct);
                assert_eq!(options[0], correct);
                for o in &options[1..] {
                    assert!(*o > 0 && o.abs_diff(correct) <= DISTRACTOR_SPREAD, "{options:?}");
                }
            }
        }
    }

    #[test]
    fn degenerate_rng_still_terminates() {
        let mut rng = StepRng::new(0, 0);
        let options = synthesize_options(&mut rng, 7);
        let mut sorted = options;
        sorted.sort_unstable();
        assert!(sorted.windows(2).all(|w| w[0] < w[1]), "{options:?}");
        assert!(options.contains(&7));
        assert!(options.iter().all(|o| o.abs_diff(7) <= 3));
    }

    #[test]
    fn shuffle_spreads_correct_answer_over_positions() {
        let mut rng = StdRng::seed_from_u64(11);
        let s = settings(DifficultyTier::Medium, ExerciseMode::Add, None);
        let mut positions = [0usize; OPTION_COUNT];
        for _ in 0..4000 {
            let q = generate_with(&mut rng, &s).unwrap();
            let idx = q.options.iter().position(|o| *o == q.correct_answer).unwrap();
            positions[idx] += 1;
        }
        for count in positions {
            assert!((850..=1150).contains(&count), "{positions:?}");
        }
    }
}
