use serde::{Deserialize, Serialize};

/// Running tally for the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub correct: u32,
    pub total: u32,
}

impl Scoreboard {
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    pub fn wrong(&self) -> u32 {
        self.total - self.correct
    }

    /// Success rate as a whole percentage, halves rounding up. Zero before any
    /// answer.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct * 200 + self.total) / (self.total * 2)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(correct: u32, total: u32) -> Scoreboard {
        Scoreboard { correct, total }
    }

    #[test]
    fn empty_board_is_zero_percent() {
        assert_eq!(Scoreboard::default().percentage(), 0);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(board(1, 3).percentage(), 33);
        assert_eq!(board(2, 3).percentage(), 67);
        assert_eq!(board(1, 8).percentage(), 13);
        assert_eq!(board(3, 3).percentage(), 100);
    }

    #[test]
    fn record_and_reset() {
        let mut b = Scoreboard::default();
        b.record(true);
        b.record(false);
        b.record(true);
        assert_eq!(b, board(2, 3));
        assert_eq!(b.wrong(), 1);
        b.reset();
        assert_eq!(b, Scoreboard::default());
    }
}
