use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for a quiz session. Missing fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long feedback stays up after a correct answer.
    pub correct_delay_ms: u64,
    /// How long feedback stays up after a wrong answer.
    pub incorrect_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            correct_delay_ms: 2000,
            incorrect_delay_ms: 3000,
        }
    }
}

impl SessionConfig {
    pub fn feedback_delay(&self, correct: bool) -> Duration {
        let ms = if correct {
            self.correct_delay_ms
        } else {
            self.incorrect_delay_ms
        };
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_answers_linger_longer() {
        let config = SessionConfig::default();
        assert_eq!(config.feedback_delay(true), Duration::from_secs(2));
        assert_eq!(config.feedback_delay(false), Duration::from_secs(3));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{"correct_delay_ms": 500}"#).unwrap();
        assert_eq!(config.correct_delay_ms, 500);
        assert_eq!(config.incorrect_delay_ms, 3000);
    }
}
