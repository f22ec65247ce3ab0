use chrono::{DateTime, Utc};

use crate::error::GameError;
use crate::game::{Feedback, SECRET_LEN, evaluate_guess, is_all_exact, is_valid_guess};

// Scoring constants: each guess costs GUESS_WEIGHT points and every
// TIME_DIVISOR seconds of play costs one point. Lower scores are better.
pub const GUESS_WEIGHT: f64 = 5.0;
pub const TIME_DIVISOR: f64 = 10.0;

/// Source of the current time, injectable so tests don't have to wait
/// for real seconds to pass.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used by the binary.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Combine guess count and elapsed play time into a single score.
/// Strictly fewer guesses with equal or less time always scores better.
pub fn score(guesses: u32, elapsed_seconds: f64) -> f64 {
    f64::from(guesses) * GUESS_WEIGHT + elapsed_seconds / TIME_DIVISOR
}

/// One player's playthrough: the secret, the running guess count, and the
/// timestamps bounding it.
///
/// A session starts in progress and becomes solved exactly when a guess
/// matches the secret in every position. Solved is terminal: further
/// guesses are rejected and the guess count no longer changes.
#[derive(Debug, Clone)]
pub struct PlayerSession {
    player_name: String,
    secret: String,
    started_at: DateTime<Utc>,
    guess_count: u32,
    solved_at: Option<DateTime<Utc>>,
}

impl PlayerSession {
    /// Start a session for `player_name` with the given secret.
    ///
    /// Callers provide a non-empty name and a secret from `pick_secret`;
    /// `started_at` comes from the caller's `Clock`.
    pub fn new(
        player_name: impl Into<String>,
        secret: String,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            player_name: player_name.into(),
            secret,
            started_at,
            guess_count: 0,
            solved_at: None,
        }
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn guess_count(&self) -> u32 {
        self.guess_count
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Set exactly once, by the guess that solves the session.
    pub fn solved_at(&self) -> Option<DateTime<Utc>> {
        self.solved_at
    }

    pub fn is_solved(&self) -> bool {
        self.solved_at.is_some()
    }

    /// Submit a guess at time `now`.
    ///
    /// Rejects guesses on a solved session and malformed guesses, neither
    /// of which changes any state. An accepted guess increments the guess
    /// count and returns its feedback; if the feedback is all exact the
    /// session records `now` as its solved timestamp in the same call.
    pub fn guess(
        &mut self,
        guess: &str,
        now: DateTime<Utc>,
    ) -> Result<[Feedback; SECRET_LEN], GameError> {
        if self.is_solved() {
            return Err(GameError::SessionSolved);
        }
        if guess.len() != SECRET_LEN {
            return Err(GameError::InvalidGuess("guess must be exactly 4 digits"));
        }
        if !is_valid_guess(guess) {
            return Err(GameError::InvalidGuess(
                "guess must only contain digits (0-9)",
            ));
        }

        self.guess_count += 1;
        let feedback = evaluate_guess(&self.secret, guess);
        if is_all_exact(&feedback) {
            self.solved_at = Some(now);
        }
        Ok(feedback)
    }

    /// Seconds between start and solve; `None` while still in progress.
    pub fn elapsed_seconds(&self) -> Option<f64> {
        self.solved_at
            .map(|t| (t - self.started_at).num_milliseconds() as f64 / 1000.0)
    }

    /// Final score; `None` while still in progress.
    pub fn score(&self) -> Option<f64> {
        self.elapsed_seconds()
            .map(|secs| score(self.guess_count, secs))
    }
}
