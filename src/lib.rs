// Library interface for number-guess
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game;
pub mod runner;
pub mod session;
pub mod store;

// Re-export commonly used items for easier testing
pub use error::GameError;
pub use game::{Feedback, evaluate_guess, feedback_string, is_valid_guess, pick_secret};
pub use runner::game_loop;
pub use session::{Clock, PlayerSession, SystemClock, score};
pub use store::{ScoreRecord, ScoreStore, default_db_path};
