use thiserror::Error;

/// Errors surfaced by the game, session, and storage layers.
#[derive(Debug, Error)]
pub enum GameError {
    /// The guess failed validation; the session is unchanged.
    #[error("invalid guess: {0}")]
    InvalidGuess(&'static str),

    /// A guess was submitted after the session was already solved.
    #[error("session is already solved; no further guesses accepted")]
    SessionSolved,

    /// An unsolved session was passed to an operation that requires a
    /// solved one, such as saving a score.
    #[error("session is not solved yet")]
    SessionUnsolved,

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
