//! Score persistence over a local SQLite database.
//!
//! One append-only `scores` table holds completed sessions:
//! - `player_name` TEXT — who played
//! - `guesses` INTEGER — guesses taken
//! - `time_seconds` REAL — elapsed play time in seconds
//! - `score` REAL — combined score, lower is better
//! - `played_at` TEXT — RFC 3339 completion timestamp
//!
//! Rows are only ever inserted, never updated or deleted.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info};
use rusqlite::{Connection, params};

use crate::error::GameError;
use crate::session::{PlayerSession, score};

const CREATE_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS scores (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    player_name   TEXT    NOT NULL,
    guesses       INTEGER NOT NULL,
    time_seconds  REAL    NOT NULL,
    score         REAL    NOT NULL,
    played_at     TEXT    NOT NULL
);
";

// Leaderboard queries sort by score ascending (best first) and break ties
// by the most recent played_at.
const CREATE_INDEX_SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_scores_score_played_at
    ON scores(score ASC, played_at DESC);
";

const INSERT_SESSION_SQL: &str = "
INSERT INTO scores (player_name, guesses, time_seconds, score, played_at)
VALUES (?1, ?2, ?3, ?4, ?5);
";

const SELECT_TOP_N_SQL: &str = "
SELECT player_name, guesses, time_seconds, score, played_at
FROM scores
ORDER BY score ASC, played_at DESC
LIMIT ?1;
";

/// One persisted, completed session as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub player_name: String,
    pub guesses: u32,
    pub time_seconds: f64,
    pub score: f64,
    pub played_at: DateTime<Utc>,
}

/// Handle to the score database, created once at startup and passed to
/// everything that needs it.
pub struct ScoreStore {
    conn: Connection,
}

impl ScoreStore {
    /// Open (or create) the database file at `path`, creating parent
    /// directories as needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        debug!("opening score database at {}", path.display());
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    /// In-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self, GameError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create the scores table and index if they don't exist yet.
    /// Safe to call repeatedly; existing records are untouched.
    pub fn init(&self) -> Result<(), GameError> {
        self.conn.execute(CREATE_TABLE_SQL, [])?;
        self.conn.execute(CREATE_INDEX_SQL, [])?;
        debug!("score schema ready");
        Ok(())
    }

    /// Persist a solved session as a new immutable record.
    ///
    /// Fails with `SessionUnsolved` (and inserts nothing) if the session
    /// hasn't been solved.
    pub fn save(&self, session: &PlayerSession) -> Result<(), GameError> {
        let Some(solved_at) = session.solved_at() else {
            return Err(GameError::SessionUnsolved);
        };
        let time_seconds = (solved_at - session.started_at()).num_milliseconds() as f64 / 1000.0;
        let final_score = score(session.guess_count(), time_seconds);

        self.conn.execute(
            INSERT_SESSION_SQL,
            params![
                session.player_name(),
                session.guess_count(),
                time_seconds,
                final_score,
                solved_at,
            ],
        )?;
        info!(
            "saved session for {}: {} guesses, {:.1}s, score {:.1}",
            session.player_name(),
            session.guess_count(),
            time_seconds,
            final_score
        );
        Ok(())
    }

    /// Best `n` records, lowest score first, ties broken by most recent
    /// `played_at`. Returns fewer than `n` if the store holds fewer.
    pub fn top(&self, n: usize) -> Result<Vec<ScoreRecord>, GameError> {
        if n == 0 {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(SELECT_TOP_N_SQL)?;
        let rows = stmt.query_map(params![n as i64], |row| {
            Ok(ScoreRecord {
                player_name: row.get(0)?,
                guesses: row.get(1)?,
                time_seconds: row.get(2)?,
                score: row.get(3)?,
                played_at: row.get(4)?,
            })
        })?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

/// Default database location: the user's local data directory, falling
/// back to the current directory.
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("number-guess").join("scores.db"))
        .unwrap_or_else(|| PathBuf::from("scores.db"))
}
