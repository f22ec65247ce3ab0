use std::io::BufRead;

use log::{debug, info};
use rand::Rng;

use crate::cli::{self, GuessInput};
use crate::error::GameError;
use crate::game::pick_secret;
use crate::session::{Clock, PlayerSession};
use crate::store::ScoreStore;

const LEADERBOARD_SIZE: usize = 10;

/// Run the interactive loop: prompt for a name, play sessions until the
/// player quits or declines another round, saving each solved session and
/// showing the leaderboard after it.
///
/// The reader, clock, and random source come in as parameters so tests can
/// script input, freeze time, and fix the secret.
pub fn game_loop<R, C, G>(
    store: &ScoreStore,
    clock: &C,
    rng: &mut G,
    mut reader: R,
) -> Result<(), GameError>
where
    R: BufRead,
    C: Clock,
    G: Rng,
{
    cli::display_welcome();

    loop {
        let Some(player_name) = cli::read_player_name(&mut reader)? else {
            cli::display_goodbye_message();
            return Ok(());
        };
        let mut session = PlayerSession::new(player_name, pick_secret(rng), clock.now());
        info!("session started for {}", session.player_name());
        println!(
            "\nA new secret number has been generated. Start guessing, {}!",
            session.player_name()
        );

        while !session.is_solved() {
            let guess = match cli::read_guess(&mut reader)? {
                GuessInput::Exit => {
                    debug!(
                        "session for {} abandoned after {} guesses",
                        session.player_name(),
                        session.guess_count()
                    );
                    cli::display_exit_message();
                    return Ok(());
                }
                GuessInput::Invalid => continue,
                GuessInput::Valid(guess) => guess,
            };

            match session.guess(&guess, clock.now()) {
                Ok(feedback) => cli::display_feedback(&feedback),
                Err(GameError::InvalidGuess(reason)) => {
                    println!("Invalid input: {reason}.");
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        if let (Some(seconds), Some(score)) = (session.elapsed_seconds(), session.score()) {
            cli::display_victory(session.player_name(), session.guess_count(), seconds, score);
        }

        store.save(&session)?;
        let top = store.top(LEADERBOARD_SIZE)?;
        cli::display_leaderboard(&top);

        if !cli::read_play_again(&mut reader)? {
            cli::display_goodbye_message();
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
    }

    fn store() -> ScoreStore {
        let store = ScoreStore::open_in_memory().unwrap();
        store.init().unwrap();
        store
    }

    /// Secret produced by a fresh rng with this seed, so scripted input
    /// can solve the game.
    fn secret_for_seed(seed: u64) -> String {
        let mut rng = StdRng::seed_from_u64(seed);
        pick_secret(&mut rng)
    }

    #[test]
    fn test_solved_game_is_saved() {
        let store = store();
        let secret = secret_for_seed(7);
        let input = format!("Alice\n{secret}\nn\n");
        let mut rng = StdRng::seed_from_u64(7);

        game_loop(&store, &fixed_clock(), &mut rng, Cursor::new(input)).unwrap();

        let records = store.top(10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].player_name, "Alice");
        assert_eq!(records[0].guesses, 1);
        assert_eq!(records[0].time_seconds, 0.0);
    }

    #[test]
    fn test_quit_mid_session_saves_nothing() {
        let store = store();
        // "1111" can never be the secret (secret digits are unique), so
        // the session is still in progress when 'q' arrives.
        let input = "Alice\n1111\nq\n";
        let mut rng = StdRng::seed_from_u64(7);

        game_loop(&store, &fixed_clock(), &mut rng, Cursor::new(input)).unwrap();

        assert!(store.top(10).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_guesses_do_not_count() {
        let store = store();
        let secret = secret_for_seed(3);
        // Two malformed guesses before the winning one.
        let input = format!("Bob\n12\nab12\n{secret}\nn\n");
        let mut rng = StdRng::seed_from_u64(3);

        game_loop(&store, &fixed_clock(), &mut rng, Cursor::new(input)).unwrap();

        let records = store.top(10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].guesses, 1);
    }

    #[test]
    fn test_play_again_runs_second_session() {
        let store = store();
        let secret_one = secret_for_seed(11);
        let mut rng = StdRng::seed_from_u64(11);
        // The second session draws from the same rng stream, so learn its
        // secret by replaying the stream.
        let secret_two = {
            let mut preview = StdRng::seed_from_u64(11);
            pick_secret(&mut preview);
            pick_secret(&mut preview)
        };
        let input = format!("Alice\n{secret_one}\ny\nBob\n{secret_two}\nn\n");

        game_loop(&store, &fixed_clock(), &mut rng, Cursor::new(input)).unwrap();

        let records = store.top(10).unwrap();
        assert_eq!(records.len(), 2);
        let mut names: Vec<_> = records.into_iter().map(|r| r.player_name).collect();
        names.sort();
        assert_eq!(names, ["Alice", "Bob"]);
    }

    #[test]
    fn test_eof_at_name_prompt_exits_cleanly() {
        let store = store();
        let mut rng = StdRng::seed_from_u64(1);
        game_loop(&store, &fixed_clock(), &mut rng, Cursor::new("")).unwrap();
        assert!(store.top(10).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_guesses_are_counted() {
        let store = store();
        let secret = secret_for_seed(5);
        // One valid-but-wrong guess, then the secret. A permutation of the
        // secret's digits is guaranteed not to equal it.
        let wrong: String = secret.chars().rev().collect();
        let input = format!("Cara\n{wrong}\n{secret}\nn\n");
        let mut rng = StdRng::seed_from_u64(5);

        game_loop(&store, &fixed_clock(), &mut rng, Cursor::new(input)).unwrap();

        let records = store.top(10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].guesses, 2);
    }
}
