use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

use crate::game::{Feedback, SECRET_LEN, feedback_string, is_valid_guess};
use crate::store::ScoreRecord;

const EXIT_COMMANDS: [&str; 3] = ["Q", "QUIT", "EXIT"];

/// Number-guessing game CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the score database (defaults to the user data directory)
    #[arg(short = 'd', long = "db")]
    pub db_path: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

pub enum GuessInput {
    Valid(String),
    Invalid,
    Exit,
}

pub fn display_welcome() {
    println!("Welcome to the Guessing Number Game!");
}

/// Prompt until a non-empty player name is entered.
/// Returns `None` on end of input.
pub fn read_player_name<R: BufRead>(reader: &mut R) -> std::io::Result<Option<String>> {
    loop {
        println!("Enter your name:");
        let mut input = String::new();
        if reader.read_line(&mut input)? == 0 {
            return Ok(None);
        }
        let name = input.trim();
        if name.is_empty() {
            println!("Name cannot be empty. Please enter your name.");
            continue;
        }
        return Ok(Some(name.to_string()));
    }
}

/// Prompt for a 4-digit guess or an exit command.
/// End of input counts as exiting.
pub fn read_guess<R: BufRead>(reader: &mut R) -> std::io::Result<GuessInput> {
    println!("\nEnter your 4-digit guess (or 'q' to quit):");
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(GuessInput::Exit);
    }
    let input = input.trim();

    if EXIT_COMMANDS.contains(&input.to_uppercase().as_str()) {
        return Ok(GuessInput::Exit);
    }
    if input.len() != SECRET_LEN {
        println!("Invalid input: Guess must be exactly 4 digits.");
        return Ok(GuessInput::Invalid);
    }
    if !is_valid_guess(input) {
        println!("Invalid input: Guess must only contain digits (0-9).");
        return Ok(GuessInput::Invalid);
    }
    Ok(GuessInput::Valid(input.to_string()))
}

/// Ask whether to play another round. Anything but y/Y (including end of
/// input) means no.
pub fn read_play_again<R: BufRead>(reader: &mut R) -> std::io::Result<bool> {
    println!("Play again? (y/n):");
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(false);
    }
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

pub fn display_feedback(feedback: &[Feedback; SECRET_LEN]) {
    println!("Feedback: [{}]", feedback_string(feedback));
}

pub fn display_victory(player_name: &str, guesses: u32, seconds: f64, score: f64) {
    println!(
        "\nCongratulations, {player_name}! You solved the puzzle in {guesses} guesses and {seconds:.1} seconds."
    );
    println!("Your score: {score:.1} (lower is better)");
}

pub fn display_leaderboard(records: &[ScoreRecord]) {
    println!("\n=== Global Leaderboard ===");
    println!(
        "{:<4}  {:<10} {:<7} {:<8} {:<6} Played At",
        "Rank", "Name", "Guesses", "Time(s)", "Score"
    );
    for (idx, rec) in records.iter().enumerate() {
        println!(
            "{:<4}  {:<10} {:^7}  {:^8.1}  {:^6.1}  {}",
            idx + 1,
            rec.player_name,
            rec.guesses,
            rec.time_seconds,
            rec.score,
            rec.played_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    println!("==========================\n");
}

pub fn display_exit_message() {
    println!("Exiting the game. Goodbye!");
}

pub fn display_goodbye_message() {
    println!("Thanks for playing! Goodbye.");
}
