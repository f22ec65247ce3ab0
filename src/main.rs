use std::io;

use number_guess::cli::parse_cli;
use number_guess::{ScoreStore, SystemClock, default_db_path, game_loop};

fn main() {
    env_logger::init();

    let cli = parse_cli();
    let db_path = cli.db_path.unwrap_or_else(default_db_path);

    let store = match ScoreStore::open(&db_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open score database '{}': {e}", db_path.display());
            return;
        }
    };
    if let Err(e) = store.init() {
        eprintln!("Failed to initialize score database: {e}");
        return;
    }

    let stdin = io::stdin();
    let mut rng = rand::rng();
    if let Err(e) = game_loop(&store, &SystemClock, &mut rng, stdin.lock()) {
        eprintln!("Game error: {e}");
    }
}
