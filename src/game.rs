use rand::Rng;

/// Number of digits in a secret (and therefore in every guess).
pub const SECRET_LEN: usize = 4;

/// Per-position result of comparing one guessed digit against the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Correct digit in the correct position.
    Exact,
    /// Digit occurs in the secret, but at a different position.
    Present,
    /// Digit does not occur in the secret.
    Absent,
}

impl Feedback {
    pub fn as_char(self) -> char {
        match self {
            Feedback::Exact => '+',
            Feedback::Present => '-',
            Feedback::Absent => ' ',
        }
    }
}

/// Render a feedback row as its display string, e.g. "+ --".
pub fn feedback_string(feedback: &[Feedback; SECRET_LEN]) -> String {
    feedback.iter().map(|f| f.as_char()).collect()
}

pub fn is_all_exact(feedback: &[Feedback; SECRET_LEN]) -> bool {
    feedback.iter().all(|f| *f == Feedback::Exact)
}

pub fn is_valid_guess(guess: &str) -> bool {
    guess.len() == SECRET_LEN && guess.bytes().all(|b| b.is_ascii_digit())
}

/// Generate a secret of `SECRET_LEN` distinct decimal digits.
///
/// Takes the random source as a parameter so tests can pass a seeded rng.
pub fn pick_secret<R: Rng + ?Sized>(rng: &mut R) -> String {
    rand::seq::index::sample(rng, 10, SECRET_LEN)
        .iter()
        .map(|d| char::from(b'0' + d as u8))
        .collect()
}

/// Evaluate a guess against the secret, position by position.
///
/// Two passes: exact matches first, each consuming its secret digit, then
/// present-elsewhere matches in position order, each consuming the secret
/// digit it claims. The secret has no duplicate digits, so a digit repeated
/// in the guess can be marked `Present` at most once; further copies come
/// out `Absent`.
///
/// Expects both inputs to be `SECRET_LEN` digits (see `is_valid_guess`).
pub fn evaluate_guess(secret: &str, guess: &str) -> [Feedback; SECRET_LEN] {
    let secret: Vec<char> = secret.chars().collect();
    let guess: Vec<char> = guess.chars().collect();
    let mut feedback = [Feedback::Absent; SECRET_LEN];
    let mut available = [true; SECRET_LEN];

    for i in 0..SECRET_LEN {
        if guess[i] == secret[i] {
            feedback[i] = Feedback::Exact;
            available[i] = false;
        }
    }

    for i in 0..SECRET_LEN {
        if feedback[i] == Feedback::Exact {
            continue;
        }
        if let Some(j) = (0..SECRET_LEN).find(|&j| available[j] && secret[j] == guess[i]) {
            feedback[i] = Feedback::Present;
            available[j] = false;
        }
    }

    feedback
}
