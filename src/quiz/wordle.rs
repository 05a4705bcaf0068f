use rand::seq::SliceRandom;
use std::collections::HashMap;

pub const WORD_LENGTH: usize = 5;
pub const MAX_ATTEMPTS: usize = 6;

// Winter-themed secrets to match the hunt ("nisse" is the Norwegian
// Christmas gnome the family swears by)
const SECRET_WORDS: [&str; 8] = [
    "nisse", "holly", "merry", "carol", "frost", "gifts", "snowy", "cabin",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LetterScore {
    Hit,
    Present,
    Miss,
}

// Two passes over the guess: exact positions first, then letters that are
// in the word but misplaced. Each secret letter is only credited once, so
// a doubled letter in the guess can't earn two tiles from a single
// occurrence in the secret.
pub fn score_guess(guess: &str, secret: &str) -> Vec<LetterScore> {
    let guess_chars: Vec<char> = guess.chars().collect();
    let secret_chars: Vec<char> = secret.chars().collect();

    let mut remaining: HashMap<char, usize> = HashMap::new();
    for c in &secret_chars {
        *remaining.entry(*c).or_insert(0) += 1;
    }

    let mut scores = vec![LetterScore::Miss; guess_chars.len()];
    for (i, g) in guess_chars.iter().enumerate() {
        if secret_chars.get(i) == Some(g) {
            scores[i] = LetterScore::Hit;
            if let Some(count) = remaining.get_mut(g) {
                *count -= 1;
            }
        }
    }

    for (i, g) in guess_chars.iter().enumerate() {
        if scores[i] == LetterScore::Hit {
            continue;
        }
        if let Some(count) = remaining.get_mut(g) {
            if *count > 0 {
                scores[i] = LetterScore::Present;
                *count -= 1;
            }
        }
    }

    scores
}

pub fn is_valid_guess(guess: &str) -> bool {
    let guess = guess.trim();
    guess.chars().count() == WORD_LENGTH && guess.chars().all(|c| c.is_alphabetic())
}

pub fn render_tiles(guess: &str, scores: &[LetterScore]) -> String {
    let letters = guess
        .trim()
        .to_uppercase()
        .chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    let tiles = scores
        .iter()
        .map(|score| match score {
            LetterScore::Hit => "🟩",
            LetterScore::Present => "🟨",
            LetterScore::Miss => "⬜",
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("{}\n{}", letters, tiles)
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct WordleGame {
    pub secret: String,
    pub guesses: Vec<String>,
}

impl WordleGame {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            guesses: Vec::new(),
        }
    }

    pub fn with_random_secret() -> Self {
        // It is safe to unwrap here because the built-in word list is never empty
        let secret = SECRET_WORDS.choose(&mut rand::thread_rng()).unwrap();
        Self::new(secret.to_string())
    }

    pub fn submit(&mut self, guess: &str) -> Vec<LetterScore> {
        let guess = guess.trim().to_lowercase();
        let scores = score_guess(&guess, &self.secret);
        self.guesses.push(guess);
        scores
    }

    pub fn is_won(&self) -> bool {
        self.guesses.last().map_or(false, |g| g == &self.secret)
    }

    pub fn is_over(&self) -> bool {
        self.is_won() || self.guesses.len() >= MAX_ATTEMPTS
    }

    pub fn attempts_left(&self) -> usize {
        MAX_ATTEMPTS.saturating_sub(self.guesses.len())
    }
}
