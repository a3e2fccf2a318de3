use std::collections::HashSet;
use once_cell::sync::Lazy;

/// Number of letters in the board alphabet
pub const ALPHABET_LEN: usize = 26;

/// Vowels, in alphabetical order
pub const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

/// Every board letter, A through Z
pub static ALPHABET: Lazy<Vec<char>> = Lazy::new(|| ('A'..='Z').collect());

/// Everything in the alphabet that is not a vowel
pub static CONSONANTS: Lazy<Vec<char>> = Lazy::new(|| {
    ALPHABET
        .iter()
        .copied()
        .filter(|ch| !VOWELS.contains(ch))
        .collect()
});

static VOWEL_SET: Lazy<HashSet<char>> = Lazy::new(|| VOWELS.into_iter().collect());

/// Check whether a letter is a vowel (case-insensitive)
pub fn is_vowel(letter: char) -> bool {
    VOWEL_SET.contains(&letter.to_ascii_uppercase())
}

/// Upper-case a typed character, or `None` if it can never appear on a board
pub fn normalize(letter: char) -> Option<char> {
    if letter.is_ascii_alphabetic() {
        Some(letter.to_ascii_uppercase())
    } else {
        None
    }
}
