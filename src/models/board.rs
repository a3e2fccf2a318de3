use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::letters::{is_vowel, ALPHABET_LEN};

pub const MIN_SIDES: usize = 3;
pub const MAX_SIDES: usize = 6;
pub const MIN_LETTERS_PER_SIDE: usize = 3;
pub const MAX_LETTERS_PER_SIDE: usize = 4;
/// A board always carries at least this many distinct vowels
pub const MIN_VOWELS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("a board needs between {min} and {max} sides, got {0}", min = MIN_SIDES, max = MAX_SIDES)]
    SidesOutOfRange(usize),
    #[error(
        "each side needs between {min} and {max} letters, got {0}",
        min = MIN_LETTERS_PER_SIDE,
        max = MAX_LETTERS_PER_SIDE
    )]
    LettersOutOfRange(usize),
    #[error("{sides} sides of {letters} letters need more than {max} letters", max = ALPHABET_LEN)]
    TooManyLetters { sides: usize, letters: usize },
    #[error("side {side} has {found} letters, expected {expected}")]
    UnevenSide { side: usize, expected: usize, found: usize },
    #[error("'{0}' is not an uppercase letter")]
    InvalidLetter(char),
    #[error("letter {0} appears more than once")]
    DuplicateLetter(char),
    #[error("a board needs at least {min} distinct vowels, found {0}", min = MIN_VOWELS)]
    NotEnoughVowels(usize),
}

/// Board dimensions that are known to produce a legal board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSize {
    sides: usize,
    letters_per_side: usize,
}

impl BoardSize {
    pub fn new(sides: usize, letters_per_side: usize) -> Result<Self, BoardError> {
        if !(MIN_SIDES..=MAX_SIDES).contains(&sides) {
            return Err(BoardError::SidesOutOfRange(sides));
        }
        if !(MIN_LETTERS_PER_SIDE..=MAX_LETTERS_PER_SIDE).contains(&letters_per_side) {
            return Err(BoardError::LettersOutOfRange(letters_per_side));
        }
        if sides * letters_per_side > ALPHABET_LEN {
            return Err(BoardError::TooManyLetters {
                sides,
                letters: letters_per_side,
            });
        }
        Ok(Self {
            sides,
            letters_per_side,
        })
    }

    pub fn sides(&self) -> usize {
        self.sides
    }

    pub fn letters_per_side(&self) -> usize {
        self.letters_per_side
    }

    pub fn total_letters(&self) -> usize {
        self.sides * self.letters_per_side
    }
}

impl Default for BoardSize {
    /// Four sides of three letters
    fn default() -> Self {
        Self {
            sides: 4,
            letters_per_side: 3,
        }
    }
}

/// One edge of the letter polygon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Side {
    letters: Vec<char>,
}

impl Side {
    pub fn new(letters: Vec<char>) -> Self {
        Self { letters }
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, letter) in self.letters.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

/// The letter polygon: an ordered list of sides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    sides: Vec<Side>,
}

impl Board {
    /// A board with no sides. Generation returns this for impossible sizes.
    pub fn empty() -> Self {
        Self { sides: Vec::new() }
    }

    /// Build a board from explicit sides, checking every board invariant.
    ///
    /// Letters are expected in uppercase. Side count and length are only
    /// checked for consistency here, not against the generator bounds, so
    /// hand-made boards (e.g. in tests) can be any shape that fits the alphabet.
    pub fn from_sides(sides: Vec<Vec<char>>) -> Result<Self, BoardError> {
        let expected = sides.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(BoardError::LettersOutOfRange(0));
        }

        let mut seen = BTreeSet::new();
        for (index, side) in sides.iter().enumerate() {
            if side.len() != expected {
                return Err(BoardError::UnevenSide {
                    side: index,
                    expected,
                    found: side.len(),
                });
            }
            for &letter in side {
                if !letter.is_ascii_uppercase() {
                    return Err(BoardError::InvalidLetter(letter));
                }
                if !seen.insert(letter) {
                    return Err(BoardError::DuplicateLetter(letter));
                }
            }
        }

        let vowels = seen.iter().filter(|ch| is_vowel(**ch)).count();
        if vowels < MIN_VOWELS {
            return Err(BoardError::NotEnoughVowels(vowels));
        }

        Ok(Self {
            sides: sides.into_iter().map(Side::new).collect(),
        })
    }

    pub(crate) fn from_sides_unchecked(sides: Vec<Side>) -> Self {
        Self { sides }
    }

    pub fn sides(&self) -> &[Side] {
        &self.sides
    }

    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }

    /// Index of the first side holding `letter`
    pub fn side_of(&self, letter: char) -> Option<usize> {
        self.sides.iter().position(|side| side.contains(letter))
    }

    pub fn contains(&self, letter: char) -> bool {
        self.side_of(letter).is_some()
    }

    /// All letters in side order
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.sides.iter().flat_map(|side| side.letters().iter().copied())
    }

    pub fn distinct_letters(&self) -> BTreeSet<char> {
        self.letters().collect()
    }

    pub fn letter_count(&self) -> usize {
        self.sides.iter().map(Side::len).sum()
    }
}
