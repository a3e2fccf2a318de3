use thiserror::Error;

use crate::{models::Board, utils::letters::normalize};

/// Why a typed letter cannot extend the current word
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LetterError {
    #[error("'{0}' is not a letter")]
    NotALetter(char),
    #[error("{0} is not on the board")]
    NotOnBoard(char),
    #[error("{letter} is on the same side as {previous}")]
    SameSide { letter: char, previous: char },
}

pub struct WordValidator<'a> {
    board: &'a Board,
}

impl<'a> WordValidator<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// Check that `letter` may be appended to `current`.
    ///
    /// Returns the normalised (uppercase) letter. Letters may repeat within a
    /// word; only the side of the immediately preceding letter matters.
    pub fn check_extension(&self, current: &str, letter: char) -> Result<char, LetterError> {
        let letter = normalize(letter).ok_or(LetterError::NotALetter(letter))?;
        if !self.board.contains(letter) {
            return Err(LetterError::NotOnBoard(letter));
        }

        if let Some(previous) = current.chars().last() {
            if self.share_side(letter, previous) {
                return Err(LetterError::SameSide { letter, previous });
            }
        }

        Ok(letter)
    }

    /// First letter of `word` that does not appear on the board
    pub fn first_off_board(&self, word: &str) -> Option<char> {
        word.chars().find(|letter| !self.board.contains(*letter))
    }

    /// Validate that an entire word can be traced on the board
    #[cfg(test)]
    pub fn is_valid_path(&self, word: &str) -> bool {
        if word.is_empty() || self.first_off_board(word).is_some() {
            return false;
        }

        let mut sides = Vec::with_capacity(word.len());
        for letter in word.chars() {
            match self.board.side_of(letter) {
                Some(side) => sides.push(side),
                None => return false,
            }
        }

        sides.windows(2).all(|pair| pair[0] != pair[1])
    }

    /// Check if two letters sit on the same side of the board
    fn share_side(&self, first: char, second: char) -> bool {
        match (self.board.side_of(first), self.board.side_of(second)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
