pub mod board;
pub mod game;

pub use board::{
    Board, BoardError, BoardSize, Side, MAX_LETTERS_PER_SIDE, MAX_SIDES, MIN_LETTERS_PER_SIDE,
    MIN_SIDES, MIN_VOWELS,
};
pub use game::{GameSnapshot, Phase};
