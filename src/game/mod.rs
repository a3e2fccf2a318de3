// Puzzle engine: board dealing, side adjacency and the word chain

pub mod generator;
pub mod layout;
pub mod session;
pub mod validator;

pub use generator::BoardGenerator;
pub use layout::{place_letters, LetterPlacement};
pub use session::{Accepted, Backspace, GameError, GameState, GuessError, MIN_WORD_LEN};
pub use validator::{LetterError, WordValidator};
