use std::collections::BTreeSet;

use thiserror::Error;

use crate::{
    dictionary::Dictionary,
    game::validator::{LetterError, WordValidator},
    models::{Board, GameSnapshot, Phase},
};

/// Shortest word the chain accepts
pub const MIN_WORD_LEN: usize = 3;

/// Why a submitted word was turned down
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("you must enter at least {min} letters!", min = MIN_WORD_LEN)]
    TooShort,
    #[error("words must start with {expected}, the last letter of the previous word")]
    WrongStart { expected: char },
    #[error("{0} has already been guessed")]
    AlreadyGuessed(String),
    #[error("{0} is not a valid word!")]
    NotInDictionary(String),
    #[error("{0} is not on the board")]
    OffBoard(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("start a new game first")]
    NotInProgress,
    #[error(transparent)]
    Letter(#[from] LetterError),
    #[error(transparent)]
    Guess(#[from] GuessError),
}

/// Outcome of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub word: String,
    pub won: bool,
}

/// What a backspace did to the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backspace {
    /// The last typed letter was removed
    Removed(char),
    /// The last accepted word was pulled back off the chain for editing
    Undone(String),
    /// Nothing left to delete
    Nothing,
}

/// A single word-chain puzzle: the board, the chain so far and the word being typed
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current_word: String,
    guessed_words: Vec<String>,
    used_letters: BTreeSet<char>,
    phase: Phase,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::empty(),
            current_word: String::new(),
            guessed_words: Vec::new(),
            used_letters: BTreeSet::new(),
            phase: Phase::Setup,
        }
    }

    /// Throw away any previous progress and start playing on `board`
    pub fn new_game(&mut self, board: Board) {
        tracing::info!(
            "New game on {} sides of {} letters",
            board.sides().len(),
            board.sides().first().map(|side| side.len()).unwrap_or(0)
        );

        self.board = board;
        self.current_word.clear();
        self.guessed_words.clear();
        self.used_letters.clear();
        self.phase = Phase::InProgress;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn guessed_words(&self) -> &[String] {
        &self.guessed_words
    }

    pub fn used_letters(&self) -> &BTreeSet<char> {
        &self.used_letters
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_won(&self) -> bool {
        self.phase == Phase::Won
    }

    /// One point per word in the chain
    pub fn score(&self) -> usize {
        self.guessed_words.len()
    }

    /// The letter the next word has to begin with, once a chain exists
    pub fn chain_letter(&self) -> Option<char> {
        self.guessed_words.last().and_then(|word| word.chars().last())
    }

    /// Append a typed character to the current word
    pub fn type_letter(&mut self, letter: char) -> Result<char, GameError> {
        self.ensure_in_progress()?;

        let letter = WordValidator::new(&self.board).check_extension(&self.current_word, letter)?;
        self.current_word.push(letter);
        Ok(letter)
    }

    pub fn backspace(&mut self) -> Result<Backspace, GameError> {
        self.ensure_in_progress()?;

        // Only the carried-over chain letter is left: step back into the previous word
        if self.current_word.chars().count() <= 1 && !self.guessed_words.is_empty() {
            let Some(word) = self.guessed_words.pop() else {
                return Ok(Backspace::Nothing);
            };
            self.current_word = word.clone();
            self.recompute_used_letters();
            tracing::debug!("Undid {}, chain is now {} words", word, self.guessed_words.len());
            return Ok(Backspace::Undone(word));
        }

        Ok(match self.current_word.pop() {
            Some(letter) => Backspace::Removed(letter),
            None => Backspace::Nothing,
        })
    }

    /// Submit the word typed so far
    pub fn submit(&mut self, dictionary: &Dictionary) -> Result<Accepted, GameError> {
        let word = self.current_word.clone();
        self.submit_word(&word, dictionary)
    }

    /// Run the chain rules against `word` and, on success, append it.
    ///
    /// The checks are: length, board membership, dictionary membership,
    /// repetition and chain continuity, in that order. Side adjacency is enforced as letters are
    /// typed, not here. A rejected word leaves the state untouched.
    pub fn submit_word(&mut self, word: &str, dictionary: &Dictionary) -> Result<Accepted, GameError> {
        self.ensure_in_progress()?;

        let word = word.to_uppercase();
        if let Err(e) = self.check_word(&word, dictionary) {
            tracing::debug!("Rejected {}: {}", word, e);
            return Err(e.into());
        }

        self.guessed_words.push(word.clone());
        self.current_word = word.chars().last().map(String::from).unwrap_or_default();
        self.recompute_used_letters();

        // An empty board has nothing to cover, so it can never be won
        let won = !self.board.is_empty() && self.used_letters == self.board.distinct_letters();
        if won {
            self.phase = Phase::Won;
            tracing::info!("Board solved in {} words", self.guessed_words.len());
        } else {
            tracing::debug!(
                "Accepted {}, {} of {} letters used",
                word,
                self.used_letters.len(),
                self.board.distinct_letters().len()
            );
        }

        Ok(Accepted { word, won })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            sides: self.board.sides().to_vec(),
            current_word: self.current_word.clone(),
            guessed_words: self.guessed_words.clone(),
            used_letters: self.used_letters.clone(),
            score: self.score(),
        }
    }

    fn check_word(&self, word: &str, dictionary: &Dictionary) -> Result<(), GuessError> {
        if word.chars().count() < MIN_WORD_LEN {
            return Err(GuessError::TooShort);
        }

        if let Some(letter) = WordValidator::new(&self.board).first_off_board(word) {
            return Err(GuessError::OffBoard(letter));
        }

        if !dictionary.contains(word) {
            return Err(GuessError::NotInDictionary(word.to_string()));
        }

        if self.guessed_words.iter().any(|guessed| guessed == word) {
            return Err(GuessError::AlreadyGuessed(word.to_string()));
        }

        if let Some(expected) = self.chain_letter() {
            if !word.starts_with(expected) {
                return Err(GuessError::WrongStart { expected });
            }
        }

        Ok(())
    }

    fn recompute_used_letters(&mut self) {
        self.used_letters = self
            .guessed_words
            .iter()
            .flat_map(|word| word.chars())
            .collect();
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::InProgress => Ok(()),
            Phase::Setup | Phase::Won => Err(GameError::NotInProgress),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    /// The side layout here makes A-B and D-E same-side pairs
    fn scenario_board() -> Board {
        Board::from_sides(vec![
            vec!['A', 'B', 'C'],
            vec!['D', 'E', 'F'],
            vec!['G', 'H', 'I'],
        ])
        .unwrap()
    }

    /// Same letters, arranged so ABD and DEG can be typed key by key
    fn typing_board() -> Board {
        Board::from_sides(vec![
            vec!['A', 'D', 'H'],
            vec!['B', 'E', 'C'],
            vec!['G', 'F', 'I'],
        ])
        .unwrap()
    }

    fn started(board: Board) -> GameState {
        let mut game = GameState::new();
        game.new_game(board);
        game
    }

    fn type_word(game: &mut GameState, word: &str) -> Result<(), GameError> {
        for letter in word.chars() {
            game.type_letter(letter)?;
        }
        Ok(())
    }

    #[test]
    fn test_new_game_starts_in_progress() {
        let mut game = GameState::new();
        assert_eq!(game.phase(), Phase::Setup);
        assert_eq!(game.type_letter('A'), Err(GameError::NotInProgress));

        game.new_game(scenario_board());
        assert_eq!(game.phase(), Phase::InProgress);
        assert_eq!(game.current_word(), "");
        assert!(game.guessed_words().is_empty());
        assert!(game.used_letters().is_empty());
    }

    #[test]
    fn test_scenario_chain() {
        let dict = Dictionary::from_words(["ABD", "DEG"]);
        let mut game = started(scenario_board());

        let first = assert_ok!(game.submit_word("ABD", &dict));
        assert!(!first.won);
        assert_eq!(game.current_word(), "D");

        assert_ok!(game.submit_word("DEG", &dict));
        assert_eq!(game.guessed_words(), ["ABD", "DEG"]);
        let expected: BTreeSet<char> = ['A', 'B', 'D', 'E', 'G'].into_iter().collect();
        assert_eq!(game.used_letters(), &expected);
        assert_eq!(game.score(), 2);
        assert_eq!(game.phase(), Phase::InProgress);
    }

    #[test]
    fn test_repeated_word_rejected() {
        let dict = Dictionary::from_words(["ABD", "DEG"]);
        let mut game = started(scenario_board());

        assert_ok!(game.submit_word("ABD", &dict));
        assert_eq!(
            game.submit_word("ABD", &dict),
            Err(GameError::Guess(GuessError::AlreadyGuessed("ABD".to_string())))
        );
        assert_eq!(game.guessed_words(), ["ABD"]);
        assert_eq!(game.current_word(), "D");
    }

    #[test]
    fn test_off_board_word_rejected() {
        let dict = Dictionary::from_words(["XYZ", "ABX"]);
        let mut game = started(scenario_board());

        assert_eq!(
            game.submit_word("XYZ", &dict),
            Err(GameError::Guess(GuessError::OffBoard('X')))
        );
        assert_eq!(
            game.submit_word("abx", &dict),
            Err(GameError::Guess(GuessError::OffBoard('X')))
        );
        assert!(game.guessed_words().is_empty());
        assert!(game.used_letters().is_empty());
        assert_eq!(game.current_word(), "");
    }

    #[test]
    fn test_empty_board_is_never_won() {
        let dict = Dictionary::from_words(["CAT"]);
        let mut game = started(Board::empty());

        assert_eq!(
            game.submit_word("CAT", &dict),
            Err(GameError::Guess(GuessError::OffBoard('C')))
        );
        assert_eq!(game.phase(), Phase::InProgress);
        assert!(!game.is_won());
    }

    #[test]
    fn test_wrong_start_rejected() {
        let dict = Dictionary::from_words(["ABD", "GAB"]);
        let mut game = started(scenario_board());

        assert_ok!(game.submit_word("ABD", &dict));
        assert_eq!(
            game.submit_word("GAB", &dict),
            Err(GameError::Guess(GuessError::WrongStart { expected: 'D' }))
        );
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_repeated_word_self_chaining() {
        // A word that starts and ends with the same letter can only repeat itself
        let board = Board::from_sides(vec![
            vec!['A', 'B', 'C'],
            vec!['D', 'E', 'F'],
            vec!['G', 'H', 'I'],
        ])
        .unwrap();
        let dict = Dictionary::from_words(["ADA"]);
        let mut game = started(board);

        assert_ok!(game.submit_word("ADA", &dict));
        assert_eq!(
            game.submit_word("ADA", &dict),
            Err(GameError::Guess(GuessError::AlreadyGuessed("ADA".to_string())))
        );
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_too_short_and_unknown_words() {
        let dict = Dictionary::from_words(["ADG"]);
        let mut game = started(typing_board());

        assert_eq!(
            game.submit_word("AD", &dict),
            Err(GameError::Guess(GuessError::TooShort))
        );
        assert_eq!(
            game.submit_word("AGA", &dict),
            Err(GameError::Guess(GuessError::NotInDictionary("AGA".to_string())))
        );
        assert!(game.guessed_words().is_empty());
    }

    #[test]
    fn test_everything_fails_before_dictionary_loads() {
        let dict = Dictionary::empty();
        let mut game = started(typing_board());

        assert_ok!(type_word(&mut game, "ABD"));
        assert_eq!(
            game.submit(&dict),
            Err(GameError::Guess(GuessError::NotInDictionary("ABD".to_string())))
        );
        assert_eq!(game.current_word(), "ABD");
    }

    #[test]
    fn test_typing_enforces_sides() {
        let mut game = started(scenario_board());

        assert_ok!(game.type_letter('a'));
        assert_eq!(
            game.type_letter('B'),
            Err(GameError::Letter(LetterError::SameSide {
                letter: 'B',
                previous: 'A'
            }))
        );
        assert_eq!(
            game.type_letter('Z'),
            Err(GameError::Letter(LetterError::NotOnBoard('Z')))
        );
        assert_eq!(game.current_word(), "A");
    }

    #[test]
    fn test_accepted_words_never_repeat_a_side() {
        let board = typing_board();
        let dict = Dictionary::from_words(["ABD", "DEG", "GAB", "DAB", "BED"]);
        let mut game = started(board.clone());

        for word in ["ABD", "DEG"] {
            let remainder = match game.chain_letter() {
                Some(_) => &word[1..],
                None => word,
            };
            assert_ok!(type_word(&mut game, remainder));
            assert_ok!(game.submit(&dict));
        }

        let validator = WordValidator::new(&board);
        for word in game.guessed_words() {
            assert!(validator.is_valid_path(word), "{} crosses a side", word);
        }
        for pair in game.guessed_words().windows(2) {
            assert_eq!(pair[0].chars().last(), pair[1].chars().next());
        }
    }

    #[test]
    fn test_backspace_removes_letters_then_undoes() {
        let dict = Dictionary::from_words(["ABD", "DEG"]);
        let mut game = started(typing_board());

        assert_eq!(game.backspace(), Ok(Backspace::Nothing));
        assert_ok!(type_word(&mut game, "ABD"));
        assert_ok!(game.submit(&dict));
        assert_ok!(type_word(&mut game, "E"));
        assert_eq!(game.current_word(), "DE");

        assert_eq!(game.backspace(), Ok(Backspace::Removed('E')));
        assert_eq!(game.current_word(), "D");

        assert_eq!(game.backspace(), Ok(Backspace::Undone("ABD".to_string())));
        assert_eq!(game.current_word(), "ABD");
        assert!(game.guessed_words().is_empty());
        assert!(game.used_letters().is_empty());
        assert_eq!(game.score(), 0);

        assert_eq!(game.backspace(), Ok(Backspace::Removed('D')));
        assert_eq!(game.current_word(), "AB");
    }

    #[test]
    fn test_win_is_terminal() {
        let board = Board::from_sides(vec![vec!['A', 'B'], vec!['E', 'C']]).unwrap();
        let dict = Dictionary::from_words(["ACE", "EBA", "ACB"]);
        let mut game = started(board.clone());

        let first = assert_ok!(game.submit_word("ACE", &dict));
        assert!(!first.won);
        assert_eq!(game.phase(), Phase::InProgress);

        let second = assert_ok!(game.submit_word("EBA", &dict));
        assert!(second.won);
        assert!(game.is_won());
        assert_eq!(game.used_letters(), &board.distinct_letters());

        assert_eq!(game.type_letter('C'), Err(GameError::NotInProgress));
        assert_eq!(game.backspace(), Err(GameError::NotInProgress));
        assert_eq!(game.submit(&dict), Err(GameError::NotInProgress));

        game.new_game(board);
        assert_eq!(game.phase(), Phase::InProgress);
        assert!(game.guessed_words().is_empty());
    }

    #[test]
    fn test_win_only_when_every_letter_used() {
        let board = typing_board();
        let dict = Dictionary::from_words(["ABD", "DEG", "GAHIC", "CAF"]);
        let mut game = started(board.clone());

        for word in ["ABD", "DEG", "GAHIC"] {
            let accepted = assert_ok!(game.submit_word(word, &dict));
            assert_eq!(accepted.won, game.used_letters() == &board.distinct_letters());
            assert!(!accepted.won);
        }

        let last = assert_ok!(game.submit_word("CAF", &dict));
        assert!(last.won);
        assert_eq!(game.used_letters(), &board.distinct_letters());
    }

    #[test]
    fn test_snapshot_serializes() {
        let dict = Dictionary::from_words(["ABD"]);
        let mut game = started(scenario_board());
        assert_ok!(game.submit_word("abd", &dict));

        let snapshot = game.snapshot();
        assert_eq!(snapshot.guessed_words, vec!["ABD".to_string()]);
        assert_eq!(snapshot.current_word, "D");

        let json = assert_ok!(serde_json::to_value(&snapshot));
        assert_eq!(json["phase"], "in_progress");
        assert_eq!(json["score"], 1);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(GuessError::TooShort.to_string(), "you must enter at least 3 letters!");
        assert_eq!(
            GameError::from(GuessError::NotInDictionary("XYZ".into())).to_string(),
            "XYZ is not a valid word!"
        );
        assert_eq!(GuessError::OffBoard('X').to_string(), "X is not on the board");
    }
}
