use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::board::Side;

/// Lifecycle of a single puzzle session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No board has been dealt yet
    Setup,
    InProgress,
    /// Every board letter has been used. Only a new game leaves this state.
    Won,
}

/// Point-in-time view of a game, for printing or logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub sides: Vec<Side>,
    pub current_word: String,
    pub guessed_words: Vec<String>,
    pub used_letters: BTreeSet<char>,
    pub score: usize,
}
