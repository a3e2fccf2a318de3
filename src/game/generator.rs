use rand::{
    seq::{IndexedRandom, SliceRandom},
    Rng,
};

use crate::{
    models::{Board, BoardSize, Side, MIN_VOWELS},
    utils::letters::{ALPHABET, ALPHABET_LEN, VOWELS},
};

pub struct BoardGenerator;

impl BoardGenerator {
    /// Deal a fresh board of the given size
    pub fn generate(size: BoardSize) -> Board {
        let mut rng = rand::rng();
        Self::generate_with(size.sides(), size.letters_per_side(), &mut rng)
    }

    /// Deal `sides` groups of `letters_per_side` distinct letters.
    ///
    /// Two vowels are always drawn first; the rest of the board is sampled
    /// from whatever is left of the alphabet, so more vowels may follow.
    /// Returns an empty board when the dimensions cannot fit the alphabet.
    pub fn generate_with(sides: usize, letters_per_side: usize, rng: &mut impl Rng) -> Board {
        let total = sides * letters_per_side;
        if sides == 0 || letters_per_side == 0 || total < MIN_VOWELS || total > ALPHABET_LEN {
            tracing::debug!(
                "Cannot deal {} sides of {} letters, returning empty board",
                sides,
                letters_per_side
            );
            return Board::empty();
        }

        let mut letters: Vec<char> = VOWELS.choose_multiple(rng, MIN_VOWELS).copied().collect();

        let remaining: Vec<char> = ALPHABET
            .iter()
            .copied()
            .filter(|ch| !letters.contains(ch))
            .collect();
        letters.extend(remaining.choose_multiple(rng, total - MIN_VOWELS).copied());

        letters.shuffle(rng);

        let sides = letters
            .chunks(letters_per_side)
            .map(|chunk| Side::new(chunk.to_vec()))
            .collect();

        Board::from_sides_unchecked(sides)
    }
}
