use std::f64::consts::PI;

use serde::Serialize;

use crate::models::Board;

/// Where a letter sits on the board polygon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterPlacement {
    pub letter: char,
    pub side: usize,
    pub x: f64,
    pub y: f64,
}

/// Place every letter on a regular polygon of unit circumradius centred on
/// the origin, one board side per edge.
///
/// Letters are spread evenly along their edge, never on a corner. The first
/// edge is horizontal at the top (y grows downward, as on a screen).
pub fn place_letters(board: &Board) -> Vec<LetterPlacement> {
    let sides = board.sides().len();
    if sides < 3 {
        return Vec::new();
    }

    let vertices = polygon_vertices(sides);
    let mut placements = Vec::with_capacity(board.letter_count());

    for (index, side) in board.sides().iter().enumerate() {
        let (x0, y0) = vertices[index];
        let (x1, y1) = vertices[(index + 1) % sides];
        let slots = side.len() + 1;

        for (slot, &letter) in side.letters().iter().enumerate() {
            let t = (slot + 1) as f64 / slots as f64;
            placements.push(LetterPlacement {
                letter,
                side: index,
                x: x0 + (x1 - x0) * t,
                y: y0 + (y1 - y0) * t,
            });
        }
    }

    placements
}

fn polygon_vertices(sides: usize) -> Vec<(f64, f64)> {
    let step = 2.0 * PI / sides as f64;
    // Rotate so the first edge is centred straight above the origin
    let start = -PI / 2.0 - step / 2.0;

    (0..sides)
        .map(|k| {
            let angle = start + step * k as f64;
            (angle.cos(), angle.sin())
        })
        .collect()
}
