//! Relative turns along a path.

use labyrinth_core::Point;

/// The move made at an interior path cell, relative to the heading on
/// arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    Forward,
    Left,
    Right,
    Back,
}

/// Classify the turn at `b` when walking `a -> b -> c`.
///
/// Uses the cross product of the two moves in `(row, col)` coordinates:
/// positive turns left, negative turns right, zero is either straight on or
/// a reversal.
pub fn turn(a: Point, b: Point, c: Point) -> Turn {
    let (r1, c1) = (b.row() - a.row(), b.col() - a.col());
    let (r2, c2) = (c.row() - b.row(), c.col() - b.col());
    if (r1, c1) == (r2, c2) {
        return Turn::Forward;
    }
    match (r1 * c2 - c1 * r2).signum() {
        1 => Turn::Left,
        -1 => Turn::Right,
        _ => Turn::Back,
    }
}

/// One [`Turn`] per interior cell of `path`.
pub fn turns(path: &[Point]) -> Vec<Turn> {
    path.windows(3).map(|w| turn(w[0], w[1], w[2])).collect()
}
