//! The maze matrix: [`Tile`] values in an immutable [`Grid`].
//!
//! A maze of `w × h` logical rooms is stored at doubled resolution as a
//! `(2h+1) × (2w+1)` matrix. Rooms sit on odd/odd coordinates, the walls
//! between them on coordinates with an even component, and the border is
//! always [`Tile::Wall`].

use std::fmt;

use crate::error::MazeError;
use crate::geom::{Point, Range};

/// Cardinal directions in search order: right, left, down, up.
///
/// In `(row, col)` deltas this is `(0,+1), (0,-1), (+1,0), (-1,0)`. The order
/// decides which equal-cost frontier cell is discovered first, so it must not
/// change.
pub const CARDINALS: [Point; 4] = [
    Point::new(1, 0),
    Point::new(-1, 0),
    Point::new(0, 1),
    Point::new(0, -1),
];

/// Row-major offset of `p` in a matrix `width` columns wide.
///
/// Computed in `usize`: a matrix may hold more tiles than `i32` can count
/// even though each coordinate fits. `p` must be non-negative.
#[inline]
pub fn flat_index(p: Point, width: i32) -> usize {
    p.y as usize * width as usize + p.x as usize
}

/// A single matrix value. The numeric encoding is stable: `Path = 0`,
/// `Wall = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "u8", try_from = "u8")
)]
#[repr(u8)]
pub enum Tile {
    Path = 0,
    #[default]
    Wall = 1,
}

impl Tile {
    /// Text glyph used by [`Grid`]'s `Display` and [`Grid::from_ascii`].
    pub const fn glyph(self) -> char {
        match self {
            Tile::Path => '.',
            Tile::Wall => '#',
        }
    }
}

impl From<Tile> for u8 {
    fn from(t: Tile) -> Self {
        t as u8
    }
}

impl TryFrom<u8> for Tile {
    type Error = MazeError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Tile::Path),
            1 => Ok(Tile::Wall),
            other => Err(MazeError::InvalidTile(other)),
        }
    }
}

impl TryFrom<char> for Tile {
    type Error = MazeError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            '.' => Ok(Tile::Path),
            '#' => Ok(Tile::Wall),
            other => Err(MazeError::InvalidGlyph(other)),
        }
    }
}

/// An immutable row-major matrix of [`Tile`] values.
///
/// `Grid` is read-only once built and can be shared freely (`&Grid`) between
/// a search and anything that displays it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    tiles: Vec<Tile>,
    width: i32,
    height: i32,
}

impl Grid {
    /// Build a grid from row-major tiles.
    ///
    /// Fails with [`MazeError::EmptyMatrix`] when either side is not
    /// positive, or [`MazeError::TileCount`] when `tiles` does not hold
    /// exactly `width * height` values.
    pub fn from_tiles(width: i32, height: i32, tiles: Vec<Tile>) -> Result<Self, MazeError> {
        if width <= 0 || height <= 0 {
            return Err(MazeError::EmptyMatrix);
        }
        let expected = (width as usize) * (height as usize);
        if tiles.len() != expected {
            return Err(MazeError::TileCount {
                expected,
                found: tiles.len(),
            });
        }
        Ok(Self {
            tiles,
            width,
            height,
        })
    }

    /// Build a grid from raw `0`/`1` rows.
    pub fn from_matrix(rows: Vec<Vec<u8>>) -> Result<Self, MazeError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(MazeError::EmptyMatrix);
        }
        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(MazeError::RaggedMatrix {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            for &v in values {
                tiles.push(Tile::try_from(v)?);
            }
        }
        Self::from_tiles(width as i32, rows.len() as i32, tiles)
    }

    /// Parse `#`/`.` text, one matrix row per line. Surrounding blank lines
    /// and indentation are ignored.
    pub fn from_ascii(text: &str) -> Result<Self, MazeError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        if width == 0 {
            return Err(MazeError::EmptyMatrix);
        }
        let mut tiles = Vec::with_capacity(width * lines.len());
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MazeError::RaggedMatrix {
                    row,
                    expected: width,
                    found,
                });
            }
            for ch in line.chars() {
                tiles.push(Tile::try_from(ch)?);
            }
        }
        Self::from_tiles(width as i32, lines.len() as i32, tiles)
    }

    /// Raw `0`/`1` rows, the persistence encoding.
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        self.tiles
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|&t| u8::from(t)).collect())
            .collect()
    }

    /// Returns the bounding range of this grid.
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Number of matrix columns.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of matrix rows.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether the grid contains the given point.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        flat_index(p, self.width)
    }

    /// Get the tile at a point, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Tile> {
        if !self.contains(p) {
            return None;
        }
        Some(self.tiles[self.index(p)])
    }

    /// Whether `p` is in bounds and open.
    #[inline]
    pub fn is_path(&self, p: Point) -> bool {
        self.at(p) == Some(Tile::Path)
    }

    /// In-bounds open neighbours of `p`, in [`CARDINALS`] order.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        CARDINALS
            .into_iter()
            .map(move |d| p + d)
            .filter(move |&n| self.is_path(n))
    }

    /// Every open point, row-major.
    pub fn path_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.bounds().iter().filter(move |&p| self.is_path(p))
    }

    /// Count how many tiles equal `tile`.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// A copy of this grid with the tile at `p` replaced. Out-of-bounds
    /// points leave the copy unchanged.
    pub fn with_tile(&self, p: Point, tile: Tile) -> Grid {
        let mut g = self.clone();
        if g.contains(p) {
            let i = g.index(p);
            g.tiles[i] = tile;
        }
        g
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.tiles.chunks(self.width as usize).enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for t in row {
                write!(f, "{}", t.glyph())?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Grid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_matrix().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<u8>>::deserialize(deserializer)?;
        Grid::from_matrix(rows).map_err(serde::de::Error::custom)
    }
}
