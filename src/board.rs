use std::{
    fmt::{Display, Write},
    hash::{Hash, Hasher},
    ops::Index,
};

use itertools::Itertools;
use smallvec::SmallVec;

/// Tile value of the empty cell.
pub const BLANK: u8 = 0;

// blank moves up, down, left, right (in that order)
const DELTAS: &[(isize, isize)] = &[(-1, 0), (1, 0), (0, -1), (0, 1)];

/// One immutable layout of an NxN sliding-tile puzzle.
///
/// Tiles are stored row-major. Tile `v` belongs at flat index `v - 1`, the
/// blank belongs in the last cell. Both heuristic scores are computed when
/// the board is built and never change afterwards.
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    tiles: Vec<u8>,
    blank: usize,
    hamming: u32,
    manhattan: u32,
}

impl Board {
    /// Builds a board from rows of tiles. The rows must hold a permutation
    /// of `0..N²`; this is not checked outside debug builds (see
    /// [`crate::parse_board`] for a validating constructor).
    pub fn new(from: Vec<Vec<u8>>) -> Board {
        let size = from.len();
        let tiles = from.into_iter().flatten().collect();
        Board::from_tiles(size, tiles)
    }

    /// The solved layout for a puzzle of side `size`.
    pub fn goal(size: usize) -> Board {
        let len = size * size;
        let tiles = (1..=len)
            .map(|v| if v == len { BLANK } else { v as u8 })
            .collect();
        Board::from_tiles(size, tiles)
    }

    fn from_tiles(size: usize, tiles: Vec<u8>) -> Board {
        debug_assert_eq!(tiles.len(), size * size);
        debug_assert!(tiles.iter().map(|&t| usize::from(t)).sorted().eq(0..tiles.len()));

        // a missing blank is a broken caller contract; fall back to the first cell
        let blank = tiles.iter().position(|&t| t == BLANK).unwrap_or_default();

        let mut hamming = 0;
        let mut manhattan = 0;
        for (ix, &tile) in tiles.iter().enumerate() {
            if tile == BLANK || usize::from(tile) == ix + 1 {
                continue;
            }

            let goal = usize::from(tile) - 1;
            hamming += 1;
            manhattan += (goal / size).abs_diff(ix / size) + (goal % size).abs_diff(ix % size);
        }

        Board {
            size,
            tiles,
            blank,
            hamming,
            manhattan: manhattan as u32,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major tiles.
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Flat index of the blank.
    pub fn blank(&self) -> usize {
        self.blank
    }

    /// Number of non-blank tiles out of place.
    pub fn hamming(&self) -> u32 {
        self.hamming
    }

    /// Sum of row and column offsets of every non-blank tile from its goal cell.
    pub fn manhattan(&self) -> u32 {
        self.manhattan
    }

    pub fn is_goal(&self) -> bool {
        self.manhattan == 0
    }

    /// Boards reachable by sliding one tile into the blank, ordered by the
    /// direction the blank travels: up, down, left, right.
    pub fn neighbors(&self) -> SmallVec<[Board; 4]> {
        let (row, col) = (self.blank / self.size, self.blank % self.size);

        DELTAS
            .iter()
            .filter_map(|&(di, dj)| {
                let i = row.checked_add_signed(di)?;
                let j = col.checked_add_signed(dj)?;
                (i < self.size && j < self.size)
                    .then(|| self.swapped(self.blank, i * self.size + j))
            })
            .collect()
    }

    /// Swaps the first two non-blank tiles among the leading cells, which
    /// flips the permutation parity. Exactly one of a board and its twin
    /// can reach the goal.
    ///
    /// A 1x1 board has nothing to swap and is returned unchanged.
    pub fn twin(&self) -> Board {
        if self.size < 2 {
            return self.clone();
        }

        let (mut first, mut second) = (0, 1);
        if self.tiles[first] == BLANK {
            first += 1;
            second += 1;
        }
        if self.tiles[second] == BLANK {
            second += 1;
        }

        self.swapped(first, second)
    }

    fn swapped(&self, a: usize, b: usize) -> Board {
        let mut tiles = self.tiles.clone();
        tiles.swap(a, b);
        Board::from_tiles(self.size, tiles)
    }
}

// scores are derived from the tiles, so the tiles alone decide identity
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tiles.hash(state);
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for line in self.tiles.chunks(self.size) {
            if !first {
                f.write_char('\n')?;
            } else {
                first = false;
            }

            write!(f, "{}", line.iter().join("\t"))?;
        }

        Ok(())
    }
}

impl Index<(usize, usize)> for Board {
    type Output = u8;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.tiles[index.0 * self.size + index.1]
    }
}
