use std::{error::Error, fmt::Display};

use itertools::Itertools;

mod board;
mod node;
mod solver;

pub use board::{Board, BLANK};
pub use node::Node;
pub use solver::{Outcome, SearchStats, Solver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    Empty,
    InvalidTile {
        row: usize,
        col: usize,
        token: String,
    },
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    TooLarge {
        size: usize,
    },
    NotPermutation,
}

impl Display for ParseBoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseBoardError::Empty => write!(f, "Board has no rows"),
            ParseBoardError::InvalidTile { row, col, token } => {
                write!(f, "Invalid tile {:?} at row {}, column {}", token, row + 1, col + 1)
            }
            ParseBoardError::NotSquare { row, len, expected } => write!(
                f,
                "Row {} has {} tiles but the board has {} rows",
                row + 1,
                len,
                expected
            ),
            ParseBoardError::TooLarge { size } => {
                write!(f, "A {}x{} board does not fit 8-bit tiles", size, size)
            }
            ParseBoardError::NotPermutation => write!(
                f,
                "Tiles must be 0 (the blank) and 1..N² each exactly once"
            ),
        }
    }
}

impl Error for ParseBoardError {}

// rows are either comma separated or whitespace separated
#[auto_enums::auto_enum(Iterator)]
fn tokens(line: &str) -> impl Iterator<Item = &str> {
    if line.contains(',') {
        line.split(',').map(str::trim).filter(|t| !t.is_empty())
    } else {
        line.split_whitespace()
    }
}

/// Reads a board written one row per line. Blank lines and anything after a
/// `#` are ignored.
///
/// ```
/// let board = npuzzle_solver::parse_board("1 2 3\n4 5 6\n7 8 0").unwrap();
/// assert!(board.is_goal());
/// ```
pub fn parse_board(b: &str) -> Result<Board, ParseBoardError> {
    let rows: Vec<Vec<u8>> = b
        .lines()
        .map(|line| line.split_once('#').map_or(line, |(keep, _)| keep).trim())
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(row, line)| {
            tokens(line)
                .enumerate()
                .map(|(col, token)| {
                    token.parse().map_err(|_| ParseBoardError::InvalidTile {
                        row,
                        col,
                        token: token.to_owned(),
                    })
                })
                .collect::<Result<Vec<u8>, _>>()
        })
        .collect::<Result<_, ParseBoardError>>()?;

    let size = rows.len();
    if size == 0 {
        return Err(ParseBoardError::Empty);
    }
    if size * size > usize::from(u8::MAX) + 1 {
        return Err(ParseBoardError::TooLarge { size });
    }
    if let Some((row, tiles)) = rows.iter().find_position(|r| r.len() != size) {
        return Err(ParseBoardError::NotSquare {
            row,
            len: tiles.len(),
            expected: size,
        });
    }
    if !rows
        .iter()
        .flatten()
        .map(|&t| usize::from(t))
        .sorted()
        .eq(0..size * size)
    {
        return Err(ParseBoardError::NotPermutation);
    }

    Ok(Board::new(rows))
}
