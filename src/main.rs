use std::{env, fs};

use anyhow::{Context, Result};
use log::info;
use npuzzle_solver::{parse_board, Board, Solver};

// Format:
// one row per line, tiles separated by whitespace or commas,
// 0 is the blank, anything after a # is ignored.
//
// Boards are read from the files named on the command line,
// or taken from the list below when there are none.
const EXAMPLES: &[&str] = &[
    "
1 2 3
4 5 6
8 7 0
",
    "
0 1 3
4 2 5
7 8 6
",
    "
1 3 2
4 5 6
8 7 0
",
    "
 1  2  3  4
 5  7  6  8
 9 10 11 12
13 15 14  0
",
];

fn load(path: &str) -> Result<Board> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    parse_board(&text).with_context(|| format!("parsing {}", path))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let paths: Vec<String> = env::args().skip(1).collect();
    let boards = if paths.is_empty() {
        EXAMPLES
            .iter()
            .map(|source| parse_board(source).context("parsing built-in example"))
            .collect::<Result<Vec<_>>>()?
    } else {
        paths.iter().map(|p| load(p)).collect::<Result<Vec<_>>>()?
    };

    for board in boards {
        println!("----");
        println!("Trying to solve this {n}x{n} puzzle:", n = board.size());
        println!("{}", board);
        println!("----");

        let solver = Solver::from_board(board);
        let (primary, twin) = solver.stats();
        info!(
            "{} rounds, expanded {} boards (twin {})",
            solver.rounds(),
            primary.expanded,
            twin.expanded
        );

        if !solver.is_solvable() {
            println!("Puzzle not solvable! (moves = {})", solver.moves());
            continue;
        }

        println!("Minimum number of moves to solve: {}", solver.moves());
        println!();
        for step in solver.solution() {
            println!("{}", step);
            println!();
        }
    }

    Ok(())
}
