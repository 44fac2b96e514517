use std::{cmp::Reverse, collections::BinaryHeap, rc::Rc};

use log::{debug, trace};

use crate::{Board, Node};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Solved,
    Unsolvable,
}

/// Work done by one of the two searches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped and expanded.
    pub expanded: usize,
    /// Children pushed onto the frontier.
    pub generated: usize,
}

// min-heap on the node order; the insertion counter makes equal nodes leave
// in the order they arrived so runs are reproducible
#[derive(Default)]
struct Frontier {
    heap: BinaryHeap<Reverse<(Node, u64)>>,
    next: u64,
}

impl Frontier {
    fn push(&mut self, node: Node) {
        self.heap.push(Reverse((node, self.next)));
        self.next += 1;
    }

    fn pop(&mut self) -> Option<Node> {
        self.heap.pop().map(|Reverse((node, _))| node)
    }
}

struct Search {
    frontier: Frontier,
    stats: SearchStats,
}

impl Search {
    fn new(root: Board) -> Search {
        let mut frontier = Frontier::default();
        frontier.push(Node::new(root, None));

        Search {
            frontier,
            stats: SearchStats::default(),
        }
    }

    fn pop(&mut self) -> Option<Node> {
        self.frontier.pop()
    }

    fn expand(&mut self, node: Node) {
        let node = Rc::new(node);
        self.stats.expanded += 1;

        for neighbor in node.board().neighbors() {
            // don't undo the move that produced this node
            if node.parent().map_or(false, |p| *p.board() == neighbor) {
                continue;
            }

            self.frontier.push(Node::new(neighbor, Some(Rc::clone(&node))));
            self.stats.generated += 1;
        }
    }
}

/// Solves a sliding-tile puzzle and decides whether it can be solved at all.
///
/// Two best-first searches run in lock-step: one from the given board and one
/// from its [twin](Board::twin). Exactly one of the two can reach the goal, so
/// whichever gets there first settles solvability without counting inversions.
pub struct Solver {
    outcome: Outcome,
    solution: Vec<Board>,
    rounds: usize,
    primary: SearchStats,
    twin: SearchStats,
}

impl Solver {
    pub fn new(initial: Vec<Vec<u8>>) -> Solver {
        Solver::from_board(Board::new(initial))
    }

    pub fn from_board(initial: Board) -> Solver {
        let twin = initial.twin();
        debug!(
            "seeding {n}x{n} search: manhattan {} (twin {})",
            initial.manhattan(),
            twin.manhattan(),
            n = initial.size(),
        );

        let mut primary = Search::new(initial);
        let mut shadow = Search::new(twin);
        let mut rounds = 0;

        let (outcome, solution) = loop {
            // neither frontier runs dry on a board of side 2 or more
            let (Some(current), Some(twin_node)) = (primary.pop(), shadow.pop()) else {
                break (Outcome::Unsolvable, Vec::new());
            };

            rounds += 1;
            trace!(
                "round {}: priority {} (twin {})",
                rounds,
                current.priority(),
                twin_node.priority()
            );

            if current.is_goal() {
                break (Outcome::Solved, current.path());
            }
            if twin_node.is_goal() {
                break (Outcome::Unsolvable, Vec::new());
            }

            primary.expand(current);
            shadow.expand(twin_node);
        };

        debug!(
            "{:?} after {} rounds: expanded {} / generated {} (twin {} / {})",
            outcome,
            rounds,
            primary.stats.expanded,
            primary.stats.generated,
            shadow.stats.expanded,
            shadow.stats.generated,
        );

        Solver {
            outcome,
            solution,
            rounds,
            primary: primary.stats,
            twin: shadow.stats,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_solvable(&self) -> bool {
        self.outcome == Outcome::Solved
    }

    /// Fewest moves from the initial board to the goal, or `-1` if the goal
    /// cannot be reached.
    pub fn moves(&self) -> i32 {
        match self.outcome {
            Outcome::Solved => self.solution.len() as i32 - 1,
            Outcome::Unsolvable => -1,
        }
    }

    /// Boards from the initial layout to the goal; empty when unsolvable.
    pub fn solution(&self) -> &[Board] {
        &self.solution
    }

    /// Lock-step rounds run before one search hit its goal.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Statistics for the search from the initial board and from its twin.
    pub fn stats(&self) -> (SearchStats, SearchStats) {
        (self.primary, self.twin)
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use pathfinding::directed::astar::astar;

    use super::*;

    fn board(rows: &[&[u8]]) -> Board {
        Board::new(rows.iter().map(|r| r.to_vec()).collect())
    }

    fn optimal_moves(start: &Board) -> Option<u32> {
        astar(
            start,
            |b| b.neighbors().into_iter().map(|n| (n, 1)),
            |b| b.manhattan(),
            |b| b.is_goal(),
        )
        .map(|(_, cost)| cost)
    }

    fn assert_valid_solution(initial: &Board, solver: &Solver) {
        let solution = solver.solution();

        assert_eq!(solution.first(), Some(initial));
        assert!(solution.last().map_or(false, Board::is_goal));
        assert_eq!(solver.moves(), solution.len() as i32 - 1);
        for (from, to) in solution.iter().tuple_windows() {
            assert!(from.neighbors().contains(to), "{}\n\nto\n\n{}", from, to);
        }
    }

    #[test]
    fn goal_needs_no_moves() {
        let goal = board(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 0]]);
        let solver = Solver::from_board(goal.clone());

        assert!(solver.is_solvable());
        assert_eq!(solver.outcome(), Outcome::Solved);
        assert_eq!(solver.moves(), 0);
        assert_eq!(solver.solution(), &[goal]);
        assert_eq!(solver.rounds(), 1);
    }

    #[test]
    fn single_swap_from_goal_is_unsolvable() {
        let solver = Solver::new(vec![vec![1, 2, 3], vec![4, 5, 6], vec![8, 7, 0]]);

        assert!(!solver.is_solvable());
        assert_eq!(solver.outcome(), Outcome::Unsolvable);
        assert_eq!(solver.moves(), -1);
        assert!(solver.solution().is_empty());
    }

    #[test]
    fn double_swap_from_goal_is_solvable() {
        let initial = board(&[&[1, 3, 2], &[4, 5, 6], &[8, 7, 0]]);
        let solver = Solver::from_board(initial.clone());

        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 20);
        assert_valid_solution(&initial, &solver);
    }

    #[test]
    fn short_puzzle_follows_expected_path() {
        let initial = board(&[&[0, 1, 3], &[4, 2, 5], &[7, 8, 6]]);
        let solver = Solver::from_board(initial.clone());

        assert_eq!(solver.moves(), 4);
        assert_eq!(
            solver.solution(),
            &[
                initial,
                board(&[&[1, 0, 3], &[4, 2, 5], &[7, 8, 6]]),
                board(&[&[1, 2, 3], &[4, 0, 5], &[7, 8, 6]]),
                board(&[&[1, 2, 3], &[4, 5, 0], &[7, 8, 6]]),
                Board::goal(3),
            ]
        );
    }

    #[test]
    fn four_by_four_solution_is_valid() {
        let initial = board(&[&[1, 2, 3, 4], &[5, 7, 6, 8], &[9, 10, 11, 12], &[13, 15, 14, 0]]);
        let solver = Solver::from_board(initial.clone());

        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 22);
        assert_valid_solution(&initial, &solver);

        let (primary, twin) = solver.stats();
        assert_eq!(primary.expanded, solver.rounds() - 1);
        assert_eq!(twin.expanded, solver.rounds() - 1);
        assert!(primary.generated >= primary.expanded);
    }

    #[test]
    fn single_cell_is_solved() {
        let solver = Solver::new(vec![vec![0]]);
        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 0);
    }

    #[test]
    fn exactly_one_of_board_and_twin_is_solvable() {
        for tiles in (0..4u8).permutations(4) {
            let b = Board::new(tiles.chunks(2).map(<[u8]>::to_vec).collect());
            let solver = Solver::from_board(b.clone());
            let twin = Solver::from_board(b.twin());

            assert_ne!(solver.is_solvable(), twin.is_solvable(), "{}", b);
            match optimal_moves(&b) {
                Some(cost) => {
                    assert_eq!(solver.moves(), cost as i32);
                    assert_valid_solution(&b, &solver);
                }
                None => assert_eq!(solver.moves(), -1),
            }
        }
    }

    #[test]
    fn matches_reference_search_on_scrambled_boards() {
        let boards = [
            board(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]]),
            board(&[&[1, 2, 3], &[0, 7, 6], &[5, 4, 8]]),
            board(&[&[4, 1, 3], &[0, 2, 6], &[7, 5, 8]]),
            board(&[&[1, 2, 3], &[4, 5, 6], &[0, 7, 8]]),
        ];

        for b in boards {
            let solver = Solver::from_board(b.clone());
            let expected = optimal_moves(&b).map(|c| c as i32);

            assert_eq!(Some(solver.moves()), expected, "{}", b);
            assert!(!Solver::from_board(b.twin()).is_solvable());
            assert_valid_solution(&b, &solver);
        }
    }
}
