use std::{cmp::Ordering, rc::Rc};

use crate::Board;

/// A board reached during search, linked back to the node it was expanded from.
///
/// The link only points from child to parent, so a chain is freed as soon as
/// neither a frontier nor a finished path holds on to its tail.
#[derive(Debug)]
pub struct Node {
    board: Board,
    parent: Option<Rc<Node>>,
    moves: u32,
    manhattan: u32,
    priority: u32,
}

impl Node {
    pub fn new(board: Board, parent: Option<Rc<Node>>) -> Node {
        let moves = parent.as_ref().map_or(0, |p| p.moves + 1);
        let manhattan = board.manhattan();

        Node {
            board,
            parent,
            moves,
            manhattan,
            priority: moves + manhattan,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn parent(&self) -> Option<&Node> {
        self.parent.as_deref()
    }

    /// Moves made since the root.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn manhattan(&self) -> u32 {
        self.manhattan
    }

    /// Moves so far plus the Manhattan estimate of the moves left.
    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn is_goal(&self) -> bool {
        self.manhattan == 0
    }

    /// Boards from the root down to this node.
    pub fn path(&self) -> Vec<Board> {
        let mut path = vec![self.board.clone()];
        let mut current = self.parent();
        while let Some(node) = current {
            path.push(node.board.clone());
            current = node.parent();
        }

        path.reverse();
        path
    }
}

// lower priority first, closer board on ties; equal keys compare equal
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.board.manhattan().cmp(&other.board.manhattan()))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}
