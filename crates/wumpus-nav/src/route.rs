use std::collections::VecDeque;

use wumpus_core::Cell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered cells from start to goal, both inclusive.
///
/// An empty route means "no known safe path"; it is a normal answer, not an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    cells: Vec<Cell>,
}

impl Route {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves needed to walk the route.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn destination(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    pub fn into_queue(self) -> VecDeque<Cell> {
        self.cells.into()
    }
}
