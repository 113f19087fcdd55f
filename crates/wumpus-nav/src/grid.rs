use core::cmp::Ordering;
use std::collections::BinaryHeap;

use wumpus_core::{Bounds, Cell};
use wumpus_kb::KnowledgeBase;

use crate::Route;

/// Which cells a route may enter.
pub trait Passability {
    fn is_passable(&self, cell: Cell) -> bool;
}

/// Only cells the knowledge base certifies safe are passable; unknown and
/// suspected cells are never planned through.
impl Passability for KnowledgeBase {
    fn is_passable(&self, cell: Cell) -> bool {
        self.is_safe(cell)
    }
}

impl<F> Passability for F
where
    F: Fn(Cell) -> bool,
{
    fn is_passable(&self, cell: Cell) -> bool {
        self(cell)
    }
}

#[derive(Debug)]
struct OpenNode {
    f: u32,
    g: u32,
    cell: Cell,
    tie: u64,
}

impl OpenNode {
    // Equal `f` pops in insertion order.
    fn key(&self) -> (u32, u64) {
        (self.f, self.tie)
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

/// 4-connected, unit-cost A* over a bounded grid.
#[derive(Debug, Clone, Copy)]
pub struct GridPlanner {
    bounds: Bounds,
}

impl GridPlanner {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn reconstruct_path(&self, came_from: &[Option<usize>], mut current: usize) -> Vec<Cell> {
        let mut out = vec![self.bounds.cell_at(current)];
        while let Some(prev) = came_from[current] {
            current = prev;
            out.push(self.bounds.cell_at(current));
        }
        out.reverse();
        out
    }

    /// Shortest route from `start` to `goal` through passable cells.
    ///
    /// `start` itself need not be passable (the agent already stands there).
    /// The returned route includes both endpoints; it is empty when `goal`
    /// cannot be reached.
    pub fn find_path<P>(&self, map: &P, start: Cell, goal: Cell) -> Route
    where
        P: Passability + ?Sized,
    {
        let (Some(start_idx), Some(goal_idx)) = (self.bounds.index(start), self.bounds.index(goal))
        else {
            return Route::empty();
        };
        if start == goal {
            return Route::new(vec![start]);
        }

        let mut open = BinaryHeap::<OpenNode>::new();
        let mut tie: u64 = 0;

        let grid_len = self.bounds.len();
        let mut g_score = vec![u32::MAX; grid_len];
        let mut came_from: Vec<Option<usize>> = vec![None; grid_len];

        g_score[start_idx] = 0;
        open.push(OpenNode {
            f: start.manhattan(goal),
            g: 0,
            cell: start,
            tie,
        });
        tie += 1;

        while let Some(node) = open.pop() {
            if node.cell == goal {
                return Route::new(self.reconstruct_path(&came_from, goal_idx));
            }

            let Some(node_idx) = self.bounds.index(node.cell) else {
                continue;
            };
            if node.g != g_score[node_idx] {
                // Stale heap entry.
                continue;
            }

            for n in self.bounds.neighbors(node.cell) {
                let Some(n_idx) = self.bounds.index(n) else { continue };
                if !map.is_passable(n) {
                    continue;
                }

                let tentative_g = node.g.saturating_add(1);
                if tentative_g >= g_score[n_idx] {
                    continue;
                }

                came_from[n_idx] = Some(node_idx);
                g_score[n_idx] = tentative_g;
                open.push(OpenNode {
                    f: tentative_g.saturating_add(n.manhattan(goal)),
                    g: tentative_g,
                    cell: n,
                    tie,
                });
                tie += 1;
            }
        }

        Route::empty()
    }
}
