use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 1-indexed grid coordinate.
///
/// Cells carry no identity beyond their coordinates. `Ord` is column-major
/// (`x` first, then `y`), which is the scan order every full-grid pass uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Cell) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    pub fn step(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.offset();
        Cell::new(self.x + dx, self.y + dy)
    }

    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }

    /// Direction of travel from `self` to an adjacent `other`.
    pub fn direction_to(self, other: Cell) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.step(direction) == other)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Cardinal facing. `Up` increases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    #[default]
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// Fixed order for determinism: Right, Left, Up, Down.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Right => "right",
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

/// Grid extent: cells `[1, width] x [1, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 1 && cell.y >= 1 && cell.x <= self.width && cell.y <= self.height
    }

    /// True when the cell sits on any edge of the grid.
    pub fn on_edge(&self, cell: Cell) -> bool {
        cell.x == 1 || cell.y == 1 || cell.x == self.width || cell.y == self.height
    }

    pub fn len(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// In-bounds 4-neighbours in `Direction::ALL` order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |direction| cell.step(direction))
            .filter(move |&n| self.contains(n))
    }

    /// Every cell, `x` outer and `y` inner.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (width, height) = (self.width, self.height);
        (1..=width).flat_map(move |x| (1..=height).map(move |y| Cell::new(x, y)))
    }

    /// Row-major slot for dense per-cell tables.
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        Some(((cell.y - 1) * self.width + (cell.x - 1)) as usize)
    }

    pub fn cell_at(&self, index: usize) -> Cell {
        let index = index as i32;
        Cell::new(index % self.width + 1, index / self.width + 1)
    }
}
