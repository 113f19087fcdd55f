use std::collections::BTreeMap;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Bounds, Cell, Content, Contents};

/// Read-only cave access.
///
/// The agent must only call `content_at` for the cell it currently occupies
/// (and for the single cell its arrow flies into). There is no
/// "list all hazards" query.
pub trait CaveView {
    fn bounds(&self) -> Bounds;
    fn goal(&self) -> Cell;
    fn content_at(&self, cell: Cell) -> Contents;
    fn agent_position(&self) -> Cell;
}

/// Write access: the controller is the single writer of the agent position.
pub trait CaveMut: CaveView {
    fn set_agent_position(&mut self, cell: Cell);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    Empty { width: i32, height: i32 },

    #[error("no agent start cell given")]
    MissingStart,

    #[error("no goal cell given")]
    MissingGoal,

    #[error("agent start {0} lies outside the grid")]
    StartOutOfBounds(Cell),

    #[error("goal {0} lies outside the grid")]
    GoalOutOfBounds(Cell),

    #[error("{content} at {cell} lies outside the grid")]
    ContentOutOfBounds { cell: Cell, content: Content },
}

/// Immutable cave map plus the agent's current position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct World {
    bounds: Bounds,
    cells: BTreeMap<Cell, Contents>,
    start: Cell,
    goal: Cell,
    agent: Cell,
}

impl World {
    pub fn builder(width: i32, height: i32) -> WorldBuilder {
        WorldBuilder::new(width, height)
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    /// Put the agent back on its start cell.
    pub fn reset(&mut self) {
        self.agent = self.start;
    }
}

impl CaveView for World {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn goal(&self) -> Cell {
        self.goal
    }

    fn content_at(&self, cell: Cell) -> Contents {
        self.cells.get(&cell).copied().unwrap_or_default()
    }

    fn agent_position(&self) -> Cell {
        self.agent
    }
}

impl CaveMut for World {
    fn set_agent_position(&mut self, cell: Cell) {
        self.agent = cell;
    }
}

#[derive(Debug, Clone)]
pub struct WorldBuilder {
    bounds: Bounds,
    cells: BTreeMap<Cell, Contents>,
    start: Option<Cell>,
    goal: Option<Cell>,
    derive_percepts: bool,
}

impl WorldBuilder {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            bounds: Bounds::new(width, height),
            cells: BTreeMap::new(),
            start: None,
            goal: None,
            derive_percepts: false,
        }
    }

    pub fn start(mut self, cell: Cell) -> Self {
        self.start = Some(cell);
        self
    }

    pub fn goal(mut self, cell: Cell) -> Self {
        self.goal = Some(cell);
        self
    }

    pub fn with(mut self, cell: Cell, content: Content) -> Self {
        self.insert(cell, content);
        self
    }

    pub fn insert(&mut self, cell: Cell, content: Content) {
        self.cells.entry(cell).or_default().insert(content);
    }

    pub fn pit(self, cell: Cell) -> Self {
        self.with(cell, Content::Pit)
    }

    pub fn wumpus(self, cell: Cell) -> Self {
        self.with(cell, Content::Wumpus)
    }

    pub fn gold(self, cell: Cell) -> Self {
        self.with(cell, Content::Gold)
    }

    /// Add `Breeze` around every pit and `Stench` around every wumpus on
    /// `build`, on top of any percepts inserted explicitly.
    pub fn derive_percepts(mut self, enabled: bool) -> Self {
        self.derive_percepts = enabled;
        self
    }

    pub fn build(mut self) -> Result<World, WorldError> {
        let bounds = self.bounds;
        if bounds.width < 1 || bounds.height < 1 {
            return Err(WorldError::Empty {
                width: bounds.width,
                height: bounds.height,
            });
        }

        let start = self.start.ok_or(WorldError::MissingStart)?;
        let goal = self.goal.ok_or(WorldError::MissingGoal)?;
        if !bounds.contains(start) {
            return Err(WorldError::StartOutOfBounds(start));
        }
        if !bounds.contains(goal) {
            return Err(WorldError::GoalOutOfBounds(goal));
        }

        for (&cell, contents) in &self.cells {
            if !bounds.contains(cell) {
                let content = contents.iter().next().unwrap_or(Content::Gold);
                return Err(WorldError::ContentOutOfBounds { cell, content });
            }
        }

        if self.derive_percepts {
            let sources: Vec<(Cell, Contents)> =
                self.cells.iter().map(|(&c, &v)| (c, v)).collect();
            for (cell, contents) in sources {
                for neighbor in bounds.neighbors(cell) {
                    if contents.contains(Content::Pit) {
                        self.insert(neighbor, Content::Breeze);
                    }
                    if contents.contains(Content::Wumpus) {
                        self.insert(neighbor, Content::Stench);
                    }
                }
            }
        }

        Ok(World {
            bounds,
            cells: self.cells,
            start,
            goal,
            agent: start,
        })
    }
}
