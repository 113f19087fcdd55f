use core::fmt;

use wumpus_core::{Cell, Content};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HazardKind {
    Pit,
    Wumpus,
}

impl HazardKind {
    pub const ALL: [HazardKind; 2] = [HazardKind::Pit, HazardKind::Wumpus];

    /// The percept this hazard produces in adjacent cells.
    pub fn percept(self) -> Percept {
        match self {
            HazardKind::Pit => Percept::Breeze,
            HazardKind::Wumpus => Percept::Stench,
        }
    }

    pub fn from_content(content: Content) -> Option<Self> {
        match content {
            Content::Pit => Some(HazardKind::Pit),
            Content::Wumpus => Some(HazardKind::Wumpus),
            _ => None,
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HazardKind::Pit => "Pit",
            HazardKind::Wumpus => "Wumpus",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Percept {
    Breeze,
    Stench,
}

impl Percept {
    pub const ALL: [Percept; 2] = [Percept::Breeze, Percept::Stench];

    pub fn content(self) -> Content {
        match self {
            Percept::Breeze => Content::Breeze,
            Percept::Stench => Content::Stench,
        }
    }
}

impl fmt::Display for Percept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Percept::Breeze => "Breeze",
            Percept::Stench => "Stench",
        })
    }
}

/// Fact vocabulary. Hazard-related predicates carry their hazard kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Predicate {
    Hazard(HazardKind),
    NoHazard(HazardKind),
    PossibleHazard(HazardKind),
    Percept(Percept),
    NoPercept(Percept),
    Gold,
    GoldCollected,
    Visited,
    Safe,
    Neutralized,
}

/// A predicate applied to one cell. Also the knowledge base's storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fact {
    pub predicate: Predicate,
    pub cell: Cell,
}

impl Fact {
    pub const fn new(predicate: Predicate, cell: Cell) -> Self {
        Self { predicate, cell }
    }

    pub const fn hazard(kind: HazardKind, cell: Cell) -> Self {
        Self::new(Predicate::Hazard(kind), cell)
    }

    pub const fn no_hazard(kind: HazardKind, cell: Cell) -> Self {
        Self::new(Predicate::NoHazard(kind), cell)
    }

    pub const fn possible_hazard(kind: HazardKind, cell: Cell) -> Self {
        Self::new(Predicate::PossibleHazard(kind), cell)
    }

    pub const fn percept(percept: Percept, cell: Cell) -> Self {
        Self::new(Predicate::Percept(percept), cell)
    }

    pub const fn no_percept(percept: Percept, cell: Cell) -> Self {
        Self::new(Predicate::NoPercept(percept), cell)
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.predicate {
            Predicate::Hazard(kind) => write!(f, "{kind}{}", self.cell),
            Predicate::NoHazard(kind) => write!(f, "No{kind}{}", self.cell),
            Predicate::PossibleHazard(kind) => write!(f, "Possible{kind}{}", self.cell),
            Predicate::Percept(percept) => write!(f, "{percept}{}", self.cell),
            Predicate::NoPercept(percept) => write!(f, "No{percept}{}", self.cell),
            Predicate::Gold => write!(f, "Gold{}", self.cell),
            Predicate::GoldCollected => write!(f, "GoldCollected{}", self.cell),
            Predicate::Visited => write!(f, "Visited{}", self.cell),
            Predicate::Safe => write!(f, "Safe{}", self.cell),
            Predicate::Neutralized => write!(f, "Neutralized{}", self.cell),
        }
    }
}

/// How a fact entered the knowledge base. Ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Provenance {
    /// Boundary heuristic; not a sound inference.
    Guessed,
    Deduced,
    Observed,
}
