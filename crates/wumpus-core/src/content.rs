use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One tag a cave cell can hold.
///
/// Percepts (`Breeze`, `Stench`) are carried as cell contents so that the
/// agent reads everything it can sense through a single per-cell lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Content {
    Breeze,
    Stench,
    Gold,
    Pit,
    Wumpus,
}

impl Content {
    /// Perception order: percepts, then reward, then hazards.
    pub const ALL: [Content; 5] = [
        Content::Breeze,
        Content::Stench,
        Content::Gold,
        Content::Pit,
        Content::Wumpus,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Content::Breeze => "breeze",
            Content::Stench => "stench",
            Content::Gold => "gold",
            Content::Pit => "pit",
            Content::Wumpus => "wumpus",
        };
        f.write_str(name)
    }
}

/// Set of `Content` tags for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contents(u8);

impl Contents {
    pub const EMPTY: Contents = Contents(0);

    pub fn contains(self, content: Content) -> bool {
        self.0 & content.bit() != 0
    }

    pub fn insert(&mut self, content: Content) {
        self.0 |= content.bit();
    }

    pub fn with(mut self, content: Content) -> Self {
        self.insert(content);
        self
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Content> {
        Content::ALL.into_iter().filter(move |&c| self.contains(c))
    }
}

impl FromIterator<Content> for Contents {
    fn from_iter<I: IntoIterator<Item = Content>>(iter: I) -> Self {
        iter.into_iter().fold(Contents::EMPTY, Contents::with)
    }
}
