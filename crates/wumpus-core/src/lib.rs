//! Grid cave model: cell geometry, cell contents, and the world-provider traits
//! the agent talks to.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod cell;
pub mod content;
pub mod world;

pub use cell::{Bounds, Cell, Direction};
pub use content::{Content, Contents};
pub use world::{CaveMut, CaveView, World, WorldBuilder, WorldError};
