//! Route planning over the agent's certified-safe cells.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod grid;
pub mod route;

pub use grid::{GridPlanner, Passability};
pub use route::Route;
