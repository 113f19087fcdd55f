//! The exploring agent.
//!
//! [`Explorer`] runs one attempt against a [`wumpus_core::CaveMut`] world:
//! it perceives only the cell it stands on, feeds the percepts to its
//! knowledge base, lets the deducer draw conclusions and plans over cells it
//! has certified safe. [`Expedition`] repeats attempts after a death, with a
//! fresh or inherited knowledge base.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod expedition;

pub use config::{AgentConfig, DangerWeights};
pub use controller::{AttemptReport, Explorer, Outcome, Phase, ShotOutcome};
pub use expedition::{Expedition, ExpeditionConfig, ExpeditionReport, KnowledgePolicy};
