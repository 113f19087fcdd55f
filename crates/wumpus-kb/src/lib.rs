//! Typed TELL/ASK knowledge base and the hazard deduction engine that feeds it.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod deduce;
pub mod fact;
pub mod knowledge;

pub use deduce::{Deduction, HazardDeducer};
pub use fact::{Fact, HazardKind, Percept, Predicate, Provenance};
pub use knowledge::KnowledgeBase;
