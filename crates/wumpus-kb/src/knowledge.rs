use std::collections::{BTreeMap, BTreeSet};

use wumpus_core::Cell;

use crate::{Fact, HazardKind, Predicate, Provenance};

/// TELL/ASK fact store with cached `visited` and `safe` indices.
///
/// Facts are add-only except `PossibleHazard`, which is retracted when a cell
/// is certified safe or its hazard is explicitly ruled out. Contradictions are
/// not detected; `ask` applies the per-predicate rule and nothing more.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    facts: BTreeMap<Fact, Provenance>,
    visited: BTreeSet<Cell>,
    safe: BTreeSet<Cell>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Tell an observed fact. Returns `true` if the store changed.
    pub fn tell(&mut self, fact: Fact) -> bool {
        self.tell_with(fact, Provenance::Observed)
    }

    /// Tell a fact derived by sound inference.
    pub fn infer(&mut self, fact: Fact) -> bool {
        self.tell_with(fact, Provenance::Deduced)
    }

    /// Tell a heuristic guess.
    pub fn guess(&mut self, fact: Fact) -> bool {
        self.tell_with(fact, Provenance::Guessed)
    }

    /// Idempotent insert. A repeated fact keeps its strongest provenance.
    pub fn tell_with(&mut self, fact: Fact, provenance: Provenance) -> bool {
        match fact.predicate {
            Predicate::Visited => {
                self.visited.insert(fact.cell);
                self.mark_safe(fact.cell);
            }
            Predicate::Safe => self.mark_safe(fact.cell),
            Predicate::NoHazard(kind) => {
                self.retract_possible(kind, fact.cell);
            }
            _ => {}
        }
        self.insert(fact, provenance)
    }

    fn insert(&mut self, fact: Fact, provenance: Provenance) -> bool {
        match self.facts.get_mut(&fact) {
            Some(existing) if *existing >= provenance => false,
            Some(existing) => {
                *existing = provenance;
                true
            }
            None => {
                self.facts.insert(fact, provenance);
                true
            }
        }
    }

    /// Raw membership, no inference rules applied.
    pub fn holds(&self, fact: Fact) -> bool {
        self.facts.contains_key(&fact)
    }

    pub fn provenance(&self, fact: Fact) -> Option<Provenance> {
        self.facts.get(&fact).copied()
    }

    pub fn ask(&self, predicate: Predicate, cell: Cell) -> bool {
        match predicate {
            Predicate::Hazard(kind) => self.hazard_present(kind, cell),
            // Closed-world negation.
            Predicate::NoHazard(kind) => !self.hazard_present(kind, cell),
            Predicate::Safe => {
                self.safe.contains(&cell)
                    && HazardKind::ALL
                        .into_iter()
                        .all(|kind| !self.hazard_present(kind, cell))
            }
            Predicate::Visited => self.visited.contains(&cell),
            other => self.holds(Fact::new(other, cell)),
        }
    }

    pub fn is_safe(&self, cell: Cell) -> bool {
        self.ask(Predicate::Safe, cell)
    }

    pub fn is_visited(&self, cell: Cell) -> bool {
        self.visited.contains(&cell)
    }

    /// A hazard fact is asserted and, for the wumpus, not neutralized.
    pub fn hazard_present(&self, kind: HazardKind, cell: Cell) -> bool {
        if !self.holds(Fact::hazard(kind, cell)) {
            return false;
        }
        !(kind == HazardKind::Wumpus && self.is_neutralized(cell))
    }

    /// The hazard is explicitly excluded, not merely unproven.
    pub fn is_ruled_out(&self, kind: HazardKind, cell: Cell) -> bool {
        self.holds(Fact::no_hazard(kind, cell))
            || (kind == HazardKind::Wumpus && self.is_neutralized(cell))
    }

    pub fn is_suspected(&self, kind: HazardKind, cell: Cell) -> bool {
        self.holds(Fact::possible_hazard(kind, cell))
    }

    pub fn is_neutralized(&self, cell: Cell) -> bool {
        self.holds(Fact::new(Predicate::Neutralized, cell))
    }

    pub fn mark_safe(&mut self, cell: Cell) {
        self.safe.insert(cell);
        for kind in HazardKind::ALL {
            self.retract_possible(kind, cell);
        }
        self.facts
            .entry(Fact::new(Predicate::Safe, cell))
            .or_insert(Provenance::Deduced);
    }

    pub fn mark_visited(&mut self, cell: Cell) {
        self.tell(Fact::new(Predicate::Visited, cell));
    }

    /// Drop a `PossibleHazard` suspicion. Returns `true` if one was held.
    pub fn retract_possible(&mut self, kind: HazardKind, cell: Cell) -> bool {
        self.facts
            .remove(&Fact::possible_hazard(kind, cell))
            .is_some()
    }

    /// Observed facts only, minus what a wumpus kill changed: `Neutralized`
    /// marks and visits to the slain wumpus's cell. Everything deduced or
    /// guessed is dropped and has to be derived again.
    pub fn observations(&self) -> KnowledgeBase {
        let mut kb = KnowledgeBase::new();
        for (&fact, &provenance) in &self.facts {
            if provenance != Provenance::Observed {
                continue;
            }
            match fact.predicate {
                Predicate::Neutralized => continue,
                Predicate::Visited if self.is_neutralized(fact.cell) => continue,
                _ => {}
            }
            kb.tell(fact);
        }
        kb
    }

    pub fn visited(&self) -> impl Iterator<Item = Cell> + '_ {
        self.visited.iter().copied()
    }

    pub fn safe_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.safe.iter().copied().filter(|&cell| self.is_safe(cell))
    }

    pub fn facts(&self) -> impl Iterator<Item = (Fact, Provenance)> + '_ {
        self.facts.iter().map(|(&fact, &provenance)| (fact, provenance))
    }
}
