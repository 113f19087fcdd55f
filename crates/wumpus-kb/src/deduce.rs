//! Hazard deduction over breeze/stench evidence.
//!
//! Every rule here is sound except the boundary heuristic for an ambiguous
//! stench, whose conclusions are recorded with [`Provenance::Guessed`].

use wumpus_core::{Bounds, Cell, Direction};

use crate::{Fact, HazardKind, KnowledgeBase, Predicate, Provenance};

/// A fact the engine newly asserted (or strengthened).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deduction {
    pub fact: Fact,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Copy)]
pub struct HazardDeducer {
    bounds: Bounds,
}

impl HazardDeducer {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Full deduction step after the agent perceived at `at`.
    ///
    /// The caller must already have told the `Percept`/`NoPercept` facts for
    /// `at`.
    pub fn after_perception(&self, kb: &mut KnowledgeBase, at: Cell) -> Vec<Deduction> {
        let mut out = Vec::new();
        self.mark_neighbors(kb, at, &mut out);
        self.sweep_into(kb, &mut out);
        self.eliminate(kb, &mut out);
        self.boundary_guess(kb, at, &mut out);
        out
    }

    /// One pass of the whole-grid rules: per-cell clearance/suspicion from
    /// visited neighbours, then unique-candidate elimination.
    pub fn sweep(&self, kb: &mut KnowledgeBase) -> Vec<Deduction> {
        let mut out = Vec::new();
        self.sweep_into(kb, &mut out);
        self.eliminate(kb, &mut out);
        out
    }

    /// Knowledge update after the arrow killed the wumpus at `target`.
    ///
    /// Stench next to a slain wumpus no longer implies anything, so the
    /// suspicions it produced are dropped and the grid is re-swept.
    pub fn after_kill(&self, kb: &mut KnowledgeBase, target: Cell) -> Vec<Deduction> {
        let mut out = Vec::new();
        for smelly in self.bounds.neighbors(target) {
            for cell in self.bounds.neighbors(smelly) {
                if cell != target && !kb.is_visited(cell) {
                    kb.retract_possible(HazardKind::Wumpus, cell);
                }
            }
        }

        if !kb.hazard_present(HazardKind::Pit, target) && !kb.is_safe(target) {
            kb.mark_safe(target);
            out.push(Deduction {
                fact: Fact::new(Predicate::Safe, target),
                provenance: Provenance::Deduced,
            });
        }

        self.sweep_into(kb, &mut out);
        self.eliminate(kb, &mut out);
        out
    }

    /// Knowledge to start a new attempt on the same cave with: the
    /// observations in `kb` with everything sound derived from them again.
    /// Kills are not carried over, since the next attempt faces a live wumpus.
    pub fn relearn(&self, kb: &KnowledgeBase) -> KnowledgeBase {
        let mut fresh = kb.observations();
        self.sweep(&mut fresh);
        fresh
    }

    /// Percept evidence at `cell`, with stench next to a slain wumpus
    /// treated as explained.
    fn signal(&self, kb: &KnowledgeBase, kind: HazardKind, cell: Cell) -> Signal {
        let percept = kind.percept();
        let explained = kind == HazardKind::Wumpus
            && self
                .bounds
                .neighbors(cell)
                .any(|n| kb.is_neutralized(n));
        if kb.holds(Fact::percept(percept, cell)) && !explained {
            Signal::Present
        } else if kb.holds(Fact::no_percept(percept, cell)) || explained {
            Signal::Absent
        } else {
            Signal::Unknown
        }
    }

    fn record(
        kb: &mut KnowledgeBase,
        out: &mut Vec<Deduction>,
        fact: Fact,
        provenance: Provenance,
    ) {
        if kb.tell_with(fact, provenance) {
            out.push(Deduction { fact, provenance });
        }
    }

    /// Certify a cell safe once both hazards are explicitly excluded.
    fn certify(&self, kb: &mut KnowledgeBase, cell: Cell, out: &mut Vec<Deduction>) {
        if kb.is_visited(cell) || kb.is_safe(cell) {
            return;
        }
        if HazardKind::ALL
            .into_iter()
            .all(|kind| kb.is_ruled_out(kind, cell))
        {
            kb.mark_safe(cell);
            out.push(Deduction {
                fact: Fact::new(Predicate::Safe, cell),
                provenance: Provenance::Deduced,
            });
        }
    }

    /// Immediate consequences for the unvisited neighbours of `at`.
    fn mark_neighbors(&self, kb: &mut KnowledgeBase, at: Cell, out: &mut Vec<Deduction>) {
        let neighbors: Vec<Cell> = self
            .bounds
            .neighbors(at)
            .filter(|&n| !kb.is_visited(n))
            .collect();

        for n in neighbors {
            for kind in HazardKind::ALL {
                if kb.holds(Fact::hazard(kind, n)) {
                    continue;
                }
                match self.signal(kb, kind, at) {
                    Signal::Absent => {
                        Self::record(kb, out, Fact::no_hazard(kind, n), Provenance::Deduced)
                    }
                    Signal::Present if !kb.is_ruled_out(kind, n) && !kb.is_safe(n) => {
                        Self::record(kb, out, Fact::possible_hazard(kind, n), Provenance::Deduced)
                    }
                    _ => {}
                }
            }
            self.certify(kb, n, out);
        }
    }

    /// Whole-grid pass: a visited neighbour without the matching percept
    /// rules the hazard out; if every visited neighbour reports the percept,
    /// the hazard becomes a suspicion.
    fn sweep_into(&self, kb: &mut KnowledgeBase, out: &mut Vec<Deduction>) {
        for cell in self.bounds.cells() {
            if kb.is_visited(cell) || kb.is_safe(cell) {
                continue;
            }
            let visited: Vec<Cell> = self
                .bounds
                .neighbors(cell)
                .filter(|&n| kb.is_visited(n))
                .collect();
            if visited.is_empty() {
                continue;
            }

            for kind in HazardKind::ALL {
                if kb.is_ruled_out(kind, cell) || kb.hazard_present(kind, cell) {
                    continue;
                }
                let signals: Vec<Signal> =
                    visited.iter().map(|&v| self.signal(kb, kind, v)).collect();
                if signals.contains(&Signal::Absent) {
                    Self::record(kb, out, Fact::no_hazard(kind, cell), Provenance::Deduced);
                } else if signals.iter().all(|&s| s == Signal::Present) {
                    Self::record(kb, out, Fact::possible_hazard(kind, cell), Provenance::Deduced);
                }
            }
            self.certify(kb, cell, out);
        }
    }

    /// Neighbours of `at` that could still hide a `kind` hazard.
    fn candidates(&self, kb: &KnowledgeBase, kind: HazardKind, at: Cell) -> Vec<Cell> {
        self.bounds
            .neighbors(at)
            .filter(|&n| !kb.is_visited(n) && !kb.is_safe(n) && !kb.is_ruled_out(kind, n))
            .collect()
    }

    /// Unique-candidate elimination: a percept with exactly one unresolved
    /// neighbour pins the hazard there.
    fn eliminate(&self, kb: &mut KnowledgeBase, out: &mut Vec<Deduction>) {
        let visited: Vec<Cell> = kb.visited().collect();
        for at in visited {
            for kind in HazardKind::ALL {
                if self.signal(kb, kind, at) != Signal::Present {
                    continue;
                }
                let candidates = self.candidates(kb, kind, at);
                if let [only] = candidates.as_slice() {
                    Self::record(kb, out, Fact::hazard(kind, *only), Provenance::Deduced);
                }
            }
        }
    }

    /// Boundary heuristic for an ambiguous stench at a grid edge.
    ///
    /// With more than one wumpus candidate around an edge cell and none of
    /// them already pinned, the wumpus is assumed to sit one step away from
    /// the edge: right of the left edge, else left of the right edge, else
    /// above the bottom edge, else below the top edge. If that cell is not a
    /// candidate, nothing is guessed.
    fn boundary_guess(&self, kb: &mut KnowledgeBase, at: Cell, out: &mut Vec<Deduction>) {
        let kind = HazardKind::Wumpus;
        if !self.bounds.on_edge(at) || self.signal(kb, kind, at) != Signal::Present {
            return;
        }
        let candidates = self.candidates(kb, kind, at);
        if candidates.len() < 2 || candidates.iter().any(|&c| kb.hazard_present(kind, c)) {
            return;
        }

        let inward = if at.x == 1 {
            Direction::Right
        } else if at.x == self.bounds.width {
            Direction::Left
        } else if at.y == 1 {
            Direction::Up
        } else {
            Direction::Down
        };
        let guess = at.step(inward);
        if candidates.contains(&guess) {
            Self::record(kb, out, Fact::hazard(kind, guess), Provenance::Guessed);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Present,
    Absent,
    Unknown,
}
