use wumpus_core::{Bounds, Cell};
use wumpus_kb::{Fact, HazardKind, KnowledgeBase, Percept, Predicate, Provenance};

#[test]
fn fresh_kb_answers_no_hazard_everywhere() {
    let kb = KnowledgeBase::new();
    for cell in Bounds::new(4, 4).cells() {
        assert!(kb.ask(Predicate::NoHazard(HazardKind::Pit), cell));
        assert!(kb.ask(Predicate::NoHazard(HazardKind::Wumpus), cell));
        assert!(!kb.ask(Predicate::Safe, cell), "safety is never assumed");
    }
}

#[test]
fn tell_is_idempotent() {
    let mut kb = KnowledgeBase::new();
    let fact = Fact::percept(Percept::Breeze, Cell::new(1, 1));

    assert!(kb.tell(fact));
    assert!(!kb.tell(fact));
    assert_eq!(kb.len(), 1);
    assert!(kb.ask(Predicate::Percept(Percept::Breeze), Cell::new(1, 1)));
}

#[test]
fn visiting_implies_safe_and_drops_suspicion() {
    let mut kb = KnowledgeBase::new();
    let cell = Cell::new(2, 3);
    kb.infer(Fact::possible_hazard(HazardKind::Pit, cell));
    assert!(kb.is_suspected(HazardKind::Pit, cell));

    kb.mark_visited(cell);

    assert!(kb.is_visited(cell));
    assert!(kb.is_safe(cell));
    assert!(!kb.is_suspected(HazardKind::Pit, cell));
    assert_eq!(kb.visited().collect::<Vec<_>>(), vec![cell]);
}

#[test]
fn ruling_out_a_hazard_retracts_its_suspicion_only() {
    let mut kb = KnowledgeBase::new();
    let cell = Cell::new(1, 2);
    kb.infer(Fact::possible_hazard(HazardKind::Pit, cell));
    kb.infer(Fact::possible_hazard(HazardKind::Wumpus, cell));

    kb.infer(Fact::no_hazard(HazardKind::Pit, cell));

    assert!(!kb.is_suspected(HazardKind::Pit, cell));
    assert!(kb.is_suspected(HazardKind::Wumpus, cell));
    assert!(kb.is_ruled_out(HazardKind::Pit, cell));
}

#[test]
fn safety_survives_unrelated_tells_but_not_a_hazard_assertion() {
    let mut kb = KnowledgeBase::new();
    let cell = Cell::new(3, 3);
    kb.mark_safe(cell);

    kb.tell(Fact::percept(Percept::Stench, cell));
    kb.tell(Fact::possible_hazard(HazardKind::Wumpus, cell));
    kb.tell(Fact::new(Predicate::Gold, cell));
    kb.tell(Fact::no_hazard(HazardKind::Pit, cell));
    assert!(kb.is_safe(cell));

    kb.tell(Fact::hazard(HazardKind::Pit, cell));
    assert!(!kb.is_safe(cell));
    assert!(!kb.ask(Predicate::NoHazard(HazardKind::Pit), cell));
}

#[test]
fn neutralized_wumpus_no_longer_counts_as_hazard() {
    let mut kb = KnowledgeBase::new();
    let cell = Cell::new(2, 2);
    kb.infer(Fact::hazard(HazardKind::Wumpus, cell));
    assert!(kb.ask(Predicate::Hazard(HazardKind::Wumpus), cell));

    kb.tell(Fact::new(Predicate::Neutralized, cell));
    kb.mark_safe(cell);

    assert!(!kb.ask(Predicate::Hazard(HazardKind::Wumpus), cell));
    assert!(kb.ask(Predicate::NoHazard(HazardKind::Wumpus), cell));
    assert!(kb.is_ruled_out(HazardKind::Wumpus, cell));
    assert!(kb.is_safe(cell));
}

#[test]
fn provenance_keeps_the_strongest_source() {
    let mut kb = KnowledgeBase::new();
    let fact = Fact::hazard(HazardKind::Wumpus, Cell::new(4, 1));

    assert!(kb.guess(fact));
    assert_eq!(kb.provenance(fact), Some(Provenance::Guessed));

    assert!(kb.infer(fact), "upgrade counts as a change");
    assert_eq!(kb.provenance(fact), Some(Provenance::Deduced));

    assert!(!kb.guess(fact));
    assert_eq!(kb.provenance(fact), Some(Provenance::Deduced));
}

#[test]
fn cloned_kb_is_independent() {
    let mut kb = KnowledgeBase::new();
    kb.mark_visited(Cell::new(1, 1));

    let mut inherited = kb.clone();
    inherited.mark_visited(Cell::new(1, 2));

    assert!(!kb.is_visited(Cell::new(1, 2)));
    assert!(inherited.is_visited(Cell::new(1, 1)));
}

#[test]
fn observations_keep_what_was_seen_and_forget_kills() {
    let mut kb = KnowledgeBase::new();
    let start = Cell::new(1, 1);
    let lair = Cell::new(2, 1);
    kb.mark_visited(start);
    kb.tell(Fact::percept(Percept::Stench, start));
    kb.infer(Fact::hazard(HazardKind::Wumpus, lair));
    kb.tell(Fact::new(Predicate::Neutralized, lair));
    kb.mark_visited(lair);
    kb.tell(Fact::hazard(HazardKind::Pit, Cell::new(3, 1)));

    let seen = kb.observations();

    assert!(seen.is_visited(start));
    assert!(seen.holds(Fact::percept(Percept::Stench, start)));
    assert_eq!(
        seen.provenance(Fact::hazard(HazardKind::Pit, Cell::new(3, 1))),
        Some(Provenance::Observed)
    );
    assert!(!seen.is_neutralized(lair));
    assert!(!seen.is_visited(lair));
    assert!(!seen.is_safe(lair));
    assert!(!seen.holds(Fact::hazard(HazardKind::Wumpus, lair)));
}
