#![cfg(feature = "serde")]

use wumpus_core::{Cell, Direction};
use wumpus_kb::{HazardKind, Provenance};
use wumpus_tools::{ActionLog, Event, LogEntry};

#[test]
fn action_log_roundtrips_via_serde() {
    let mut log = ActionLog::default();
    log.push(LogEntry::new(
        1,
        Event::Moved {
            to: Cell::new(2, 1),
            facing: Direction::Right,
        },
    ));
    log.push(LogEntry::new(
        1,
        Event::HazardFound {
            kind: HazardKind::Wumpus,
            at: Cell::new(3, 1),
            provenance: Provenance::Guessed,
        },
    ));

    let json = serde_json::to_string(&log).expect("serialize log");
    let back: ActionLog = serde_json::from_str(&json).expect("deserialize log");

    assert_eq!(log, back);
    assert_eq!(log.lines().collect::<Vec<_>>(), back.lines().collect::<Vec<_>>());
}
