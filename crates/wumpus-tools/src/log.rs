use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use wumpus_core::{Cell, Direction};
use wumpus_kb::{HazardKind, Percept, Provenance};

/// Something that happened during one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Event {
    Moved { to: Cell, facing: Direction },
    Perceived { percept: Percept, at: Cell },
    GoldCollected { at: Cell },
    HazardFound { kind: HazardKind, at: Cell, provenance: Provenance },
    HazardSuspected { kind: HazardKind, at: Cell },
    RiskTaken { to: Cell, danger: u32 },
    ArrowShot { target: Cell, facing: Direction },
    WumpusKilled { at: Cell },
    ArrowMissed { target: Cell },
    SlainWumpusPassed { at: Cell },
    Died { kind: HazardKind, at: Cell },
    GoalReached { score: i64 },
    Stranded { at: Cell },
    TurnLimit { turns: u32 },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Moved { to, facing } => write!(f, "Moved to {to} facing {facing}"),
            Event::Perceived { percept, at } => write!(f, "{percept} sensed at {at}"),
            Event::GoldCollected { at } => write!(f, "Gold found at {at}"),
            Event::HazardFound {
                kind,
                at,
                provenance: Provenance::Observed,
            } => write!(f, "Found out {kind} is on field {at}"),
            Event::HazardFound {
                kind,
                at,
                provenance: Provenance::Deduced,
            } => write!(f, "Deduced that the {kind} is on field {at}"),
            Event::HazardFound {
                kind,
                at,
                provenance: Provenance::Guessed,
            } => write!(f, "Guessed that the {kind} is on field {at}"),
            Event::HazardSuspected { kind, at } => write!(f, "Possible {kind} on field {at}"),
            Event::RiskTaken { to, danger } => {
                write!(f, "No safe move left, risking {to} (danger {danger})")
            }
            Event::ArrowShot { target, facing } => {
                write!(f, "Arrow shot {facing} at {target}")
            }
            Event::WumpusKilled { at } => write!(f, "Wumpus killed at {at}"),
            Event::ArrowMissed { target } => write!(f, "Arrow missed, nothing at {target}"),
            Event::SlainWumpusPassed { at } => write!(f, "Passed the slain Wumpus at {at}"),
            Event::Died { kind, at } => write!(f, "Agent died! Stepped into a {kind} at {at}"),
            Event::GoalReached { score } => write!(f, "Reached the goal! Final score: {score}"),
            Event::Stranded { at } => write!(f, "No way forward from {at}, giving up"),
            Event::TurnLimit { turns } => write!(f, "Gave up after {turns} turns"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogEntry {
    pub turn: u32,
    pub event: Event,
}

impl LogEntry {
    pub fn new(turn: u32, event: Event) -> Self {
        Self { turn, event }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Turn {}] {}", self.turn, self.event)
    }
}

pub trait LogSink {
    fn record(&mut self, entry: &LogEntry);
}

#[derive(Debug, Default)]
pub struct NullLogSink;

impl LogSink for NullLogSink {
    fn record(&mut self, _entry: &LogEntry) {}
}

#[derive(Debug, Default)]
pub struct VecLogSink {
    pub entries: Vec<LogEntry>,
}

impl LogSink for VecLogSink {
    fn record(&mut self, entry: &LogEntry) {
        self.entries.push(entry.clone());
    }
}

/// Streams entries into `tracing` at info level.
#[derive(Debug, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn record(&mut self, entry: &LogEntry) {
        tracing::info!(turn = entry.turn, "{}", entry.event);
    }
}

/// Append-only, ordered record of one attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionLog {
    pub entries: Vec<LogEntry>,
}

impl ActionLog {
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// `"[Turn N] <event>"` lines in occurrence order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(|entry| entry.to_string())
    }
}

impl LogSink for ActionLog {
    fn record(&mut self, entry: &LogEntry) {
        self.push(entry.clone());
    }
}

/// Append to the attempt's log and forward to the streaming sink.
pub fn emit(log: &mut ActionLog, sink: &mut dyn LogSink, entry: LogEntry) {
    sink.record(&entry);
    log.push(entry);
}
