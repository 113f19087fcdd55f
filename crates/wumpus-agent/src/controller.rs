use std::collections::{BTreeSet, VecDeque};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use wumpus_core::{CaveMut, Cell, Content, Direction};
use wumpus_kb::{Deduction, Fact, HazardDeducer, HazardKind, KnowledgeBase, Percept, Predicate};
use wumpus_nav::{GridPlanner, Route};
use wumpus_tools::{emit, ActionLog, Event, LogEntry, LogSink, NullLogSink};

use crate::AgentConfig;

/// Where the controller is in its perceive/decide/move cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Choosing the next move or shot.
    Exploring,
    /// A move has been chosen and is about to be taken.
    Moving,
    /// Reading the contents of the current cell.
    Perceiving,
    Dead,
    GoalReached,
    /// No cell left to try.
    Stranded,
    /// `max_turns` used up.
    OutOfTurns,
}

impl Phase {
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Phase::Exploring | Phase::Moving | Phase::Perceiving => None,
            Phase::Dead => Some(Outcome::Died),
            Phase::GoalReached => Some(Outcome::GoalReached),
            Phase::Stranded => Some(Outcome::Stranded),
            Phase::OutOfTurns => Some(Outcome::TurnLimit),
        }
    }

    pub fn is_terminal(self) -> bool {
        self.outcome().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    GoalReached,
    Died,
    Stranded,
    TurnLimit,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        self == Outcome::GoalReached
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Hit,
    Miss,
    /// No arrow left, or the attempt is already over. Nothing happened.
    Unavailable,
}

/// Result of one finished attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttemptReport {
    pub outcome: Outcome,
    pub score: i64,
    pub turns: u32,
    pub moves: u32,
    pub arrow_used: bool,
    pub final_position: Cell,
    pub log: ActionLog,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub knowledge: KnowledgeBase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Move(Cell),
    Shoot(Cell),
}

/// Drives one exploration attempt.
///
/// The explorer is the single writer of the agent position and reads cell
/// contents only for the cell it stands on, plus the one cell an arrow flies
/// into.
pub struct Explorer<'w, W: CaveMut> {
    world: &'w mut W,
    config: AgentConfig,
    kb: KnowledgeBase,
    deducer: HazardDeducer,
    planner: GridPlanner,
    path: VecDeque<Cell>,
    pending: Option<Cell>,
    facing: Direction,
    score: i64,
    has_arrow: bool,
    alive: bool,
    collected: BTreeSet<Cell>,
    phase: Phase,
    turn: u32,
    moves: u32,
    log: ActionLog,
    sink: Box<dyn LogSink + 'w>,
}

impl<'w, W: CaveMut> Explorer<'w, W> {
    pub fn new(world: &'w mut W, config: AgentConfig) -> Self {
        Self::with_knowledge(world, config, KnowledgeBase::new())
    }

    /// Start an attempt on top of existing knowledge (e.g. from an earlier
    /// attempt on the same cave).
    pub fn with_knowledge(world: &'w mut W, config: AgentConfig, kb: KnowledgeBase) -> Self {
        let bounds = world.bounds();
        Self {
            world,
            config,
            kb,
            deducer: HazardDeducer::new(bounds),
            planner: GridPlanner::new(bounds),
            path: VecDeque::new(),
            pending: None,
            facing: Direction::default(),
            score: 0,
            has_arrow: true,
            alive: true,
            collected: BTreeSet::new(),
            phase: Phase::Perceiving,
            turn: 0,
            moves: 0,
            log: ActionLog::default(),
            sink: Box::new(NullLogSink),
        }
    }

    /// Stream every log entry into `sink` as it is produced.
    pub fn with_sink(mut self, sink: impl LogSink + 'w) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn position(&self) -> Cell {
        self.world.agent_position()
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn has_arrow(&self) -> bool {
        self.has_arrow
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    /// Cells queued for upcoming moves.
    pub fn planned_path(&self) -> impl Iterator<Item = Cell> + '_ {
        self.path.iter().copied()
    }

    /// Replace the planned path with `cells`, walked one step per move.
    ///
    /// Each cell is checked against current knowledge before the agent steps
    /// in: a possible wumpus is shot at while the arrow lasts, any other
    /// threat drops the rest of the path. A safe unvisited neighbour still
    /// takes precedence over the path.
    pub fn follow_route(&mut self, cells: impl IntoIterator<Item = Cell>) {
        self.path = cells.into_iter().collect();
    }

    /// Advance the state machine by one phase. Terminal phases are sticky.
    pub fn step(&mut self) -> Phase {
        match self.phase {
            Phase::Exploring => self.explore(),
            Phase::Moving => self.advance(),
            Phase::Perceiving => self.perceive(),
            Phase::Dead | Phase::GoalReached | Phase::Stranded | Phase::OutOfTurns => {}
        }
        self.phase
    }

    pub fn run(mut self) -> AttemptReport {
        let outcome = loop {
            if let Some(outcome) = self.step().outcome() {
                break outcome;
            }
        };
        AttemptReport {
            outcome,
            score: self.score,
            turns: self.turn,
            moves: self.moves,
            arrow_used: !self.has_arrow,
            final_position: self.position(),
            log: self.log,
            knowledge: self.kb,
        }
    }

    /// Turn towards `direction` and fire the arrow at the adjacent cell.
    ///
    /// Turning on the spot is free and is not logged on its own; the shot
    /// takes one turn and its log entry carries the new facing.
    ///
    /// Whether the shot hits is decided by the cave's true contents, not by
    /// the agent's beliefs.
    pub fn shoot(&mut self, direction: Direction) -> ShotOutcome {
        if !self.has_arrow || self.phase.is_terminal() {
            return ShotOutcome::Unavailable;
        }

        let target = self.position().step(direction);
        self.facing = direction;
        self.has_arrow = false;
        self.score -= self.config.arrow_cost;
        self.turn += 1;
        self.path.clear();
        self.record(Event::ArrowShot {
            target,
            facing: direction,
        });

        let bounds = self.world.bounds();
        if bounds.contains(target) && self.world.content_at(target).contains(Content::Wumpus) {
            self.kb.tell(Fact::new(Predicate::Neutralized, target));
            self.record(Event::WumpusKilled { at: target });
            info!(turn = self.turn, cell = %target, "wumpus killed");
            for deduction in self.deducer.after_kill(&mut self.kb, target) {
                self.report(deduction);
            }
            ShotOutcome::Hit
        } else {
            self.record(Event::ArrowMissed { target });
            debug!(turn = self.turn, cell = %target, "arrow missed");
            ShotOutcome::Miss
        }
    }

    fn record(&mut self, event: Event) {
        emit(
            &mut self.log,
            self.sink.as_mut(),
            LogEntry::new(self.turn, event),
        );
    }

    fn report(&mut self, deduction: Deduction) {
        let Deduction { fact, provenance } = deduction;
        match fact.predicate {
            Predicate::Hazard(kind) => self.record(Event::HazardFound {
                kind,
                at: fact.cell,
                provenance,
            }),
            Predicate::PossibleHazard(kind) => self.record(Event::HazardSuspected {
                kind,
                at: fact.cell,
            }),
            _ => debug!(turn = self.turn, %fact, ?provenance, "deduced"),
        }
    }

    fn explore(&mut self) {
        if self.turn >= self.config.max_turns {
            self.record(Event::TurnLimit { turns: self.turn });
            warn!(turns = self.turn, "turn limit reached");
            self.phase = Phase::OutOfTurns;
            return;
        }

        debug!(
            turn = self.turn,
            cell = %self.position(),
            score = self.score,
            planned = self.path.len(),
            "choosing next action"
        );
        match self.decide() {
            Some(Action::Move(to)) => {
                self.pending = Some(to);
                self.phase = Phase::Moving;
            }
            Some(Action::Shoot(target)) => {
                if let Some(direction) = self.position().direction_to(target) {
                    self.shoot(direction);
                }
            }
            None => {
                let at = self.position();
                self.record(Event::Stranded { at });
                info!(turn = self.turn, cell = %at, "no way forward");
                self.phase = Phase::Stranded;
            }
        }
    }

    fn advance(&mut self) {
        let Some(to) = self.pending.take() else {
            self.phase = Phase::Exploring;
            return;
        };
        let from = self.position();
        if let Some(direction) = from.direction_to(to) {
            self.facing = direction;
        }

        self.world.set_agent_position(to);
        self.score -= self.config.move_cost;
        self.turn += 1;
        self.moves += 1;
        self.record(Event::Moved {
            to,
            facing: self.facing,
        });
        self.phase = Phase::Perceiving;
    }

    fn perceive(&mut self) {
        let at = self.position();
        let contents = self.world.content_at(at);

        for content in contents.iter() {
            match content {
                Content::Breeze => self.sense(Percept::Breeze, at),
                Content::Stench => self.sense(Percept::Stench, at),
                Content::Gold => self.collect_gold(at),
                Content::Wumpus if self.kb.is_neutralized(at) => {
                    self.record(Event::SlainWumpusPassed { at });
                }
                hazard => {
                    if let Some(kind) = HazardKind::from_content(hazard) {
                        self.die(kind, at);
                    }
                }
            }
        }
        if !self.alive {
            return;
        }

        for percept in Percept::ALL {
            if !contents.contains(percept.content()) {
                self.kb.tell(Fact::no_percept(percept, at));
            }
        }
        self.kb.mark_visited(at);
        for deduction in self.deducer.after_perception(&mut self.kb, at) {
            self.report(deduction);
        }

        if at == self.world.goal() {
            self.record(Event::GoalReached { score: self.score });
            info!(turn = self.turn, score = self.score, "goal reached");
            self.phase = Phase::GoalReached;
        } else {
            self.phase = Phase::Exploring;
        }
    }

    fn sense(&mut self, percept: Percept, at: Cell) {
        self.kb.tell(Fact::percept(percept, at));
        self.record(Event::Perceived { percept, at });
    }

    fn collect_gold(&mut self, at: Cell) {
        if !self.collected.insert(at) {
            return;
        }
        self.score += self.config.gold_bounty;
        self.kb.tell(Fact::new(Predicate::Gold, at));
        self.kb.tell(Fact::new(Predicate::GoldCollected, at));
        self.record(Event::GoldCollected { at });
    }

    fn die(&mut self, kind: HazardKind, at: Cell) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.score -= self.config.death_penalty;
        self.path.clear();
        self.kb.tell(Fact::hazard(kind, at));
        self.record(Event::Died { kind, at });
        info!(turn = self.turn, cell = %at, hazard = %kind, score = self.score, "agent died");
        self.phase = Phase::Dead;
    }

    fn decide(&mut self) -> Option<Action> {
        let here = self.position();

        // Fresh safety information beats a stale plan.
        if let Some(next) = self.safe_neighbor(here) {
            self.path.clear();
            return Some(Action::Move(next));
        }
        if let Some(action) = self.follow_path(here) {
            return Some(action);
        }
        if self.plan_target(here) {
            if let Some(action) = self.follow_path(here) {
                return Some(action);
            }
        }
        self.fallback(here)
    }

    fn safe_neighbor(&self, here: Cell) -> Option<Cell> {
        let bounds = self.world.bounds();
        let goal = self.world.goal();
        bounds
            .neighbors(here)
            .filter(|&n| self.kb.is_safe(n) && !self.kb.is_visited(n))
            .min_by_key(|&n| (self.config.danger.score(&self.kb, n), n.manhattan(goal)))
    }

    fn follow_path(&mut self, here: Cell) -> Option<Action> {
        while self.path.front() == Some(&here) {
            self.path.pop_front();
        }
        let next = *self.path.front()?;
        if !here.is_adjacent(next) {
            self.path.clear();
            return None;
        }

        let threatened = HazardKind::ALL
            .into_iter()
            .any(|kind| self.kb.hazard_present(kind, next) || self.kb.is_suspected(kind, next));
        if threatened {
            if self.has_arrow && self.wumpus_possible(next) {
                return Some(Action::Shoot(next));
            }
            self.path.clear();
            return None;
        }

        self.path.pop_front();
        Some(Action::Move(next))
    }

    /// Queue a route to the next target: the nearest reachable safe unvisited
    /// cell, then known gold not collected in this attempt, then the goal.
    fn plan_target(&mut self, here: Cell) -> bool {
        let mut unexplored: Vec<Cell> = self
            .kb
            .safe_cells()
            .filter(|&c| !self.kb.is_visited(c))
            .collect();
        unexplored.sort_by_key(|&c| c.manhattan(here));

        let mut gold: Vec<Cell> = self
            .kb
            .facts()
            .filter(|(fact, _)| fact.predicate == Predicate::Gold)
            .map(|(fact, _)| fact.cell)
            .filter(|c| !self.collected.contains(c))
            .collect();
        gold.sort_by_key(|&c| c.manhattan(here));

        let targets = unexplored
            .into_iter()
            .chain(gold)
            .chain(std::iter::once(self.world.goal()));
        for target in targets {
            let route = self.planner.find_path(&self.kb, here, target);
            if route.steps() > 0 {
                debug!(turn = self.turn, target = %target, steps = route.steps(), "route planned");
                self.path = route.into_queue();
                return true;
            }
        }
        false
    }

    /// No provably safe progress: take the least dangerous frontier cell.
    fn fallback(&mut self, here: Cell) -> Option<Action> {
        let bounds = self.world.bounds();
        let weights = self.config.danger;
        let kb = &self.kb;

        let (risk, danger) = bounds
            .cells()
            .filter(|&c| !kb.is_visited(c) && bounds.neighbors(c).any(|n| kb.is_visited(n)))
            .map(|c| (c, weights.score(kb, c)))
            .min_by_key(|&(c, danger)| (danger, c.manhattan(here), c))?;

        if here.is_adjacent(risk) {
            if self.has_arrow
                && self.wumpus_possible(risk)
                && self.kb.is_ruled_out(HazardKind::Pit, risk)
            {
                return Some(Action::Shoot(risk));
            }
            warn!(turn = self.turn, cell = %risk, danger, "no safe move, taking a risk");
            self.record(Event::RiskTaken { to: risk, danger });
            return Some(Action::Move(risk));
        }

        let approach = bounds
            .neighbors(risk)
            .filter(|&n| self.kb.is_visited(n))
            .map(|n| self.planner.find_path(&self.kb, here, n))
            .filter(|route| !route.is_empty())
            .min_by_key(Route::len)?;
        self.path = approach.into_queue();
        self.follow_path(here)
    }

    fn wumpus_possible(&self, cell: Cell) -> bool {
        self.kb.hazard_present(HazardKind::Wumpus, cell)
            || self.kb.is_suspected(HazardKind::Wumpus, cell)
    }
}
