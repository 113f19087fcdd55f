#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::info;

use wumpus_core::CaveMut;
use wumpus_kb::{HazardDeducer, KnowledgeBase};
use wumpus_tools::{LogEntry, LogSink, NullLogSink};

use crate::{AgentConfig, AttemptReport, Explorer};

/// What a retry starts from after a failed attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KnowledgePolicy {
    /// Every attempt starts with an empty knowledge base.
    #[default]
    Fresh,
    /// Each attempt starts from what the previous one observed, including
    /// where it died, with deductions re-derived. A wumpus killed earlier is
    /// alive again and has to be dealt with anew.
    Inherit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExpeditionConfig {
    pub max_attempts: u32,
    pub knowledge: KnowledgePolicy,
}

impl Default for ExpeditionConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            knowledge: KnowledgePolicy::Fresh,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpeditionReport {
    pub attempts: Vec<AttemptReport>,
}

impl ExpeditionReport {
    pub fn succeeded(&self) -> bool {
        self.attempts.last().is_some_and(|a| a.outcome.is_success())
    }

    pub fn last(&self) -> Option<&AttemptReport> {
        self.attempts.last()
    }
}

/// Repeats attempts on copies of one cave until the goal is reached or the
/// attempt budget runs out.
pub struct Expedition<W> {
    world: W,
    agent: AgentConfig,
    config: ExpeditionConfig,
}

impl<W> Expedition<W>
where
    W: CaveMut + Clone,
{
    pub fn new(world: W, agent: AgentConfig, config: ExpeditionConfig) -> Self {
        Self {
            world,
            agent,
            config,
        }
    }

    pub fn run(&self) -> ExpeditionReport {
        self.run_with_sink(&mut NullLogSink)
    }

    /// Like [`Expedition::run`], streaming every attempt's log into `sink`.
    pub fn run_with_sink(&self, sink: &mut dyn LogSink) -> ExpeditionReport {
        let mut attempts: Vec<AttemptReport> = Vec::new();
        let mut knowledge = KnowledgeBase::new();
        let deducer = HazardDeducer::new(self.world.bounds());

        for attempt in 1..=self.config.max_attempts.max(1) {
            let mut world = self.world.clone();
            let kb = match self.config.knowledge {
                KnowledgePolicy::Fresh => KnowledgeBase::new(),
                KnowledgePolicy::Inherit => std::mem::take(&mut knowledge),
            };

            let report = Explorer::with_knowledge(&mut world, self.agent, kb)
                .with_sink(ForwardSink(&mut *sink))
                .run();
            info!(
                attempt,
                outcome = ?report.outcome,
                score = report.score,
                turns = report.turns,
                "attempt finished"
            );

            let done = report.outcome.is_success();
            if self.config.knowledge == KnowledgePolicy::Inherit {
                knowledge = deducer.relearn(&report.knowledge);
            }
            attempts.push(report);
            if done {
                break;
            }
        }

        ExpeditionReport { attempts }
    }
}

struct ForwardSink<'a>(&'a mut dyn LogSink);

impl LogSink for ForwardSink<'_> {
    fn record(&mut self, entry: &LogEntry) {
        self.0.record(entry);
    }
}
