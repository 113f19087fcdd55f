//! Tooling around exploration runs: the per-turn action log and the sinks it
//! can be streamed into.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod log;

pub use log::{emit, ActionLog, Event, LogEntry, LogSink, NullLogSink, TracingLogSink, VecLogSink};
