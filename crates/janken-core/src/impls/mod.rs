//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **Reporter**: InMemoryReporter（テスト用）, LogReporter, JsonLinesReporter
//! - **Opponent**: UniformOpponent, FixedOpponent, ScriptedOpponent
//! - **Pacer**: TokioPacer, NoPause
//! - **EventSink**: NoopEventSink, ChannelEventSink

pub mod event_sink;
pub mod inmem_reporter;
pub mod jsonl_reporter;
pub mod log_reporter;
pub mod opponent;
pub mod pacer;

pub use self::event_sink::{ChannelEventSink, NoopEventSink};
pub use self::inmem_reporter::InMemoryReporter;
pub use self::jsonl_reporter::JsonLinesReporter;
pub use self::log_reporter::LogReporter;
pub use self::opponent::{FixedOpponent, ScriptedOpponent, UniformOpponent};
pub use self::pacer::{NoPause, TokioPacer};
