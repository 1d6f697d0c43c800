//! janken-core
//!
//! Rock-paper-scissors-lizard-Spock: rules, rounds and result reporting.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（moves, table, resolver, round, state, errors, events）
//! - **ports**: 抽象化レイヤー（ResultReporter, OpponentStrategy, Pacer, Clock, など）
//! - **impls**: ports の実装（LogReporter, JsonLinesReporter, TokioPacer, など）
//! - **app**: アプリケーションロジック（GameBuilder, Game, Session, GameConfig）

pub mod domain;
pub mod ports;
pub mod impls;
pub mod app;
