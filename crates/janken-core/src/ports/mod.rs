//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義します。
//! Round のライフサイクルが外の世界に触れる箇所はすべてここを通ります。
//!
//! # 設計原則
//! - Resolver は純粋関数のまま（乱数・時間・I/O を持ち込まない）
//! - テストでは各ポートを fake に差し替える

pub mod clock;
pub mod event_sink;
pub mod id_generator;
pub mod opponent;
pub mod pacer;
pub mod reporter;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::EventSink;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::opponent::OpponentStrategy;
pub use self::pacer::Pacer;
pub use self::reporter::ResultReporter;
