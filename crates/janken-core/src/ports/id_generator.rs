//! IdGenerator port - ID 生成の抽象化
//!
//! # 実装
//! - **UlidGenerator**: Clock の時刻 + ランダム部分で ULID を作る

use crate::domain::ids::{RoundId, SessionId};
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator はラウンドとセッションの ID を生成
pub trait IdGenerator: Send + Sync {
    fn generate_round_id(&self) -> RoundId;

    fn generate_session_id(&self) -> SessionId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// FixedClock を渡すと timestamp 部分が固定される（ランダム部分は残る）。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_round_id(&self) -> RoundId {
        RoundId::from(self.next())
    }

    fn generate_session_id(&self) -> SessionId {
        SessionId::from(self.next())
    }
}
