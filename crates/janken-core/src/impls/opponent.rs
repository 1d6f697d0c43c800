//! OpponentStrategy の実装
//!
//! - UniformOpponent: 各手を等確率で選ぶ（本番用）
//! - FixedOpponent: 常に同じ手（テスト用）
//! - ScriptedOpponent: 決められた順番で手を出す（テスト・デモ用）

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

use crate::domain::{ConfigError, MoveId, OutcomeTable};
use crate::ports::OpponentStrategy;

/// Uniform draw over the configured move set.
///
/// The range comes from `table.len()`, so resizing the table needs no code change.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformOpponent;

impl OpponentStrategy for UniformOpponent {
    fn pick(&self, table: &OutcomeTable) -> MoveId {
        let index = rand::thread_rng().gen_range(0..table.len());
        table.moves()[index].clone()
    }
}

#[derive(Debug, Clone)]
pub struct FixedOpponent {
    mv: MoveId,
}

impl FixedOpponent {
    pub fn new(mv: impl Into<MoveId>) -> Self {
        Self { mv: mv.into() }
    }
}

impl OpponentStrategy for FixedOpponent {
    fn pick(&self, _table: &OutcomeTable) -> MoveId {
        self.mv.clone()
    }

    fn fixed_moves(&self) -> &[MoveId] {
        std::slice::from_ref(&self.mv)
    }
}

/// Plays `script` in order, cycling when it runs out.
#[derive(Debug)]
pub struct ScriptedOpponent {
    script: Vec<MoveId>,
    cursor: AtomicUsize,
}

impl ScriptedOpponent {
    pub fn new(script: Vec<MoveId>) -> Result<Self, ConfigError> {
        if script.is_empty() {
            return Err(ConfigError::EmptyMoveSet);
        }
        Ok(Self {
            script,
            cursor: AtomicUsize::new(0),
        })
    }
}

impl OpponentStrategy for ScriptedOpponent {
    fn pick(&self, _table: &OutcomeTable) -> MoveId {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.script[i % self.script.len()].clone()
    }

    fn fixed_moves(&self) -> &[MoveId] {
        &self.script
    }
}
