//! OpponentStrategy port - 相手の手の生成
//!
//! 乱数はここに閉じ込め、Resolver は固定入力でテストできるようにする。

use crate::domain::{MoveId, OutcomeTable};

/// OpponentStrategy は相手の手を 1 つ選ぶ
///
/// # 契約
/// - 戻り値は必ず `table` に含まれる手
/// - 選択範囲は `table.len()` から決まる（手の数を決め打ちしない）
pub trait OpponentStrategy: Send + Sync {
    fn pick(&self, table: &OutcomeTable) -> MoveId;

    /// Moves this strategy is fixed to play, checked against the table when
    /// the game is built. Table-driven strategies return nothing.
    fn fixed_moves(&self) -> &[MoveId] {
        &[]
    }
}
