//! Resolver: maps a pair of moves to an [`Outcome`].
//!
//! Pure and deterministic. Randomness (the opponent's draw) lives behind
//! [`crate::ports::OpponentStrategy`], never here.

use std::sync::Arc;

use super::errors::GameError;
use super::moves::MoveId;
use super::outcome::Outcome;
use super::table::OutcomeTable;

#[derive(Debug, Clone)]
pub struct Resolver {
    table: Arc<OutcomeTable>,
}

impl Resolver {
    pub fn new(table: Arc<OutcomeTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &OutcomeTable {
        &self.table
    }

    /// Resolve `player` against `opponent`.
    ///
    /// # Errors
    /// - `InvalidMove` if either side is not in the table.
    /// - `Inconsistent` if neither move beats the other. A validated table
    ///   never produces this.
    pub fn resolve(&self, player: &MoveId, opponent: &MoveId) -> Result<Outcome, GameError> {
        let player_beats = self
            .table
            .beats(player)
            .ok_or_else(|| GameError::InvalidMove(player.clone()))?;
        let opponent_beats = self
            .table
            .beats(opponent)
            .ok_or_else(|| GameError::InvalidMove(opponent.clone()))?;

        if player == opponent {
            return Ok(Outcome::Draw);
        }
        if player_beats.contains(opponent) {
            return Ok(Outcome::PlayerWin);
        }
        if opponent_beats.contains(player) {
            return Ok(Outcome::PlayerLose);
        }
        Err(GameError::Inconsistent(format!(
            "neither '{player}' nor '{opponent}' wins"
        )))
    }
}
