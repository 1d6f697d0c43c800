//! Round record and its state transitions.
//!
//! Design: same shape as the other records in this crate.
//! - Fields are read through accessors; state changes only through methods
//! - Every method validates before mutating, so a rejected call leaves the round untouched
//! - Timing and randomness live in `app::session`; this type is synchronous and pure

use serde::Serialize;

use super::errors::GameError;
use super::ids::RoundId;
use super::moves::MoveId;
use super::outcome::Outcome;
use super::player::PlayerName;
use super::record::GameRecord;
use super::resolver::Resolver;
use super::state::RoundState;
use super::table::OutcomeTable;

/// Whether a guarded transition took effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    /// Input arrived in a state that does not accept it.
    Ignored,
}

impl Transition {
    pub fn is_applied(self) -> bool {
        matches!(self, Transition::Applied)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    id: RoundId,
    player: PlayerName,
    state: RoundState,
    player_move: Option<MoveId>,
    opponent_move: Option<MoveId>,
    outcome: Option<Outcome>,
    completed: bool,
}

impl Round {
    pub fn new(id: RoundId, player: PlayerName) -> Self {
        Self {
            id,
            player,
            state: RoundState::AwaitingPlayerMove,
            player_move: None,
            opponent_move: None,
            outcome: None,
            completed: false,
        }
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn player_move(&self) -> Option<&MoveId> {
        self.player_move.as_ref()
    }

    pub fn opponent_move(&self) -> Option<&MoveId> {
        self.opponent_move.as_ref()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Accept the player's selection.
    ///
    /// Unknown moves are rejected regardless of state. A valid move outside
    /// `AwaitingPlayerMove` is ignored.
    pub fn select_player_move(
        &mut self,
        table: &OutcomeTable,
        mv: MoveId,
    ) -> Result<Transition, GameError> {
        if !table.contains(&mv) {
            return Err(GameError::InvalidMove(mv));
        }
        if !self.state.accepts_player_move() {
            return Ok(Transition::Ignored);
        }
        self.player_move = Some(mv);
        self.state = RoundState::AwaitingOpponentMove;
        Ok(Transition::Applied)
    }

    /// Record the opponent's move. Accepted once, while awaiting it.
    pub fn set_opponent_move(
        &mut self,
        table: &OutcomeTable,
        mv: MoveId,
    ) -> Result<Transition, GameError> {
        if !table.contains(&mv) {
            return Err(GameError::InvalidMove(mv));
        }
        if self.state != RoundState::AwaitingOpponentMove || self.opponent_move.is_some() {
            return Ok(Transition::Ignored);
        }
        self.opponent_move = Some(mv);
        Ok(Transition::Applied)
    }

    /// Resolve the round once both moves are known.
    ///
    /// Calling again after resolution returns the stored outcome.
    pub fn resolve(&mut self, resolver: &Resolver) -> Result<Outcome, GameError> {
        if let Some(outcome) = self.outcome {
            return Ok(outcome);
        }
        let (Some(player), Some(opponent)) = (&self.player_move, &self.opponent_move) else {
            return Err(GameError::NotReady { state: self.state });
        };
        let outcome = resolver.resolve(player, opponent)?;
        self.outcome = Some(outcome);
        self.state = RoundState::Resolved;
        Ok(outcome)
    }

    /// `Resolved -> Reported`. The completion flag flips exactly once.
    pub fn mark_reported(&mut self) -> Transition {
        if self.state != RoundState::Resolved {
            return Transition::Ignored;
        }
        self.state = RoundState::Reported;
        self.completed = true;
        Transition::Applied
    }

    /// The reporter payload, available once resolved.
    pub fn record(&self) -> Option<GameRecord> {
        self.outcome.map(|outcome| GameRecord {
            player: self.player.clone(),
            outcome: outcome.label(),
        })
    }
}
