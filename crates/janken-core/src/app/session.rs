//! Session - 1 人のプレイヤーのラウンド進行
//!
//! # フロー
//! 1. `start(name)`: 名前を検証して新しい Round を作る
//! 2. `select(move)`: プレイヤーの手を受け付ける（2 回目以降は無視）
//! 3. `reveal()`: 待ち → 相手の手 → 待ち → 判定 → 報告（投げっぱなし）
//! 4. `reset()`: Round と名前を捨てる。次は名前の入力から
//!
//! 待ちは Pacer の await なので、同じ runtime の他の処理は進む。
//! 報告は別タスクで実行し、その成否はラウンドの進行に影響しない。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::app::builder::GameContext;
use crate::app::stats::Scoreboard;
use crate::domain::{
    GameError, GameRecord, MoveId, Outcome, PlayerName, ReportError, Round, RoundEvent, RoundId,
    RoundState, SessionId, Transition,
};

/// What the front-end shows once a round is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round_id: RoundId,
    pub player: PlayerName,
    pub player_move: MoveId,
    pub opponent_move: MoveId,
    pub outcome: Outcome,
    pub finished_at: DateTime<Utc>,
}

pub struct Session {
    id: SessionId,
    ctx: Arc<GameContext>,
    round: Option<Round>,
    scoreboard: Scoreboard,
    /// In-flight reporter calls. Only awaited by `flush_reports`.
    reports: Vec<JoinHandle<()>>,
}

impl Session {
    pub(crate) fn new(ctx: Arc<GameContext>) -> Self {
        Self {
            id: ctx.ids.generate_session_id(),
            ctx,
            round: None,
            scoreboard: Scoreboard::default(),
            reports: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn state(&self) -> Option<RoundState> {
        self.round.as_ref().map(Round::state)
    }

    pub fn player(&self) -> Option<&PlayerName> {
        self.round.as_ref().map(Round::player)
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Begin a new round for `name`.
    ///
    /// Refused while a round is mid-play. A reported round is replaced by a
    /// fresh one; nothing carries over except the scoreboard.
    pub fn start(&mut self, name: &str) -> Result<RoundId, GameError> {
        if let Some(state) = self.state().filter(|s| !s.is_terminal()) {
            return Err(GameError::RoundInProgress(state));
        }
        let player = PlayerName::new(name)?;
        let round = Round::new(self.ctx.ids.generate_round_id(), player.clone());
        let round_id = round.id();
        self.round = Some(round);

        tracing::debug!(session_id = %self.id, %round_id, %player, "round started");
        self.ctx.events.emit(RoundEvent::Started { round_id, player });
        Ok(round_id)
    }

    /// Accept the player's move.
    ///
    /// `Ignored` means a move was already taken for this round; the round is unchanged.
    pub fn select(&mut self, mv: impl Into<MoveId>) -> Result<Transition, GameError> {
        let round = self.round.as_mut().ok_or(GameError::NoActiveRound)?;
        let mv = mv.into();
        let transition = round.select_player_move(&self.ctx.table, mv.clone())?;
        if transition.is_applied() {
            tracing::debug!(round_id = %round.id(), player_move = %mv, "player move accepted");
            self.ctx.events.emit(RoundEvent::PlayerChose {
                round_id: round.id(),
                player_move: mv,
            });
        }
        Ok(transition)
    }

    /// Drive the round from `AwaitingOpponentMove` to `Reported`.
    ///
    /// An opponent move outside the table is `Inconsistent`; the round is
    /// discarded so the player can start again.
    ///
    /// If this future is dropped during a pause the round stays where it was
    /// and `reveal` can be called again.
    pub async fn reveal(&mut self) -> Result<RoundSummary, GameError> {
        let ctx = Arc::clone(&self.ctx);
        let round = self.round.as_mut().ok_or(GameError::NoActiveRound)?;
        if round.state() != RoundState::AwaitingOpponentMove {
            return Err(GameError::NotReady {
                state: round.state(),
            });
        }
        let round_id = round.id();
        let player_move = round.player_move().cloned().ok_or(GameError::NotReady {
            state: round.state(),
        })?;

        let opponent_move = match round.opponent_move() {
            Some(mv) => mv.clone(),
            None => {
                ctx.pacer.pause(ctx.pacing.opponent_delay()).await;
                let mv = ctx.opponent.pick(&ctx.table);
                if !ctx.table.contains(&mv) {
                    // an unplayable round must not block the next `start`
                    tracing::warn!(
                        %round_id,
                        opponent_move = %mv,
                        "opponent picked a move outside the table"
                    );
                    self.round = None;
                    return Err(GameError::Inconsistent(format!(
                        "opponent picked '{mv}', which is not in the move set"
                    )));
                }
                round.set_opponent_move(&ctx.table, mv.clone())?;
                ctx.events.emit(RoundEvent::OpponentChose {
                    round_id,
                    opponent_move: mv.clone(),
                });
                mv
            }
        };

        ctx.pacer.pause(ctx.pacing.result_delay()).await;
        let outcome = round.resolve(&ctx.resolver)?;
        ctx.events.emit(RoundEvent::Resolved { round_id, outcome });

        let record = round
            .record()
            .ok_or_else(|| GameError::Inconsistent("resolved round has no record".to_string()))?;
        let handle = spawn_report(&ctx, round_id, record);
        round.mark_reported();
        ctx.events.emit(RoundEvent::Reported { round_id });

        let summary = RoundSummary {
            round_id,
            player: round.player().clone(),
            player_move,
            opponent_move,
            outcome,
            finished_at: ctx.clock.now(),
        };

        self.reports.retain(|h| !h.is_finished());
        self.reports.push(handle);
        self.scoreboard.record(outcome);
        tracing::info!(
            %round_id,
            player = %summary.player,
            player_move = %summary.player_move,
            opponent_move = %summary.opponent_move,
            outcome = %outcome.label(),
            "round finished"
        );
        Ok(summary)
    }

    /// `select` + `reveal` in one call.
    ///
    /// A second move for a round already in play is refused with
    /// `RoundInProgress` and changes nothing.
    pub async fn play(&mut self, mv: impl Into<MoveId>) -> Result<RoundSummary, GameError> {
        match self.select(mv)? {
            Transition::Applied => self.reveal().await,
            Transition::Ignored => Err(GameError::RoundInProgress(
                self.state().unwrap_or(RoundState::AwaitingPlayerMove),
            )),
        }
    }

    /// Discard the current round and the player identity.
    ///
    /// Reporter calls already handed off keep running.
    pub fn reset(&mut self) {
        if let Some(round) = self.round.take() {
            tracing::debug!(round_id = %round.id(), state = ?round.state(), "round discarded");
        }
        self.scoreboard = Scoreboard::default();
    }

    /// Wait for every handed-off reporter call to finish.
    pub async fn flush_reports(&mut self) {
        for handle in self.reports.drain(..) {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "reporter task aborted");
            }
        }
    }
}

/// Hand `record` to the reporter on its own task. Failures are logged and
/// surfaced as `ReportFailed`, never returned.
fn spawn_report(ctx: &GameContext, round_id: RoundId, record: GameRecord) -> JoinHandle<()> {
    let reporter = Arc::clone(&ctx.reporter);
    let events = Arc::clone(&ctx.events);
    let timeout = ctx.report_timeout;

    tokio::spawn(async move {
        let result = match tokio::time::timeout(timeout, reporter.report(round_id, &record)).await {
            Ok(result) => result,
            Err(_) => Err(ReportError::TimedOut(timeout)),
        };
        match result {
            Ok(()) => tracing::debug!(%round_id, "game result reported"),
            Err(e) => {
                tracing::warn!(%round_id, error = %e, "failed to report game result");
                events.emit(RoundEvent::ReportFailed {
                    round_id,
                    reason: e.to_string(),
                });
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::builder::{Game, GameBuilder};
    use crate::app::config::PacingConfig;
    use crate::domain::{OutcomeTable, ReportLabel};
    use crate::impls::{
        ChannelEventSink, FixedOpponent, InMemoryReporter, NoPause, ScriptedOpponent, TokioPacer,
    };
    use crate::ports::{OpponentStrategy, ResultReporter};
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::time::Instant;

    fn game_with(reporter: Arc<dyn ResultReporter>, opponent: &str) -> Game {
        GameBuilder::new()
            .reporter(reporter)
            .opponent(Arc::new(FixedOpponent::new(opponent)))
            .pacer(Arc::new(NoPause))
            .build()
            .unwrap()
    }

    fn drain(rx: &mut UnboundedReceiver<RoundEvent>) -> Vec<RoundEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn elapsed_at(
        seen: &[(RoundEvent, Duration)],
        pred: impl Fn(&RoundEvent) -> bool,
    ) -> Duration {
        seen.iter()
            .find(|(e, _)| pred(e))
            .map(|(_, t)| *t)
            .unwrap()
    }

    #[tokio::test]
    async fn ada_wins_with_paper_and_is_reported_once() {
        let reporter = Arc::new(InMemoryReporter::new());
        let game = game_with(reporter.clone(), "rock");
        let mut session = game.session();

        let round_id = session.start("Ada").unwrap();
        let summary = session.play("paper").await.unwrap();
        session.flush_reports().await;

        assert_eq!(summary.round_id, round_id);
        assert_eq!(summary.outcome, Outcome::PlayerWin);
        assert_eq!(summary.opponent_move, MoveId::new("rock"));
        assert_eq!(session.state(), Some(RoundState::Reported));
        assert!(session.round().unwrap().is_completed());

        let records = reporter.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, round_id);
        assert_eq!(
            serde_json::to_value(&records[0].1).unwrap(),
            serde_json::json!({"player": "Ada", "outcome": "Win"})
        );
        assert_eq!(reporter.calls(), 1);
    }

    #[tokio::test]
    async fn failing_reporter_does_not_block_the_round() {
        let reporter = Arc::new(InMemoryReporter::failing("connection refused"));
        let (sink, mut rx) = ChannelEventSink::new();
        let game = GameBuilder::new()
            .reporter(reporter.clone())
            .opponent(Arc::new(FixedOpponent::new("rock")))
            .pacer(Arc::new(NoPause))
            .event_sink(Arc::new(sink))
            .build()
            .unwrap();
        let mut session = game.session();

        session.start("Ada").unwrap();
        let summary = session.play("scissors").await.unwrap();
        session.flush_reports().await;

        assert_eq!(summary.outcome, Outcome::PlayerLose);
        assert_eq!(session.state(), Some(RoundState::Reported));
        assert_eq!(reporter.calls(), 1);
        assert!(
            drain(&mut rx)
                .iter()
                .any(|e| matches!(e, RoundEvent::ReportFailed { reason, .. } if reason.contains("connection refused")))
        );

        // the player can go again straight away
        session.start("Ada").unwrap();
        assert_eq!(session.state(), Some(RoundState::AwaitingPlayerMove));
    }

    #[tokio::test]
    async fn blank_name_produces_no_round() {
        let game = game_with(Arc::new(InMemoryReporter::new()), "rock");
        let mut session = game.session();

        assert_eq!(session.start(""), Err(GameError::InvalidPlayerIdentity));
        assert_eq!(session.start("   "), Err(GameError::InvalidPlayerIdentity));
        assert!(session.round().is_none());
        assert_eq!(session.select("rock"), Err(GameError::NoActiveRound));
    }

    #[tokio::test]
    async fn invalid_move_leaves_round_waiting() {
        let (sink, mut rx) = ChannelEventSink::new();
        let game = GameBuilder::new()
            .pacer(Arc::new(NoPause))
            .reporter(Arc::new(InMemoryReporter::new()))
            .event_sink(Arc::new(sink))
            .build()
            .unwrap();
        let mut session = game.session();
        session.start("Ada").unwrap();
        let before = session.round().cloned();

        assert_eq!(
            session.play("dynamite").await,
            Err(GameError::InvalidMove(MoveId::new("dynamite")))
        );
        assert_eq!(session.round().cloned(), before);
        assert!(
            !drain(&mut rx)
                .iter()
                .any(|e| matches!(e, RoundEvent::PlayerChose { .. }))
        );

        // still playable
        assert!(session.play("rock").await.is_ok());
    }

    #[tokio::test]
    async fn second_selection_is_ignored() {
        let reporter = Arc::new(InMemoryReporter::new());
        let game = game_with(reporter.clone(), "spock");
        let mut session = game.session();
        session.start("Ada").unwrap();

        assert_eq!(session.select("paper"), Ok(Transition::Applied));
        let snapshot = session.round().cloned();
        assert_eq!(session.select("lizard"), Ok(Transition::Ignored));
        assert_eq!(session.round().cloned(), snapshot);

        let summary = session.reveal().await.unwrap();
        assert_eq!(summary.player_move, MoveId::new("paper"));
        assert_eq!(summary.outcome, Outcome::PlayerWin);

        // after the round is over, further input is ignored as well
        assert_eq!(session.select("rock"), Ok(Transition::Ignored));
        assert!(matches!(
            session.play("rock").await,
            Err(GameError::RoundInProgress(RoundState::Reported))
        ));
        session.flush_reports().await;
        assert_eq!(reporter.calls(), 1);
    }

    #[tokio::test]
    async fn reveal_requires_a_player_move() {
        let game = game_with(Arc::new(InMemoryReporter::new()), "rock");
        let mut session = game.session();
        assert_eq!(session.reveal().await, Err(GameError::NoActiveRound));

        session.start("Ada").unwrap();
        assert_eq!(
            session.reveal().await,
            Err(GameError::NotReady {
                state: RoundState::AwaitingPlayerMove
            })
        );
    }

    #[tokio::test]
    async fn cannot_restart_mid_round() {
        let game = game_with(Arc::new(InMemoryReporter::new()), "rock");
        let mut session = game.session();
        session.start("Ada").unwrap();
        session.select("paper").unwrap();

        assert_eq!(
            session.start("Grace"),
            Err(GameError::RoundInProgress(RoundState::AwaitingOpponentMove))
        );
        assert_eq!(session.player().unwrap().as_str(), "Ada");
    }

    #[tokio::test]
    async fn reset_requires_a_new_name() {
        let reporter = Arc::new(InMemoryReporter::new());
        let game = game_with(reporter.clone(), "rock");
        let mut session = game.session();
        let first = session.start("Ada").unwrap();
        session.play("paper").await.unwrap();

        session.reset();
        assert!(session.round().is_none());
        assert!(session.player().is_none());
        assert_eq!(session.scoreboard().played(), 0);
        assert_eq!(session.select("rock"), Err(GameError::NoActiveRound));
        assert_eq!(session.start(" "), Err(GameError::InvalidPlayerIdentity));

        let second = session.start("Grace").unwrap();
        assert_ne!(first, second);
        session.play("rock").await.unwrap();
        session.flush_reports().await;

        let records = reporter.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].1.player.as_str(), "Grace");
        assert_eq!(records[1].1.outcome, ReportLabel::Draw);
    }

    #[tokio::test]
    async fn reset_mid_round_discards_it() {
        let reporter = Arc::new(InMemoryReporter::new());
        let game = game_with(reporter.clone(), "rock");
        let mut session = game.session();
        session.start("Ada").unwrap();
        session.select("paper").unwrap();

        session.reset();
        session.flush_reports().await;
        assert_eq!(reporter.calls(), 0);
        assert!(session.start("Ada").is_ok());
    }

    #[tokio::test]
    async fn scoreboard_tracks_rounds() {
        let opponent = ScriptedOpponent::new(vec![
            MoveId::new("rock"),
            MoveId::new("paper"),
            MoveId::new("scissors"),
        ])
        .unwrap();
        let game = GameBuilder::new()
            .reporter(Arc::new(InMemoryReporter::new()))
            .opponent(Arc::new(opponent))
            .pacer(Arc::new(NoPause))
            .build()
            .unwrap();
        let mut session = game.session();

        for _ in 0..3 {
            session.start("Ada").unwrap();
            session.play("paper").await.unwrap();
        }
        // paper vs rock, paper, scissors
        let board = session.scoreboard();
        assert_eq!((board.wins, board.draws, board.losses), (1, 1, 1));
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let reporter = Arc::new(InMemoryReporter::new());
        let game = game_with(reporter.clone(), "rock");
        let mut ada = game.session();
        let mut grace = game.session();
        assert_ne!(ada.id(), grace.id());

        ada.start("Ada").unwrap();
        grace.start("Grace").unwrap();
        ada.select("paper").unwrap();

        assert_eq!(grace.state(), Some(RoundState::AwaitingPlayerMove));
        let (a, g) = tokio::join!(ada.reveal(), grace.play("scissors"));
        assert_eq!(a.unwrap().outcome, Outcome::PlayerWin);
        assert_eq!(g.unwrap().outcome, Outcome::PlayerLose);

        ada.flush_reports().await;
        grace.flush_reports().await;
        assert_eq!(reporter.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn reveals_are_staged_in_time() {
        let (sink, mut rx) = ChannelEventSink::new();
        let game = GameBuilder::new()
            .reporter(Arc::new(InMemoryReporter::new()))
            .opponent(Arc::new(FixedOpponent::new("rock")))
            .pacer(Arc::new(TokioPacer))
            .event_sink(Arc::new(sink))
            .build()
            .unwrap();
        let mut session = game.session();
        session.start("Ada").unwrap();

        let start = Instant::now();
        let play = tokio::spawn(async move { session.play("paper").await });

        let mut seen = Vec::new();
        while let Some(event) = rx.recv().await {
            let done = matches!(event, RoundEvent::Reported { .. });
            seen.push((event, start.elapsed()));
            if done {
                break;
            }
        }
        play.await.unwrap().unwrap();

        let chose = elapsed_at(&seen, |e| matches!(e, RoundEvent::PlayerChose { .. }));
        let opponent = elapsed_at(&seen, |e| matches!(e, RoundEvent::OpponentChose { .. }));
        let resolved = elapsed_at(&seen, |e| matches!(e, RoundEvent::Resolved { .. }));

        assert_eq!(chose, Duration::ZERO);
        assert!(opponent >= Duration::from_millis(1500) && opponent < Duration::from_millis(1510));
        assert!(resolved >= Duration::from_millis(3000) && resolved < Duration::from_millis(3010));
    }

    #[tokio::test(start_paused = true)]
    async fn instant_pacing_skips_the_waits() {
        let game = GameBuilder::new()
            .reporter(Arc::new(InMemoryReporter::new()))
            .pacer(Arc::new(TokioPacer))
            .pacing(PacingConfig::instant())
            .build()
            .unwrap();
        let mut session = game.session();
        session.start("Ada").unwrap();

        let start = Instant::now();
        session.play("rock").await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    /// Ignores the table it is given.
    struct RogueOpponent;

    impl OpponentStrategy for RogueOpponent {
        fn pick(&self, _table: &OutcomeTable) -> MoveId {
            MoveId::new("dynamite")
        }
    }

    #[tokio::test]
    async fn opponent_move_outside_table_does_not_wedge_the_session() {
        let reporter = Arc::new(InMemoryReporter::new());
        let game = GameBuilder::new()
            .reporter(reporter.clone())
            .opponent(Arc::new(RogueOpponent))
            .pacer(Arc::new(NoPause))
            .build()
            .unwrap();
        let mut session = game.session();
        session.start("Ada").unwrap();

        let err = session.play("rock").await.unwrap_err();
        assert!(matches!(err, GameError::Inconsistent(msg) if msg.contains("dynamite")));
        assert_eq!(session.state(), None);
        assert!(session.start("Ada").is_ok());
        assert_eq!(session.scoreboard().played(), 0);

        session.flush_reports().await;
        assert_eq!(reporter.calls(), 0);
    }

    struct StalledReporter;

    #[async_trait]
    impl ResultReporter for StalledReporter {
        async fn report(&self, _round_id: RoundId, _record: &GameRecord) -> Result<(), ReportError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_reporter_times_out_without_holding_the_round() {
        let (sink, mut rx) = ChannelEventSink::new();
        let mut config = crate::app::config::GameConfig::standard();
        config.report_timeout_ms = 100;
        let game = GameBuilder::new()
            .config(config)
            .reporter(Arc::new(StalledReporter))
            .pacer(Arc::new(NoPause))
            .event_sink(Arc::new(sink))
            .build()
            .unwrap();
        let mut session = game.session();
        session.start("Ada").unwrap();

        let start = Instant::now();
        session.play("rock").await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(session.state(), Some(RoundState::Reported));

        session.flush_reports().await;
        assert!(drain(&mut rx).iter().any(|e| matches!(
            e,
            RoundEvent::ReportFailed { reason, .. } if reason.contains("100ms")
        )));
    }
}
