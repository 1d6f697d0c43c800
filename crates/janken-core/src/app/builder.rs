//! GameBuilder - ゲームの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）: 壊れた手の表ではラウンドを始めない
//! - 未指定のポートは本番用のデフォルトで埋める

use std::sync::Arc;
use std::time::Duration;

use crate::app::config::{GameConfig, PacingConfig};
use crate::app::session::Session;
use crate::domain::{ConfigError, DisplayCatalog, MoveId, OutcomeTable, Resolver};
use crate::impls::{LogReporter, NoopEventSink, TokioPacer, UniformOpponent};
use crate::ports::{
    Clock, EventSink, IdGenerator, OpponentStrategy, Pacer, ResultReporter, SystemClock,
    UlidGenerator,
};

/// GameBuilder は Game を構築
///
/// # 使用例
/// ```ignore
/// let game = GameBuilder::new()
///     .config(GameConfig::from_path("game.json").await?)
///     .reporter(Arc::new(JsonLinesReporter::new("results.jsonl", clock)))
///     .build()?;
/// let mut session = game.session();
/// ```
///
/// # デフォルト
/// - config: GameConfig::standard()
/// - reporter: LogReporter
/// - opponent: UniformOpponent
/// - pacer: TokioPacer
/// - event_sink: NoopEventSink
/// - clock: SystemClock
pub struct GameBuilder {
    config: GameConfig,
    reporter: Option<Arc<dyn ResultReporter>>,
    opponent: Option<Arc<dyn OpponentStrategy>>,
    pacer: Option<Arc<dyn Pacer>>,
    events: Option<Arc<dyn EventSink>>,
    clock: Option<Arc<dyn Clock>>,
}

/// BuildError はゲーム構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("opponent plays '{0}', which is not part of the configured move set")]
    OpponentMoveOutsideTable(MoveId),
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::standard(),
            reporter: None,
            opponent: None,
            pacer: None,
            events: None,
            clock: None,
        }
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn pacing(mut self, pacing: PacingConfig) -> Self {
        self.config.pacing = pacing;
        self
    }

    pub fn reporter(mut self, reporter: Arc<dyn ResultReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn opponent(mut self, opponent: Arc<dyn OpponentStrategy>) -> Self {
        self.opponent = Some(opponent);
        self
    }

    pub fn pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = Some(pacer);
        self
    }

    pub fn event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validate the configuration and wire the ports.
    ///
    /// # 検証
    /// - 手の表が無反射・反対称・全域であること
    /// - 違反があれば BuildError::InvalidConfiguration
    /// - 固定の手を持つ相手（FixedOpponent など）はその手が表にあること
    pub fn build(self) -> Result<Game, BuildError> {
        let (table, display) = self.config.parts()?;
        let table = Arc::new(table);
        let opponent = self.opponent.unwrap_or_else(|| Arc::new(UniformOpponent));
        if let Some(mv) = opponent.fixed_moves().iter().find(|mv| !table.contains(mv)) {
            return Err(BuildError::OpponentMoveOutsideTable(mv.clone()));
        }
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        tracing::debug!(moves = table.len(), "outcome table validated");

        let ctx = GameContext {
            resolver: Resolver::new(Arc::clone(&table)),
            table,
            display,
            pacing: self.config.pacing,
            report_timeout: self.config.report_timeout(),
            reporter: self.reporter.unwrap_or_else(|| Arc::new(LogReporter)),
            opponent,
            pacer: self.pacer.unwrap_or_else(|| Arc::new(TokioPacer)),
            events: self.events.unwrap_or_else(|| Arc::new(NoopEventSink)),
            ids: Arc::new(UlidGenerator::new(Arc::clone(&clock))),
            clock,
        };
        Ok(Game {
            ctx: Arc::new(ctx),
        })
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable wiring shared by every session of a game.
pub(crate) struct GameContext {
    pub(crate) table: Arc<OutcomeTable>,
    pub(crate) resolver: Resolver,
    pub(crate) display: DisplayCatalog,
    pub(crate) pacing: PacingConfig,
    pub(crate) report_timeout: Duration,
    pub(crate) reporter: Arc<dyn ResultReporter>,
    pub(crate) opponent: Arc<dyn OpponentStrategy>,
    pub(crate) pacer: Arc<dyn Pacer>,
    pub(crate) events: Arc<dyn EventSink>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) ids: Arc<dyn IdGenerator>,
}

/// A validated, ready-to-play game.
///
/// Cheap to clone; sessions created from it share nothing mutable.
#[derive(Clone)]
pub struct Game {
    ctx: Arc<GameContext>,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    /// Open an independent play session.
    pub fn session(&self) -> Session {
        Session::new(Arc::clone(&self.ctx))
    }

    pub fn table(&self) -> &OutcomeTable {
        &self.ctx.table
    }

    pub fn resolver(&self) -> &Resolver {
        &self.ctx.resolver
    }

    pub fn display(&self) -> &DisplayCatalog {
        &self.ctx.display
    }

    pub fn pacing(&self) -> PacingConfig {
        self.ctx.pacing
    }
}
