//! App - アプリケーション層
//!
//! ports を組み合わせてラウンドの進行を実装します。
//!
//! # 主要コンポーネント
//! - **GameBuilder**: 設定の検証とポートのワイヤリング
//! - **Game**: 検証済みの表と共有ポート（Session の生成元）
//! - **Session**: 1 人のプレイヤーのラウンド進行
//! - **GameConfig**: 手の表・表示・演出時間の設定

pub mod builder;
pub mod config;
pub mod session;
pub mod stats;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, Game, GameBuilder};
pub use self::config::{GameConfig, MoveConfig, PacingConfig};
pub use self::session::{RoundSummary, Session};
pub use self::stats::Scoreboard;
