//! Domain model (moves, outcome table, resolver, rounds, records, ...).
//!
//! このモジュールは純粋なデータとロジックのみ:
//! - 時間待ち・乱数・I/O は ports の向こう側
//! - すべての型は単体でテスト可能

pub mod display;
pub mod errors;
pub mod events;
pub mod ids;
pub mod moves;
pub mod outcome;
pub mod player;
pub mod record;
pub mod resolver;
pub mod round;
pub mod state;
pub mod table;

pub use self::display::{DisplayCatalog, MoveDisplay};
pub use self::errors::{ConfigError, GameError, ReportError};
pub use self::events::RoundEvent;
pub use self::ids::{RoundId, SessionId};
pub use self::moves::{MoveId, MoveSpec};
pub use self::outcome::{Outcome, ReportLabel};
pub use self::player::PlayerName;
pub use self::record::{GameRecord, StoredRecord};
pub use self::resolver::Resolver;
pub use self::round::{Round, Transition};
pub use self::state::RoundState;
pub use self::table::OutcomeTable;
