//! Движок Texas Hold'em для кэш-столов.
//!
//! Слои:
//! - `domain` – карты, колода, фишки, места, стол;
//! - `eval` – оценка силы рук;
//! - `engine` – раздача: ставки, улицы, банки, шоудаун;
//! - `time_ctrl` – таймер хода;
//! - `table` – актор на стол и реестр столов (tokio);
//! - `api` – команды и ошибки для внешнего клиента;
//! - `infra` – RNG, seed'ы, генерация ID.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod table;
pub mod time_ctrl;

pub use domain::{Card, Chips, HandId, PlayerId, SeatIndex, TableConfig, TableId};
pub use engine::{EngineError, HandEngine, HandStatus, PlayerAction, PlayerActionKind};
pub use table::{TableRegistry, TableEvent};
