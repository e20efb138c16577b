//! Покерный движок: ставки, переход улиц, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `HandEngine`
//! Основные операции:
//!   - `start_hand` – запустить новую раздачу
//!   - `apply_action` – применить действие игрока
//!   - `apply_timeout` – авто-действие по истечении хода
//!   - `void_hand` – аннулировать раздачу и вернуть стеки

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod side_pots;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use betting::{BettingState, RoundState};
pub use errors::{EngineError, IllegalActionReason};
pub use game_loop::{
    apply_action, apply_timeout, start_hand, start_hand_with_deck, void_hand, HandEngine, HandStatus,
};
pub use hand_history::{BlindKind, HandEvent, HandEventKind, HandHistory};
pub use pot::PotManager;
pub use side_pots::{compute_side_pots, split_pot, Pot};
pub use validation::{legal_actions, validate_action, LegalActions};

/// Источник случайности для тасовки колоды.
/// Реализации – в infra (системный и детерминированный).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
