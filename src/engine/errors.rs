use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::deck::DeckError;
use crate::domain::{Chips, SeatIndex};
use crate::eval::EvalError;

/// Почему действие отклонено. Состояние раздачи при этом не меняется.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Error)]
pub enum IllegalActionReason {
    #[error("сейчас не ход этого места")]
    NotYourTurn,

    #[error("место не участвует в раздаче")]
    SeatNotInHand,

    #[error("check невозможен – есть ставка, которую нужно уравнять")]
    CannotCheck,

    #[error("call невозможен – нечего уравнивать")]
    NothingToCall,

    #[error("bet невозможен – на улице уже есть ставка")]
    BetNotAllowed,

    #[error("raise невозможен – на улице ещё нет ставки")]
    RaiseNotAllowed,

    #[error("сумма меньше минимальной")]
    BelowMinimum,

    #[error("сумма больше стека")]
    ExceedsStack,

    #[error("торговля не переоткрыта: можно только call или fold")]
    BettingNotReopened,

    #[error("нулевая сумма")]
    ZeroAmount,
}

impl IllegalActionReason {
    /// Стабильный код причины для внешнего интерфейса.
    pub fn code(&self) -> &'static str {
        match self {
            IllegalActionReason::NotYourTurn => "NOT_YOUR_TURN",
            IllegalActionReason::SeatNotInHand => "SEAT_NOT_IN_HAND",
            IllegalActionReason::CannotCheck => "CANNOT_CHECK",
            IllegalActionReason::NothingToCall => "NOTHING_TO_CALL",
            IllegalActionReason::BetNotAllowed => "BET_NOT_ALLOWED",
            IllegalActionReason::RaiseNotAllowed => "RAISE_NOT_ALLOWED",
            IllegalActionReason::BelowMinimum => "BELOW_MINIMUM",
            IllegalActionReason::ExceedsStack => "EXCEEDS_STACK",
            IllegalActionReason::BettingNotReopened => "BETTING_NOT_REOPENED",
            IllegalActionReason::ZeroAmount => "ZERO_AMOUNT",
        }
    }
}

/// Ошибки движка покера.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("недопустимое действие: {0}")]
    IllegalAction(IllegalActionReason),

    #[error("колода пуста")]
    EmptyDeck,

    #[error("недостаточно игроков с фишками для раздачи")]
    InsufficientSeats,

    #[error("раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("раздача не активна")]
    NoActiveHand,

    #[error("место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("место {0} уже занято")]
    SeatOccupied(SeatIndex),

    #[error("нарушено сохранение фишек: ожидалось {expected}, фактически {actual}")]
    ChipConservation { expected: Chips, actual: Chips },

    #[error("ошибка оценки руки: {0}")]
    Eval(#[from] EvalError),

    #[error("внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl From<IllegalActionReason> for EngineError {
    fn from(reason: IllegalActionReason) -> Self {
        EngineError::IllegalAction(reason)
    }
}

impl From<DeckError> for EngineError {
    fn from(e: DeckError) -> Self {
        match e {
            DeckError::EmptyDeck => EngineError::EmptyDeck,
        }
    }
}

impl EngineError {
    /// Ошибки, после которых раздачу нельзя продолжать: её аннулируют.
    pub fn voids_hand(&self) -> bool {
        matches!(
            self,
            EngineError::EmptyDeck
                | EngineError::ChipConservation { .. }
                | EngineError::Eval(_)
                | EngineError::Internal(_)
        )
    }
}
