use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatIndex};

/// Тип действия игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Bet на улице, где ещё нет ставки. Сумма = сколько фишек ставим.
    Bet(Chips),
    /// Raise существующей ставки. Сумма = прибавка сверх текущей ставки.
    Raise(Chips),
    /// All-in – поставить весь стек.
    AllIn,
}

impl fmt::Display for PlayerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerActionKind::Fold => f.write_str("fold"),
            PlayerActionKind::Check => f.write_str("check"),
            PlayerActionKind::Call => f.write_str("call"),
            PlayerActionKind::Bet(a) => write!(f, "bet {a}"),
            PlayerActionKind::Raise(a) => write!(f, "raise +{a}"),
            PlayerActionKind::AllIn => f.write_str("all-in"),
        }
    }
}

/// Конкретное действие игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// В каком месте сидит действующий игрок (0..max_seats-1).
    pub seat: SeatIndex,
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(seat: SeatIndex, kind: PlayerActionKind) -> Self {
        Self { seat, kind }
    }
}
