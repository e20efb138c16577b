use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};
use crate::domain::chips::Chips;
use crate::domain::{HandId, PlayerId, SeatIndex, TableId};
use crate::eval::hand_rank::HandCategory;

/// Улица раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Следующая улица и сколько карт на ней открывается.
    pub fn next(self) -> Option<(Street, usize)> {
        match self {
            Street::Preflop => Some((Street::Flop, 3)),
            Street::Flop => Some((Street::Turn, 1)),
            Street::Turn => Some((Street::River, 1)),
            Street::River | Street::Showdown => None,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        };
        f.write_str(s)
    }
}

/// Сила руки: категория + ранги для тай-брейка (от старшего к младшему).
///
/// Порядок полностью задаётся derive(Ord): сначала категория, затем ранги
/// лексикографически. Неиспользуемые позиции заполнены `Rank::Two`
/// одинаково для всех рук одной категории, поэтому на сравнение не влияют.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank {
    pub category: HandCategory,
    pub ranks: [Rank; 5],
}

/// Результат конкретного места в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandResult {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    /// Итоговая рука (если дошёл до шоудауна).
    pub rank: Option<HandRank>,
    /// Сколько фишек получил из банков.
    pub won: Chips,
    /// Стек после раздачи.
    pub final_stack: Chips,
    pub is_winner: bool,
}

/// Как закончилась раздача.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandOutcome {
    /// Все, кроме одного, сфолдили.
    Uncontested,
    /// Дошли до вскрытия.
    Showdown,
    /// Раздача аннулирована, стеки возвращены к началу раздачи.
    Voided { reason: String },
}

/// Краткое описание завершённой раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub table_id: TableId,
    pub street_reached: Street,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub outcome: HandOutcome,
    pub results: Vec<PlayerHandResult>,
}
