use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandRank, Street};
use crate::domain::{HandId, PlayerId, SeatIndex, TableId};
use crate::engine::actions::PlayerActionKind;

/// Какой блайнд поставлен.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlindKind {
    Ante,
    Small,
    Big,
}

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась. `seats` – участники и их стеки до блайндов.
    HandStarted {
        table_id: TableId,
        hand_id: HandId,
        seats: Vec<(SeatIndex, PlayerId, Chips)>,
        button: SeatIndex,
        small_blind: Chips,
        big_blind: Chips,
        ante: Chips,
    },

    BlindPosted {
        seat: SeatIndex,
        kind: BlindKind,
        amount: Chips,
    },

    /// Игрок получил карманные карты (приватное событие).
    HoleCardsDealt {
        seat: SeatIndex,
        cards: Vec<Card>,
    },

    /// Открыты общие карты улицы.
    StreetRevealed {
        street: Street,
        cards: Vec<Card>,
    },

    /// Действие игрока. `amount` – сколько фишек внесено этим действием.
    ActionApplied {
        seat: SeatIndex,
        kind: PlayerActionKind,
        amount: Chips,
        pot_total: Chips,
        timed_out: bool,
    },

    RoundComplete {
        street: Street,
    },

    /// Неуравненная часть ставки вернулась в стек.
    UncalledBetReturned {
        seat: SeatIndex,
        amount: Chips,
    },

    /// Шоудаун – открытие карт.
    Showdown {
        seat: SeatIndex,
        cards: Vec<Card>,
        best_five: Vec<Card>,
        rank: HandRank,
        description: String,
    },

    /// Выплата одного банка. `winners` – кто и сколько получил.
    PotAwarded {
        pot_index: usize,
        amount: Chips,
        winners: Vec<(SeatIndex, Chips)>,
    },

    /// Раздача аннулирована, стеки возвращены к началу раздачи.
    HandVoided {
        reason: String,
    },

    /// Раздача завершена; стеки после неё.
    HandEnded {
        hand_id: HandId,
        stacks: Vec<(SeatIndex, Chips)>,
    },
}

impl HandEventKind {
    /// Событие видно только владельцу места.
    pub fn private_to(&self) -> Option<SeatIndex> {
        match self {
            HandEventKind::HoleCardsDealt { seat, .. } => Some(*seat),
            _ => None,
        }
    }
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    /// События начиная с номера `from` (для рассылки новых событий).
    pub fn since(&self, from: usize) -> &[HandEvent] {
        self.events.get(from..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
