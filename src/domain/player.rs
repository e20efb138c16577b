use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Статус места в контексте текущей раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SeatStatus {
    /// Участвует в раздаче и может действовать.
    Active,
    /// Сфолдил: фишки остаются в банке, права на банк нет.
    Folded,
    /// Поставил весь стек: больше не действует, претендует на банки до своего уровня.
    AllIn,
    /// Сидит за столом, но не участвует в раздачах.
    SittingOut,
}

/// Игрок на конкретном месте за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    pub player_id: PlayerId,
    /// Текущий стек за столом (без фишек, уже внесённых в банк).
    pub stack: Chips,
    /// Сколько внесено на текущей улице.
    pub street_bet: Chips,
    pub status: SeatStatus,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
}

impl Seat {
    pub fn new(player_id: PlayerId, stack: Chips) -> Self {
        Self {
            player_id,
            stack,
            street_bet: Chips::ZERO,
            status: SeatStatus::Active,
            hole_cards: Vec::new(),
        }
    }

    /// Ещё претендует на банк (не сфолдил и не сидит в стороне).
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, SeatStatus::Active | SeatStatus::AllIn)
    }

    /// Может делать ставки на текущей улице.
    pub fn can_act(&self) -> bool {
        self.status == SeatStatus::Active
    }

    pub fn is_sitting_out(&self) -> bool {
        self.status == SeatStatus::SittingOut
    }

    /// Снять со стека не больше `amount`, перевести в ставку улицы.
    /// Возвращает реально внесённую сумму; обнулившийся стек => AllIn.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.street_bet += paid;
        if self.stack.is_zero() && self.status == SeatStatus::Active {
            self.status = SeatStatus::AllIn;
        }
        paid
    }

    /// Мёртвые фишки (анте): уходят в банк, но не засчитываются в ставку улицы.
    pub fn commit_dead(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        if self.stack.is_zero() && self.status == SeatStatus::Active {
            self.status = SeatStatus::AllIn;
        }
        paid
    }

    /// Сброс состояния раздачи перед новой.
    pub fn reset_for_hand(&mut self) {
        self.street_bet = Chips::ZERO;
        self.hole_cards.clear();
        if self.status != SeatStatus::SittingOut {
            self.status = if self.stack.is_zero() {
                SeatStatus::SittingOut
            } else {
                SeatStatus::Active
            };
        }
    }
}
