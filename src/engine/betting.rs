use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::SeatIndex;

/// Состояние раунда торговли снаружи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundState {
    /// Ждём действия от этого места.
    AwaitingAction(SeatIndex),
    /// Все, кто может действовать, уравняли ставку.
    RoundComplete,
    /// Остался один несфолдивший игрок.
    HandEndedByFold,
}

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Текущая целевая ставка, до которой должны дотянуться игроки (BB, bet, raise).
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза (последний полный bet/raise).
    pub min_raise: Chips,
    /// Seat последнего агрессора (полный bet/raise).
    pub last_aggressor: Option<SeatIndex>,
    /// Улица, к которой относится этот раунд.
    pub street: Street,
    /// Очередь ходящих по кругу: первый элемент – текущий актёр.
    pub to_act: Vec<SeatIndex>,
    /// На каком уровне ставки место действовало последний раз.
    pub acted_at: BTreeMap<SeatIndex, Chips>,
}

impl BettingState {
    pub fn new(street: Street, current_bet: Chips, min_raise: Chips, to_act: Vec<SeatIndex>) -> Self {
        Self {
            current_bet,
            min_raise,
            last_aggressor: None,
            street,
            to_act,
            acted_at: BTreeMap::new(),
        }
    }

    pub fn current_actor(&self) -> Option<SeatIndex> {
        self.to_act.first().copied()
    }

    /// Место сделало ход на текущем уровне ставки.
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
        self.acted_at.insert(seat, self.current_bet);
    }

    /// Может ли место повышать: ещё не действовало, либо ставка с его
    /// последнего хода выросла хотя бы на полный рейз.
    pub fn can_reopen(&self, seat: SeatIndex) -> bool {
        match self.acted_at.get(&seat) {
            None => true,
            Some(level) => self.current_bet.saturating_sub(*level) >= self.min_raise,
        }
    }

    /// Полный bet/raise: новый уровень, новый минимальный рейз, новая очередь.
    pub fn on_raise(&mut self, seat: SeatIndex, new_bet: Chips, raise_size: Chips, new_to_act: Vec<SeatIndex>) {
        self.current_bet = new_bet;
        self.min_raise = raise_size;
        self.last_aggressor = Some(seat);
        self.to_act = new_to_act;
        self.acted_at.insert(seat, new_bet);
    }

    /// All-in меньше полного рейза: уровень растёт, минимальный рейз нет.
    pub fn on_short_all_in(&mut self, seat: SeatIndex, new_bet: Chips, new_to_act: Vec<SeatIndex>) {
        self.current_bet = new_bet;
        self.to_act = new_to_act;
        self.acted_at.insert(seat, new_bet);
    }
}
