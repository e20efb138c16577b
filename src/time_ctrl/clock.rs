//! Логический таймер хода (shot clock) для текущего актёра.
//!
//! Таймер не знает про реальное время: рантайм стола сообщает ему,
//! сколько секунд прошло, и получает решение, истёк ли ход.

use serde::{Deserialize, Serialize};

use crate::domain::SeatIndex;

use super::TimeRules;

/// Состояние таймера текущего хода.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TurnClock {
    /// Чей сейчас ход и его номер (None, если хода нет).
    pub current: Option<(SeatIndex, u64)>,
    /// Сколько секунд ещё осталось на этот ход.
    pub remaining_secs: u32,
}

/// Результат "протекания" времени.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeoutState {
    /// Время ещё не вышло.
    Ongoing,
    /// Время хода `turn` для `seat` вышло, нужен авто-Check/авто-Fold.
    TimedOut { seat: SeatIndex, turn: u64 },
    /// Сейчас нет активного хода.
    NoActiveTurn,
}

impl TurnClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Начать новый ход. Если тот же ход уже идёт, таймер не сбрасывается.
    pub fn start_turn(&mut self, seat: SeatIndex, turn: u64, rules: &TimeRules) {
        if self.current == Some((seat, turn)) {
            return;
        }
        self.current = Some((seat, turn));
        self.remaining_secs = rules.action_timeout_secs;
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.remaining_secs = 0;
    }

    /// Номер хода, на который сейчас идёт таймер.
    pub fn turn(&self) -> Option<u64> {
        self.current.map(|(_, t)| t)
    }

    /// Прошло `delta_secs` секунд. Истёкший ход очищает таймер.
    pub fn elapse(&mut self, delta_secs: u32) -> TimeoutState {
        let Some((seat, turn)) = self.current else {
            return TimeoutState::NoActiveTurn;
        };

        if delta_secs < self.remaining_secs {
            self.remaining_secs -= delta_secs;
            return TimeoutState::Ongoing;
        }

        self.clear();
        TimeoutState::TimedOut { seat, turn }
    }
}
