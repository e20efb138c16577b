use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::{Seat, SeatStatus};
use crate::domain::TableId;
use crate::time_ctrl::TimeRules;

/// Индекс места за столом (0..max_seats-1).
pub type SeatIndex = u8;

/// Максимум мест за одним столом.
pub const MAX_SEATS: u8 = 10;

/// Ошибки конфигурации стола.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("количество мест должно быть от 2 до {MAX_SEATS}, получено {0}")]
    BadSeatCount(u8),

    #[error("блайнды должны быть > 0 и SB <= BB (SB={small}, BB={big})")]
    BadBlinds { small: Chips, big: Chips },

    #[error("анте ({ante}) не может превышать большой блайнд ({big})")]
    AnteTooLarge { ante: Chips, big: Chips },

    #[error("таймаут хода должен быть > 0 секунд")]
    ZeroTimeout,

    #[error("не удалось разобрать конфиг: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Стейки стола (SB/BB/ante). Анте 0 = без анте.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
    #[serde(default)]
    pub ante: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips, ante: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
            ante,
        }
    }
}

/// Конфиг стола: сколько мест, какие блайнды, сколько времени на ход.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    /// Максимальное количество мест за столом (2–10).
    pub max_seats: u8,
    pub stakes: TableStakes,
    #[serde(default)]
    pub time: TimeRules,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_seats: 6,
            stakes: TableStakes::new(Chips(50), Chips(100), Chips::ZERO),
            time: TimeRules::standard(),
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_SEATS).contains(&self.max_seats) {
            return Err(ConfigError::BadSeatCount(self.max_seats));
        }
        let s = &self.stakes;
        if s.small_blind.is_zero() || s.big_blind.is_zero() || s.small_blind > s.big_blind {
            return Err(ConfigError::BadBlinds {
                small: s.small_blind,
                big: s.big_blind,
            });
        }
        if s.ante > s.big_blind {
            return Err(ConfigError::AnteTooLarge {
                ante: s.ante,
                big: s.big_blind,
            });
        }
        if self.time.action_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Загрузить и провалидировать конфиг из JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Основное состояние стола. Живёт между раздачами; из раздачи в раздачу
/// переходят только стеки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub config: TableConfig,

    /// Места за столом: индекс вектора = SeatIndex. None – место пустое.
    pub seats: Vec<Option<Seat>>,

    /// Общие карты борда (0–5 карт).
    pub board: Vec<Card>,

    /// Позиция кнопки или None, если раздач ещё не было.
    pub dealer_button: Option<SeatIndex>,

    pub street: Street,

    pub hand_in_progress: bool,
}

impl Table {
    pub fn new(id: TableId, name: impl Into<String>, config: TableConfig) -> Self {
        let seats = vec![None; config.max_seats as usize];
        Self {
            id,
            name: name.into(),
            config,
            seats,
            board: Vec::new(),
            dealer_button: None,
            street: Street::Preflop,
            hand_in_progress: false,
        }
    }

    pub fn max_seats(&self) -> u8 {
        self.config.max_seats
    }

    pub fn seat(&self, index: SeatIndex) -> Option<&Seat> {
        self.seats.get(index as usize).and_then(|s| s.as_ref())
    }

    pub fn seat_mut(&mut self, index: SeatIndex) -> Option<&mut Seat> {
        self.seats.get_mut(index as usize).and_then(|s| s.as_mut())
    }

    pub fn seated_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    /// Сколько мест готовы играть следующую раздачу (есть фишки, не sit-out).
    pub fn ready_count(&self) -> usize {
        self.seats
            .iter()
            .flatten()
            .filter(|p| !p.is_sitting_out() && !p.stack.is_zero())
            .count()
    }

    pub fn is_seat_empty(&self, index: SeatIndex) -> bool {
        self.seat(index).is_none()
    }

    /// Сумма всех стеков за столом.
    pub fn total_stacks(&self) -> Chips {
        self.seats.iter().flatten().map(|p| p.stack).sum()
    }

    /// Стеки по местам (то, что переживает раздачу).
    pub fn stacks(&self) -> Vec<(SeatIndex, Chips)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i as SeatIndex, p.stack)))
            .collect()
    }

    /// Вернуть игрока в игру (если у него есть фишки).
    pub fn sit_in(&mut self, index: SeatIndex) -> bool {
        match self.seat_mut(index) {
            Some(p) if !p.stack.is_zero() => {
                if p.status == SeatStatus::SittingOut {
                    p.status = SeatStatus::Active;
                }
                true
            }
            _ => false,
        }
    }
}
