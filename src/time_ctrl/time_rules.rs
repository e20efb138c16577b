//! Конфигурация тайминга (shot-clock) для стола.
//!
//! Только "правила", без состояния и без привязки к конкретному столу.

use serde::{Deserialize, Serialize};

/// Профиль тайминга.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeProfile {
    /// 30 сек на ход.
    Standard,
    /// 15 сек на ход.
    Turbo,
}

/// Правила тайминга для одного стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRules {
    /// Сколько секунд даётся на решение (каждый ход).
    pub action_timeout_secs: u32,
}

impl Default for TimeRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl TimeRules {
    pub const fn new(action_timeout_secs: u32) -> Self {
        Self {
            action_timeout_secs,
        }
    }

    pub const fn standard() -> Self {
        Self::new(30)
    }

    pub const fn from_profile(profile: TimeProfile) -> Self {
        match profile {
            TimeProfile::Standard => Self::standard(),
            TimeProfile::Turbo => Self::new(15),
        }
    }
}
