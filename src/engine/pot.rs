use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::SeatIndex;
use crate::engine::side_pots::{compute_side_pots, Pot};

/// Учёт вкладов в банк за раздачу: блайнды, анте, колы, беты, рейзы.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotManager {
    contributions: BTreeMap<SeatIndex, Chips>,
}

impl PotManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, seat: SeatIndex, amount: Chips) {
        if amount.is_zero() {
            return;
        }
        *self.contributions.entry(seat).or_insert(Chips::ZERO) += amount;
    }

    /// Сколько всего фишек в банке.
    pub fn total(&self) -> Chips {
        self.contributions.values().sum()
    }

    pub fn contribution(&self, seat: SeatIndex) -> Chips {
        self.contributions.get(&seat).copied().unwrap_or(Chips::ZERO)
    }

    pub fn contributions(&self) -> &BTreeMap<SeatIndex, Chips> {
        &self.contributions
    }

    /// Вернуть неуравненную часть ставки: превышение самого большого вклада
    /// над вторым по величине. Возвращает (seat, сумма), если было что вернуть.
    pub fn return_uncalled(&mut self) -> Option<(SeatIndex, Chips)> {
        let mut sorted: Vec<(SeatIndex, Chips)> =
            self.contributions.iter().map(|(s, c)| (*s, *c)).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));

        let (top_seat, top) = *sorted.first()?;
        let second = sorted.get(1).map(|(_, c)| *c).unwrap_or(Chips::ZERO);
        let excess = top.checked_sub(second)?;
        if excess.is_zero() {
            return None;
        }

        let entry = self.contributions.get_mut(&top_seat)?;
        *entry -= excess;
        if entry.is_zero() {
            self.contributions.remove(&top_seat);
        }
        Some((top_seat, excess))
    }

    /// Основной банк и сайд-поты для текущих вкладов.
    pub fn pots(&self, live: &BTreeSet<SeatIndex>) -> Vec<Pot> {
        compute_side_pots(&self.contributions, live)
    }

    /// Забрать все вклады обратно (для аннулированной раздачи).
    pub fn refund_all(&mut self) -> BTreeMap<SeatIndex, Chips> {
        std::mem::take(&mut self.contributions)
    }

    /// Банк разыгран: вклады больше не нужны.
    pub fn clear(&mut self) {
        self.contributions.clear();
    }
}
