use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex};

/// Банк (основной или сайд-пот): сумма и места, которые на него претендуют.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub amount: Chips,
    pub eligible_seats: Vec<SeatIndex>,
}

/// Посчитать банки из суммарных вкладов игроков.
///
/// Вход: `contributions[seat]` = сколько фишек внёс игрок за раздачу (все улицы),
/// `live` = места, которые не сфолдили.
/// Выход: банки "от младших к старшим". Первый – основной.
///
/// Каждый уровень вклада образует банк из приращения всех, кто до него дотянулся.
/// Уровень, на который не претендует ни одно живое место, сливается с предыдущим.
pub fn compute_side_pots(
    contributions: &BTreeMap<SeatIndex, Chips>,
    live: &BTreeSet<SeatIndex>,
) -> Vec<Pot> {
    let mut levels: Vec<Chips> = contributions
        .values()
        .copied()
        .filter(|c| !c.is_zero())
        .collect();
    levels.sort();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::new();
    let mut prev_level = Chips::ZERO;
    // Фишки уровня без живых претендентов, если до него ещё не было банка.
    let mut carry = Chips::ZERO;

    for level in levels {
        let layer = level - prev_level;
        let reaching: Vec<SeatIndex> = contributions
            .iter()
            .filter(|(_, c)| **c >= level)
            .map(|(s, _)| *s)
            .collect();
        let amount = layer.times(reaching.len());
        let eligible: Vec<SeatIndex> = reaching.into_iter().filter(|s| live.contains(s)).collect();

        if eligible.is_empty() {
            match pots.last_mut() {
                Some(last) => last.amount += amount,
                None => carry += amount,
            }
        } else {
            pots.push(Pot {
                amount: amount + carry,
                eligible_seats: eligible,
            });
            carry = Chips::ZERO;
        }

        prev_level = level;
    }

    pots
}

/// Разделить банк между победителями поровну. Лишние фишки по одной
/// получают победители в порядке `winners` (по часовой слева от кнопки).
pub fn split_pot(amount: Chips, winners: &[SeatIndex]) -> Vec<(SeatIndex, Chips)> {
    let (share, remainder) = amount.split(winners.len());
    winners
        .iter()
        .enumerate()
        .map(|(i, seat)| {
            let odd = if (i as u64) < remainder.0 { Chips(1) } else { Chips::ZERO };
            (*seat, share + odd)
        })
        .collect()
}
