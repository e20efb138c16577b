use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank};
use crate::domain::hand::HandRank;

use super::hand_rank::HandCategory;
use super::lookup_tables::{detect_straight, rank_to_bit, straight_ranks, RankMask};

/// Ошибки оценки руки.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("для оценки нужно минимум 5 карт, получено {0}")]
    NotEnoughCards(usize),

    #[error("для оценки допускается максимум 7 карт, получено {0}")]
    TooManyCards(usize),

    #[error("карта {0} встречается дважды")]
    DuplicateCard(Card),
}

/// Результат оценки: сила руки + пять карт, которые её составляют.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluatedHand {
    pub rank: HandRank,
    /// Лучшие 5 карт, от старшей к младшей.
    pub best_five: [Card; 5],
}

/// Вычислить лучшую 5-карточную руку из hole + board.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Result<EvaluatedHand, EvalError> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    evaluate_hand(&all_cards)
}

/// Оценить 5–7 карт: перебираем все C(n,5) комбинаций и выбираем лучшую.
pub fn evaluate_hand(cards: &[Card]) -> Result<EvaluatedHand, EvalError> {
    let n = cards.len();
    if n < 5 {
        return Err(EvalError::NotEnoughCards(n));
    }
    if n > 7 {
        return Err(EvalError::TooManyCards(n));
    }
    for (i, c) in cards.iter().enumerate() {
        if cards[i + 1..].contains(c) {
            return Err(EvalError::DuplicateCard(*c));
        }
    }

    let mut best: Option<EvaluatedHand> = None;

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let mut five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let rank = evaluate_5card_hand(&five);
                        if best.map_or(true, |b| rank > b.rank) {
                            five.sort_by(|x, y| y.cmp(x));
                            best = Some(EvaluatedHand {
                                rank,
                                best_five: five,
                            });
                        }
                    }
                }
            }
        }
    }

    // n >= 5, значит хотя бы одна комбинация есть
    best.ok_or(EvalError::NotEnoughCards(n))
}

/// Оценка строго 5-карточной комбинации.
fn evaluate_5card_hand(cards: &[Card; 5]) -> HandRank {
    let mut suit_counts = [0u8; 4];
    let mut rank_counts = [0u8; 15]; // используем индексы 2..14
    let mut rank_mask: RankMask = 0;

    for card in cards {
        suit_counts[card.suit.index()] += 1;
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = suit_counts.iter().any(|&c| c == 5);
    let straight_high = detect_straight(rank_mask);

    // (ранг, количество), сначала по количеству, затем по рангу, по убыванию
    let mut groups: Vec<(Rank, u8)> = Rank::ALL
        .iter()
        .rev()
        .filter_map(|&r| {
            let c = rank_counts[r.value() as usize];
            (c > 0).then_some((r, c))
        })
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    let pattern: Vec<u8> = groups.iter().map(|g| g.1).collect();
    let ordered: Vec<Rank> = groups.iter().map(|g| g.0).collect();

    if let (true, Some(high)) = (is_flush, straight_high) {
        return HandRank::from_category_and_ranks(HandCategory::StraightFlush, &straight_ranks(high));
    }

    let category = match pattern.as_slice() {
        [4, 1] => HandCategory::FourOfAKind,
        [3, 2] => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        _ if straight_high.is_some() => HandCategory::Straight,
        [3, 1, 1] => HandCategory::ThreeOfAKind,
        [2, 2, 1] => HandCategory::TwoPair,
        [2, 1, 1, 1] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    match (category, straight_high) {
        (HandCategory::Straight, Some(high)) => {
            HandRank::from_category_and_ranks(category, &straight_ranks(high))
        }
        _ => HandRank::from_category_and_ranks(category, &ordered),
    }
}
