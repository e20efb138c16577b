use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе (от слабой к сильной).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandRank {
    /// Собрать HandRank из категории и рангов тай-брейка (от старшего к младшему).
    /// Недостающие позиции дополняются `Rank::Two`.
    pub fn from_category_and_ranks(category: HandCategory, significant: &[Rank]) -> Self {
        let mut ranks = [Rank::Two; 5];
        for (slot, r) in ranks.iter_mut().zip(significant.iter()) {
            *slot = *r;
        }
        HandRank { category, ranks }
    }

    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// Старший значимый ранг (ранг каре, сета, старшей пары, старшая карта стрита).
    pub fn primary(&self) -> Rank {
        self.ranks[0]
    }

    pub fn is_royal_flush(&self) -> bool {
        self.category == HandCategory::StraightFlush && self.ranks[0] == Rank::Ace
    }
}

/// Человеческое описание руки: "Full house, Sevens full of Twos", "Royal flush".
pub fn describe_hand(rank: HandRank) -> String {
    let r = rank.ranks;
    match rank.category {
        HandCategory::HighCard => format!("High card, {}", r[0].name()),
        HandCategory::OnePair => format!("Pair of {}", r[0].plural_name()),
        HandCategory::TwoPair => {
            format!("Two pair, {} and {}", r[0].plural_name(), r[1].plural_name())
        }
        HandCategory::ThreeOfAKind => format!("Three of a kind, {}", r[0].plural_name()),
        HandCategory::Straight => format!("Straight, {} high", r[0].name()),
        HandCategory::Flush => format!("Flush, {} high", r[0].name()),
        HandCategory::FullHouse => format!(
            "Full house, {} full of {}",
            r[0].plural_name(),
            r[1].plural_name()
        ),
        HandCategory::FourOfAKind => format!("Four of a kind, {}", r[0].plural_name()),
        HandCategory::StraightFlush if rank.is_royal_flush() => "Royal flush".to_string(),
        HandCategory::StraightFlush => format!("Straight flush, {} high", r[0].name()),
    }
}
