use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::RandomSource;
use crate::infra::rng_seed::RngSeed;

/// Размер стандартной колоды.
pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("колода пуста: все 52 карты уже сданы")]
    EmptyDeck,
}

/// Колода на одну раздачу.
///
/// Верх колоды – конец вектора, `draw` снимает карты по одной.
/// Перемешивание происходит один раз при создании; повторно колоду
/// внутри раздачи не тасуют.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    drawn: usize,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards, drawn: 0 }
    }

    /// Полная колода, перемешанная переданным источником случайности.
    pub fn shuffled<R: RandomSource>(rng: &mut R) -> Self {
        let mut deck = Self::standard_52();
        rng.shuffle(&mut deck.cards);
        deck
    }

    /// Детерминированная колода: один и тот же seed даёт один и тот же порядок.
    pub fn new_shuffled(seed: &RngSeed) -> Self {
        let mut rng = seed.to_rng();
        Self::shuffled(&mut rng)
    }

    /// Колода с заранее заданным порядком сдачи (первая карта в списке сдаётся первой).
    /// Удобно для сценариев и реплеев.
    pub fn stacked(order: &[Card]) -> Self {
        let mut cards: Vec<Card> = Self::standard_52()
            .cards
            .into_iter()
            .filter(|c| !order.contains(c))
            .collect();
        cards.extend(order.iter().rev().copied());
        Deck { cards, drawn: 0 }
    }

    /// Сколько карт ещё в колоде.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Сколько карт снято с начала раздачи (включая сожжённые).
    pub fn drawn_count(&self) -> usize {
        self.drawn
    }

    /// Снять верхнюю карту.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        let card = self.cards.pop().ok_or(DeckError::EmptyDeck)?;
        self.drawn += 1;
        Ok(card)
    }

    /// Снять n карт сверху. Либо все n, либо ошибка без частичной сдачи.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if self.cards.len() < n {
            return Err(DeckError::EmptyDeck);
        }
        (0..n).map(|_| self.draw()).collect()
    }

    /// Сжечь карту перед открытием улицы.
    pub fn burn(&mut self) -> Result<(), DeckError> {
        self.draw().map(|_| ())
    }
}
