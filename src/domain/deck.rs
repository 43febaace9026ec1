use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Сколько копий шаблона идёт в колоду «Паука».
pub const COPIES_PER_DECK: usize = 4;

/// Полный размер колоды: 4 × (13 рангов × 2 масти).
pub const SPIDER_DECK_SIZE: usize = COPIES_PER_DECK * ALL_CARDS.len();

/// Шаблон колоды: каждый ранг каждой масти ровно по разу.
/// Неизменяемая константа процесса, копируется при сборке каждой игры.
pub const ALL_CARDS: [Card; 26] = {
    let mut cards = [Card::new(Rank::Ace, Suit::Hearts); 26];
    let mut i = 0;
    while i < 13 {
        cards[2 * i] = Card::new(Rank::ALL[i], Suit::Hearts);
        cards[2 * i + 1] = Card::new(Rank::ALL[i], Suit::Spades);
        i += 1;
    }
    cards
};

/// Колода карт. В домене — просто упорядоченный список карт.
/// Перемешивание делает engine (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Колода «Паука» с двумя мастями: 104 карты, шаблон `ALL_CARDS` четыре раза подряд.
    pub fn spider_104() -> Self {
        let mut cards = Vec::with_capacity(SPIDER_DECK_SIZE);
        for _ in 0..COPIES_PER_DECK {
            cards.extend_from_slice(&ALL_CARDS);
        }
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять одну карту сверху колоды.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Взять n карт сверху.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let at = self.cards.len().saturating_sub(n);
        let mut taken = self.cards.split_off(at);
        taken.reverse();
        taken
    }
}
