use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::errors::DomainError;

/// Длина полной последовательности: от короля до туза.
pub const COMPLETE_RUN_LEN: usize = 13;

/// Открытая последовательность карт одной масти, убывающая строго на единицу.
///
/// `cards[0]` — внешняя (старшая) карта, последняя — самая новая (младшая).
/// Пустой последовательность не бывает, поэтому `first_card`/`last_card` всегда определены.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Sequence {
    cards: Vec<Card>,
}

impl Sequence {
    /// Собрать последовательность из списка карт с проверкой инварианта.
    pub fn new(cards: Vec<Card>) -> Result<Self, DomainError> {
        if cards.is_empty() {
            return Err(DomainError::InvalidSequence);
        }
        if !cards.windows(2).all(|w| w[1].precedes(&w[0], true)) {
            return Err(DomainError::InvalidSequence);
        }
        Ok(Self { cards })
    }

    /// Одиночная карта — всегда корректная последовательность.
    pub fn single(card: Card) -> Self {
        Self { cards: vec![card] }
    }

    pub fn first_card(&self) -> &Card {
        &self.cards[0]
    }

    pub fn last_card(&self) -> &Card {
        &self.cards[self.cards.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Всегда `false`; есть для симметрии с `len`.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Полная масть из 13 карт.
    pub fn is_complete(&self) -> bool {
        self.cards.len() == COMPLETE_RUN_LEN
    }

    /// Можно ли приставить эту последовательность внешним концом к младшей карте `other`.
    pub fn fits_to(&self, other: &Sequence, match_suit: bool) -> bool {
        self.first_card().precedes(other.last_card(), match_suit)
    }

    /// Дописать `other` после младшей карты. Слияние всегда требует той же масти.
    /// При отказе `other` возвращается внутри ошибки без изменений.
    pub fn merge(&mut self, other: Sequence) -> Result<(), DomainError> {
        self.try_merge(other)
            .map_err(|rejected| DomainError::IncompatibleMerge { rejected })
    }

    /// То же, что `merge`, но при отказе отдаёт саму `other`.
    pub fn try_merge(&mut self, other: Sequence) -> Result<(), Sequence> {
        if !other.fits_to(self, true) {
            return Err(other);
        }
        self.cards.extend(other.cards);
        Ok(())
    }

    /// Отрезать хвост `cards[index..]` в новую последовательность.
    /// Допустимы только индексы `0 < index < len`: обе половины должны быть непустыми.
    pub fn split(&mut self, index: usize) -> Result<Sequence, DomainError> {
        let len = self.cards.len();
        if index == 0 || index >= len {
            return Err(DomainError::InvalidSplit { index, len });
        }
        Ok(Sequence {
            cards: self.cards.split_off(index),
        })
    }
}

impl TryFrom<Vec<Card>> for Sequence {
    type Error = DomainError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Sequence::new(cards)
    }
}

impl From<Sequence> for Vec<Card> {
    fn from(seq: Sequence) -> Self {
        seq.cards
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

impl fmt::Display for Sequence {
    /// Формат вида `9s-8s-7s`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
