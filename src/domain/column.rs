use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::card::Card;
use crate::domain::errors::DomainError;
use crate::domain::sequence::Sequence;

/// Одна из десяти колонок: открытые последовательности плюс закрытый резерв.
///
/// Меняется только нижняя (последняя в списке) последовательность.
/// Закрытые карты снимаются с конца `face_down`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    sequences: Vec<Sequence>,
    face_down: Vec<Card>,
}

/// Что произошло с колонкой после раздачи ей одной карты.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DealtCard {
    /// Карта продолжила нижнюю последовательность.
    Merged,
    /// Карта легла отдельной последовательностью.
    Appended,
    /// Карта замкнула полную масть, и та ушла из игры.
    Completed,
}

impl Column {
    /// Стартовая колонка: закрытые карты и одна открытая поверх них.
    pub fn new(face_up: Card, face_down: Vec<Card>) -> Self {
        Self {
            sequences: vec![Sequence::single(face_up)],
            face_down,
        }
    }

    /// Колонка из готовых частей (расклады для тестов и сценариев).
    pub fn from_parts(sequences: Vec<Sequence>, face_down: Vec<Card>) -> Self {
        Self { sequences, face_down }
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    pub fn last_sequence(&self) -> Result<&Sequence, DomainError> {
        self.sequences.last().ok_or(DomainError::EmptyColumn)
    }

    fn last_sequence_mut(&mut self) -> Result<&mut Sequence, DomainError> {
        self.sequences.last_mut().ok_or(DomainError::EmptyColumn)
    }

    pub fn append_sequence(&mut self, seq: Sequence) {
        self.sequences.push(seq);
    }

    pub fn remove_last_sequence(&mut self) -> Result<Sequence, DomainError> {
        self.sequences.pop().ok_or(DomainError::EmptyColumn)
    }

    /// Слить `seq` с нижней последовательностью той же масти.
    /// При отказе (в том числе на пустой колонке) `seq` возвращается как есть; колонка не меняется.
    pub fn merge_into_last(&mut self, seq: Sequence) -> Result<(), Sequence> {
        match self.sequences.last_mut() {
            Some(last) => last.try_merge(seq),
            None => Err(seq),
        }
    }

    /// Слить с нижней, а если не выходит — положить отдельной последовательностью.
    /// Возвращает `true`, если произошло слияние.
    pub fn merge_or_append(&mut self, seq: Sequence) -> bool {
        match self.merge_into_last(seq) {
            Ok(()) => true,
            Err(rejected) => {
                self.append_sequence(rejected);
                false
            }
        }
    }

    /// Снять всю нижнюю последовательность.
    pub fn lift_whole(&mut self) -> Result<Sequence, DomainError> {
        self.remove_last_sequence()
    }

    /// Отрезать хвост нижней последовательности начиная с `index`.
    pub fn lift_suffix(&mut self, index: usize) -> Result<Sequence, DomainError> {
        self.last_sequence_mut()?.split(index)
    }

    /// Открыть одну закрытую карту, если открытых не осталось.
    /// Единственный способ перевернуть закрытую карту.
    pub fn reveal_if_empty(&mut self) -> bool {
        if !self.is_empty() {
            return false;
        }
        match self.face_down.pop() {
            Some(card) => {
                debug!(%card, remaining = self.face_down.len(), "revealed face-down card");
                self.sequences.push(Sequence::single(card));
                true
            }
            None => false,
        }
    }

    /// Убрать нижнюю последовательность, если она полная, и при необходимости открыть карту.
    /// Возвращает `true`, если полная масть ушла из игры.
    pub fn collapse_if_complete(&mut self) -> bool {
        if !self.sequences.last().is_some_and(Sequence::is_complete) {
            return false;
        }
        self.sequences.pop();
        debug!("complete run cleared from column");
        self.reveal_if_empty();
        true
    }

    /// Раздать колонке одну карту из прикупа.
    pub fn deal_card(&mut self, card: Card) -> DealtCard {
        if !self.merge_or_append(Sequence::single(card)) {
            return DealtCard::Appended;
        }
        if self.collapse_if_complete() {
            DealtCard::Completed
        } else {
            DealtCard::Merged
        }
    }

    pub fn num_face_down_cards(&self) -> usize {
        self.face_down.len()
    }

    pub fn num_face_up_cards(&self) -> usize {
        self.sequences.iter().map(Sequence::len).sum()
    }

    /// Все карты колонки: открытые и закрытые.
    pub fn total_cards(&self) -> usize {
        self.num_face_up_cards() + self.num_face_down_cards()
    }

    /// Открытые карты по порядку колонки. Только чтение; можно вызывать сколько угодно раз.
    pub fn face_up_cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.sequences.iter().flat_map(Sequence::iter)
    }
}

impl fmt::Display for Column {
    /// Формат вида `XX XX 9s-8s 7h`: закрытые карты, затем открытые последовательности.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for _ in 0..self.face_down.len() {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str("XX")?;
            first = false;
        }
        for seq in &self.sequences {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{seq}")?;
            first = false;
        }
        Ok(())
    }
}
