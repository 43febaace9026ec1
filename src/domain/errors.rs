use thiserror::Error;

use crate::domain::sequence::Sequence;

/// Ошибки доменного уровня: последовательности и колонки.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Последовательность пуста или не является убывающей цепочкой одной масти")]
    InvalidSequence,

    /// Отвергнутая последовательность возвращается вызывающему целиком.
    #[error("Последовательность {rejected} не продолжает нижнюю по масти и рангу")]
    IncompatibleMerge { rejected: Sequence },

    #[error("Нельзя разрезать последовательность длины {len} по индексу {index}")]
    InvalidSplit { index: usize, len: usize },

    #[error("В колонке нет открытых карт")]
    EmptyColumn,
}
