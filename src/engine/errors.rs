use crate::domain::{ColumnIndex, DomainError};

use thiserror::Error;

/// Ошибки движка «Паука». После любой из них игра остаётся в согласованном состоянии.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Последовательность уже поднята")]
    AlreadyMoving,

    #[error("Нечего перемещать – сначала поднимите последовательность")]
    NotMoving,

    #[error("Колонки {0} не существует")]
    InvalidColumnIndex(ColumnIndex),

    #[error("Нельзя раздавать, пока есть пустые колонки: {empty_columns:?}")]
    DealBlocked { empty_columns: Vec<ColumnIndex> },

    #[error("Все карты уже розданы")]
    StockExhausted,

    #[error("Ход из колонки {from} в колонку {to} невозможен")]
    IllegalMove { from: ColumnIndex, to: ColumnIndex },

    #[error("Некорректная конфигурация: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
