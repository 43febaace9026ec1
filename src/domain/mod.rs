//! Доменная модель «Паука»: карты, колода, последовательности, колонки.

pub mod card;
pub mod column;
pub mod deck;
pub mod errors;
pub mod sequence;

/// Индекс колонки на столе (0..NUM_COLUMNS).
pub type ColumnIndex = usize;

/// Колонок на столе всегда десять.
pub const NUM_COLUMNS: usize = 10;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use column::*;
pub use deck::*;
pub use errors::*;
pub use sequence::*;
