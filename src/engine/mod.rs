//! Движок «Паука»: раздача, подъём, перенос и отмена хода, проверка победы.
//!
//! Высокоуровневый объект: `Game`
//! Основные операции:
//!   - `deal` – раздать ряд из прикупа
//!   - `pick_up` / `lift` – поднять последовательность с колонки
//!   - `move_to` – положить поднятое на другую колонку
//!   - `abort_move` – вернуть поднятое на место

pub mod config;
pub mod errors;
pub mod game;

pub use config::{GameConfig, DEFAULT_FACE_DOWN_LAYOUT};
pub use errors::EngineError;
pub use game::{DealOutcome, Game, HeldSequence, Lift, MoveOutcome};

/// RNG интерфейс для engine.
/// Реализации лежат в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
