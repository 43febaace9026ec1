//! Движок правил пасьянса «Паук» (две масти, 104 карты).
//!
//! Слои:
//! - `domain` — карты, колода, последовательности, колонки;
//! - `engine` — партия целиком (`Game`) и её состояния Idle/Holding;
//! - `api` — команды, запросы и DTO для внешнего кода (CLI);
//! - `infra` — реализации RNG.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;

pub use engine::{EngineError, Game, GameConfig};
