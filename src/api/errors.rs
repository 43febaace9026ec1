use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём клиенту / CLI).
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiError {
    /// Неправильный ввод (не число, лишние части и т.п.). Состояние игры не менялось.
    #[error("Неверный ввод: {0}")]
    BadRequest(String),

    /// Команда не подходит к текущему состоянию (уже/ещё не держим последовательность).
    #[error("{0}")]
    InvalidCommand(String),

    /// Ход отвергнут правилами.
    #[error("{0}")]
    EngineError(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::AlreadyMoving | EngineError::NotMoving => {
                ApiError::InvalidCommand(err.to_string())
            }
            other => ApiError::EngineError(other.to_string()),
        }
    }
}
