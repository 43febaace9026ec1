use serde::{Deserialize, Serialize};

use crate::domain::{NUM_COLUMNS, SPIDER_DECK_SIZE};
use crate::engine::errors::EngineError;

/// Сколько закрытых карт получает каждая колонка при стартовой раздаче.
pub const DEFAULT_FACE_DOWN_LAYOUT: [usize; NUM_COLUMNS] = [5, 5, 5, 5, 4, 4, 4, 4, 4, 4];

/// Настройки новой партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    /// Seed для воспроизводимой раздачи. `None` — системный RNG.
    pub seed: Option<u64>,
    /// Закрытые карты по колонкам 0..9.
    pub face_down_layout: [usize; NUM_COLUMNS],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            face_down_layout: DEFAULT_FACE_DOWN_LAYOUT,
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Прочитать конфиг из JSON; отсутствующие поля берутся по умолчанию.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Сколько карт останется в прикупе после стартовой раздачи.
    pub fn initial_stock_size(&self) -> Option<usize> {
        let face_down: usize = self.face_down_layout.iter().sum();
        SPIDER_DECK_SIZE.checked_sub(face_down + NUM_COLUMNS)
    }

    /// Расклад должен помещаться в колоду, а прикуп — делиться на раздачи по одной карте в колонку.
    pub fn validate(&self) -> Result<(), EngineError> {
        let stock = self.initial_stock_size().ok_or_else(|| {
            EngineError::InvalidConfig(format!(
                "face-down layout needs more than {SPIDER_DECK_SIZE} cards"
            ))
        })?;
        if stock % NUM_COLUMNS != 0 {
            return Err(EngineError::InvalidConfig(format!(
                "stock of {stock} cards cannot be dealt {NUM_COLUMNS} at a time"
            )));
        }
        Ok(())
    }
}
