use serde::{Deserialize, Serialize};

use crate::domain::{Card, ColumnIndex};
use crate::engine::{DealOutcome, Lift, MoveOutcome};

/// DTO одной колонки.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnViewDto {
    pub index: ColumnIndex,
    /// Сколько карт лежит рубашкой вверх (сами карты не раскрываются).
    pub face_down: usize,
    /// Открытые последовательности сверху вниз.
    pub sequences: Vec<Vec<Card>>,
}

/// DTO поднятой последовательности.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldViewDto {
    pub origin: ColumnIndex,
    pub cards: Vec<Card>,
}

/// DTO всего стола.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardViewDto {
    pub columns: Vec<ColumnViewDto>,
    pub stock_remaining: usize,
    pub held: Option<HeldViewDto>,
    pub completed_runs: usize,
    pub is_won: bool,
}

/// Ответ API на команду.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandResponse {
    Dealt(DealOutcome),
    PickedUp(Lift),
    Moved(MoveOutcome),
    /// `returned == false`, если поднятого не было.
    Aborted { returned: bool },
}
