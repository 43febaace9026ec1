use serde::{Deserialize, Serialize};

use crate::domain::{Column, ColumnIndex};
use crate::engine::Game;

use super::dto::{BoardViewDto, ColumnViewDto, HeldViewDto};
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Query {
    /// Получить весь стол.
    GetBoard,

    /// Получить одну колонку.
    GetColumn { index: ColumnIndex },

    /// Выиграна ли партия.
    IsWon,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryResponse {
    Board(BoardViewDto),
    Column(ColumnViewDto),
    Won(bool),
}

pub fn handle_query(game: &Game, query: &Query) -> Result<QueryResponse, ApiError> {
    match query {
        Query::GetBoard => Ok(QueryResponse::Board(build_board_view(game))),
        Query::GetColumn { index } => {
            let column = game.column(*index)?;
            Ok(QueryResponse::Column(build_column_view(*index, column)))
        }
        Query::IsWon => Ok(QueryResponse::Won(game.is_won())),
    }
}

/// Сформировать DTO стола.
pub fn build_board_view(game: &Game) -> BoardViewDto {
    BoardViewDto {
        columns: game
            .columns()
            .iter()
            .enumerate()
            .map(|(i, col)| build_column_view(i, col))
            .collect(),
        stock_remaining: game.num_cards_remaining_in_stock(),
        held: game.held().map(|h| HeldViewDto {
            origin: h.origin,
            cards: h.sequence.cards().to_vec(),
        }),
        completed_runs: game.completed_runs(),
        is_won: game.is_won(),
    }
}

pub fn build_column_view(index: ColumnIndex, column: &Column) -> ColumnViewDto {
    ColumnViewDto {
        index,
        face_down: column.num_face_down_cards(),
        sequences: column
            .sequences()
            .iter()
            .map(|seq| seq.cards().to_vec())
            .collect(),
    }
}
