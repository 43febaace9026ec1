use serde::{Deserialize, Serialize};

use crate::domain::ColumnIndex;
use crate::engine::Game;

use super::dto::CommandResponse;
use super::errors::ApiError;

/// Команда верхнего уровня: одна команда — одна операция движка.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Раздать ряд из прикупа.
    Deal,

    /// Поднять с колонки: `split_index == 0` — всю нижнюю последовательность.
    PickUp {
        column: ColumnIndex,
        split_index: usize,
    },

    /// Положить поднятое. `None` — вернуть на место.
    Move { target: Option<ColumnIndex> },

    /// Вернуть поднятое на исходную колонку.
    Abort,
}

/// Разбор строки ввода игрока.
///
/// Без поднятой последовательности:
///   - `d`    → раздать;
///   - `k`    → поднять всю нижнюю последовательность колонки k;
///   - `k,n`  → поднять хвост колонки k начиная с позиции n.
///
/// С поднятой последовательностью:
///   - `b`    → вернуть на место;
///   - `k`    → положить на колонку k.
pub fn parse_command(input: &str, holding: bool) -> Result<Command, ApiError> {
    let input = input.trim().to_lowercase();

    if holding {
        if input == "b" {
            return Ok(Command::Abort);
        }
        let target = parse_index(&input)?;
        return Ok(Command::Move {
            target: Some(target),
        });
    }

    if input == "d" {
        return Ok(Command::Deal);
    }

    let mut parts = input.split(',');
    let column = parse_index(parts.next().unwrap_or_default())?;
    let split_index = match parts.next() {
        Some(part) => parse_index(part)?,
        None => 0,
    };
    if parts.next().is_some() {
        return Err(ApiError::BadRequest(format!(
            "ожидалось `k` или `k,n`, получено `{input}`"
        )));
    }

    Ok(Command::PickUp {
        column,
        split_index,
    })
}

fn parse_index(part: &str) -> Result<usize, ApiError> {
    let part = part.trim();
    part.parse::<usize>()
        .map_err(|_| ApiError::BadRequest(format!("`{part}` не является номером")))
}

/// Применить команду к партии.
pub fn apply_command(game: &mut Game, command: Command) -> Result<CommandResponse, ApiError> {
    let response = match command {
        Command::Deal => CommandResponse::Dealt(game.deal()?),
        Command::PickUp {
            column,
            split_index,
        } => CommandResponse::PickedUp(game.pick_up(column, split_index)?),
        Command::Move { target } => CommandResponse::Moved(game.move_to(target)?),
        Command::Abort => CommandResponse::Aborted {
            returned: game.abort_move(),
        },
    };
    Ok(response)
}
