use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{
    Column, ColumnIndex, DealtCard, Deck, Sequence, NUM_COLUMNS,
};
use crate::engine::config::{GameConfig, DEFAULT_FACE_DOWN_LAYOUT};
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;
use crate::infra::{DeterministicRng, SystemRng};

/// Поднятая последовательность вместе с колонкой, откуда её взяли.
/// Пока она поднята, ни одна колонка ею не владеет.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldSequence {
    pub sequence: Sequence,
    pub origin: ColumnIndex,
}

/// Как поднимать карты с колонки.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lift {
    /// Всю нижнюю последовательность.
    Whole,
    /// Хвост нижней последовательности начиная с указанной позиции.
    Suffix(usize),
}

impl Lift {
    /// Соглашение командной строки: `0` — поднять всё, `n > 0` — хвост с позиции `n`.
    pub fn from_split_index(split_index: usize) -> Self {
        if split_index == 0 {
            Lift::Whole
        } else {
            Lift::Suffix(split_index)
        }
    }
}

/// Итог `move_to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Последовательность вернулась в исходную колонку.
    Returned,
    /// Легла на целевую колонку отдельной последовательностью.
    Appended,
    /// Слилась с нижней последовательностью цели той же масти.
    Merged { completed: bool },
}

/// Итог раздачи из прикупа.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealOutcome {
    /// Колонки, где розданная карта замкнула полную масть.
    pub completed_columns: Vec<ColumnIndex>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Placement {
    Append,
    Merge,
}

/// Состояние партии: десять колонок, прикуп и (возможно) поднятая последовательность.
///
/// Два состояния: Idle (`held == None`) и Holding. Каждая операция либо применяется
/// целиком, либо оставляет стол согласованным — при неудачном ходе поднятое
/// возвращается в исходную колонку до того, как ошибка уйдёт наружу.
///
/// Десериализация идёт через `GameState` и отвергает поднятое с несуществующей колонки.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameState")]
pub struct Game {
    columns: [Column; NUM_COLUMNS],
    stock: Deck,
    held: Option<HeldSequence>,
    completed_runs: usize,
}

/// Сохранённая партия до проверки.
#[derive(Deserialize)]
struct GameState {
    columns: [Column; NUM_COLUMNS],
    stock: Deck,
    held: Option<HeldSequence>,
    completed_runs: usize,
}

impl TryFrom<GameState> for Game {
    type Error = EngineError;

    fn try_from(state: GameState) -> Result<Self, Self::Error> {
        if let Some(held) = &state.held {
            if held.origin >= NUM_COLUMNS {
                return Err(EngineError::InvalidColumnIndex(held.origin));
            }
        }
        Ok(Self {
            columns: state.columns,
            stock: state.stock,
            held: state.held,
            completed_runs: state.completed_runs,
        })
    }
}

impl Game {
    /// Новая партия со стандартным раскладом и перемешиванием от `rng`.
    pub fn new<R: RandomSource>(rng: &mut R) -> Self {
        let mut deck = Deck::spider_104();
        rng.shuffle(&mut deck.cards);
        Self::lay_out(deck, &DEFAULT_FACE_DOWN_LAYOUT)
    }

    /// Новая партия по конфигу: seed → детерминированная раздача, без seed — системный RNG.
    pub fn with_config(config: &GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut deck = Deck::spider_104();
        match config.seed {
            Some(seed) => DeterministicRng::from_seed(seed).shuffle(&mut deck.cards),
            None => SystemRng.shuffle(&mut deck.cards),
        }
        Self::from_shuffled(deck, config)
    }

    /// Разложить уже перемешанную колоду. Карты снимаются с конца `deck.cards`:
    /// каждой колонке сначала закрытые, затем одна открытая; остаток — прикуп.
    pub fn from_shuffled(deck: Deck, config: &GameConfig) -> Result<Self, EngineError> {
        let needed: usize = config.face_down_layout.iter().sum::<usize>() + NUM_COLUMNS;
        if deck.len() < needed {
            return Err(EngineError::InvalidConfig(format!(
                "initial deal needs {needed} cards, deck has {}",
                deck.len()
            )));
        }
        Ok(Self::lay_out(deck, &config.face_down_layout))
    }

    fn lay_out(mut deck: Deck, face_down_layout: &[usize; NUM_COLUMNS]) -> Self {
        let mut columns: [Column; NUM_COLUMNS] = Default::default();
        for (column, &face_down) in columns.iter_mut().zip(face_down_layout.iter()) {
            let hidden = deck.draw_n(face_down);
            if let Some(card) = deck.draw_one() {
                *column = Column::new(card, hidden);
            }
        }
        debug!(stock = deck.len(), "initial layout dealt");
        Self::from_parts(columns, deck)
    }

    /// Собрать партию из готовых колонок и прикупа.
    pub fn from_parts(columns: [Column; NUM_COLUMNS], stock: Deck) -> Self {
        Self {
            columns,
            stock,
            held: None,
            completed_runs: 0,
        }
    }

    // ---------------------------------------------------------------
    // Чтение состояния
    // ---------------------------------------------------------------

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: ColumnIndex) -> Result<&Column, EngineError> {
        self.columns
            .get(index)
            .ok_or(EngineError::InvalidColumnIndex(index))
    }

    pub fn num_cards_remaining_in_stock(&self) -> usize {
        self.stock.len()
    }

    pub fn held(&self) -> Option<&HeldSequence> {
        self.held.as_ref()
    }

    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    /// Сколько полных мастей уже убрано со стола.
    pub fn completed_runs(&self) -> usize {
        self.completed_runs
    }

    /// Карты в игре: колонки, прикуп и поднятая последовательность.
    /// Вместе с убранными мастями всегда даёт полную колоду.
    pub fn total_cards(&self) -> usize {
        let on_table: usize = self.columns.iter().map(Column::total_cards).sum();
        let held = self.held.as_ref().map_or(0, |h| h.sequence.len());
        on_table + self.stock.len() + held
    }

    /// Победа: на всех колонках не осталось открытых карт.
    pub fn is_won(&self) -> bool {
        self.columns.iter().all(Column::is_empty)
    }

    // ---------------------------------------------------------------
    // Операции
    // ---------------------------------------------------------------

    /// Раздать по одной карте из прикупа в каждую колонку.
    pub fn deal(&mut self) -> Result<DealOutcome, EngineError> {
        if self.held.is_some() {
            return Err(EngineError::AlreadyMoving);
        }
        if self.stock.is_empty() {
            return Err(EngineError::StockExhausted);
        }
        let empty_columns: Vec<ColumnIndex> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, col)| col.is_empty())
            .map(|(i, _)| i)
            .collect();
        if !empty_columns.is_empty() {
            return Err(EngineError::DealBlocked { empty_columns });
        }

        let mut outcome = DealOutcome::default();
        for (index, column) in self.columns.iter_mut().enumerate() {
            let Some(card) = self.stock.draw_one() else {
                break;
            };
            if column.deal_card(card) == DealtCard::Completed {
                self.completed_runs += 1;
                outcome.completed_columns.push(index);
            }
        }
        debug!(
            stock = self.stock.len(),
            completed = ?outcome.completed_columns,
            "dealt a row from the stock"
        );
        self.log_if_won();
        Ok(outcome)
    }

    /// Поднять карты с колонки: `split_index == 0` — всю нижнюю последовательность,
    /// иначе хвост начиная с этой позиции. Возвращает, какой подъём выполнен.
    pub fn pick_up(
        &mut self,
        column: ColumnIndex,
        split_index: usize,
    ) -> Result<Lift, EngineError> {
        let lift = Lift::from_split_index(split_index);
        self.lift(column, lift)?;
        Ok(lift)
    }

    /// Поднять карты с колонки явно выбранным способом.
    pub fn lift(&mut self, column: ColumnIndex, lift: Lift) -> Result<(), EngineError> {
        if self.held.is_some() {
            return Err(EngineError::AlreadyMoving);
        }
        let source = self
            .columns
            .get_mut(column)
            .ok_or(EngineError::InvalidColumnIndex(column))?;

        let sequence = match lift {
            Lift::Whole => source.lift_whole()?,
            Lift::Suffix(index) => source.lift_suffix(index)?,
        };
        debug!(column, ?lift, sequence = %sequence, "picked up");
        self.held = Some(HeldSequence {
            sequence,
            origin: column,
        });
        Ok(())
    }

    /// Вернуть поднятое в исходную колонку. Без поднятого — ничего не делает.
    /// Возвращает `true`, если что-то было возвращено.
    pub fn abort_move(&mut self) -> bool {
        let Some(held) = self.held.take() else {
            return false;
        };
        debug!(origin = held.origin, "move aborted");
        self.return_to_origin(held);
        true
    }

    /// Положить поднятое на колонку `target`.
    ///
    /// `None` или исходная колонка — то же самое, что `abort_move`. Пустая цель или
    /// совпадение по рангу при другой масти — отдельная последовательность; та же масть —
    /// слияние и проверка на полную масть. Иначе ход отменяется и возвращается `IllegalMove`.
    pub fn move_to(&mut self, target: Option<ColumnIndex>) -> Result<MoveOutcome, EngineError> {
        let origin = match &self.held {
            Some(held) => held.origin,
            None => return Err(EngineError::NotMoving),
        };
        let target = match target {
            Some(t) if t != origin => t,
            _ => {
                self.abort_move();
                return Ok(MoveOutcome::Returned);
            }
        };
        if target >= NUM_COLUMNS {
            self.abort_move();
            return Err(EngineError::InvalidColumnIndex(target));
        }
        let Some(held) = self.held.take() else {
            return Err(EngineError::NotMoving);
        };

        let Some(placement) = placement_for(&held.sequence, &self.columns[target]) else {
            warn!(from = origin, to = target, sequence = %held.sequence, "illegal move rolled back");
            self.return_to_origin(held);
            return Err(EngineError::IllegalMove {
                from: origin,
                to: target,
            });
        };

        let outcome = match placement {
            Placement::Append => {
                self.columns[target].append_sequence(held.sequence);
                MoveOutcome::Appended
            }
            Placement::Merge => match self.columns[target].merge_into_last(held.sequence) {
                Ok(()) => {
                    let completed = self.columns[target].collapse_if_complete();
                    if completed {
                        self.completed_runs += 1;
                    }
                    MoveOutcome::Merged { completed }
                }
                Err(rejected) => {
                    self.return_to_origin(HeldSequence {
                        sequence: rejected,
                        origin,
                    });
                    return Err(EngineError::IllegalMove {
                        from: origin,
                        to: target,
                    });
                }
            },
        };
        self.columns[origin].reveal_if_empty();
        debug!(from = origin, to = target, ?outcome, "moved");
        self.log_if_won();
        Ok(outcome)
    }

    fn return_to_origin(&mut self, held: HeldSequence) {
        self.columns[held.origin].merge_or_append(held.sequence);
    }

    fn log_if_won(&self) {
        if self.is_won() {
            info!(completed_runs = self.completed_runs, "all runs cleared, game won");
        }
    }
}

/// Куда и как ляжет поднятое на `target`; `None` — ход запрещён.
fn placement_for(held: &Sequence, target: &Column) -> Option<Placement> {
    let Ok(bottom) = target.last_sequence() else {
        return Some(Placement::Append);
    };
    if held.fits_to(bottom, true) {
        Some(Placement::Merge)
    } else if held.fits_to(bottom, false) {
        Some(Placement::Append)
    } else {
        None
    }
}

impl fmt::Display for Game {
    /// По строке на колонку: `0 XX XX 9s-8s`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{i} {column}")?;
        }
        Ok(())
    }
}
