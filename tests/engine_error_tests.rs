// tests/engine_error_tests.rs
//
// Ошибки движка. Для каждой проверяем, что стол остаётся согласованным:
//  1) AlreadyMoving при повторном подъёме и при раздаче во время хода
//  2) NotMoving при переносе без подъёма
//  3) InvalidColumnIndex при подъёме и при переносе (ход откатывается)
//  4) EmptyColumn / InvalidSplit при подъёме
//  5) DealBlocked со списком пустых колонок, StockExhausted
//  6) IllegalMove: поднятое возвращается в исходную колонку
//  7) Случайная игра: 104 карты на месте после каждой команды
//  8) Сохранённая партия с поднятым из несуществующей колонки не загружается

use spider_engine::domain::*;
use spider_engine::engine::{EngineError, Game, MoveOutcome};
use spider_engine::infra::DeterministicRng;

fn c(s: &str) -> Card {
    s.parse().expect("parse Card")
}

fn cards(list: &str) -> Vec<Card> {
    list.split_whitespace().map(c).collect()
}

fn seq(list: &str) -> Sequence {
    Sequence::new(cards(list)).expect("valid sequence")
}

fn col(sequences: &[&str], face_down: &str) -> Column {
    Column::from_parts(sequences.iter().map(|s| seq(s)).collect(), cards(face_down))
}

fn board(layout: Vec<(usize, Column)>, stock: &str) -> Game {
    let mut columns: [Column; NUM_COLUMNS] = Default::default();
    for (i, column) in layout {
        columns[i] = column;
    }
    Game::from_parts(columns, Deck { cards: cards(stock) })
}

fn full_board(stock: &str) -> Game {
    board((0..NUM_COLUMNS).map(|i| (i, col(&["Kh"], ""))).collect(), stock)
}

#[test]
fn already_moving_on_second_pick_up_and_on_deal() {
    let mut game = Game::new(&mut DeterministicRng::from_seed(11));
    game.pick_up(0, 0).unwrap();
    let holding = game.clone();

    assert_eq!(game.pick_up(1, 0), Err(EngineError::AlreadyMoving));
    assert_eq!(game.deal(), Err(EngineError::AlreadyMoving));
    assert_eq!(game, holding);
}

#[test]
fn not_moving_when_nothing_is_held() {
    let mut game = Game::new(&mut DeterministicRng::from_seed(12));
    let before = game.clone();
    assert_eq!(game.move_to(Some(3)), Err(EngineError::NotMoving));
    assert_eq!(game.move_to(None), Err(EngineError::NotMoving));
    assert_eq!(game, before);
}

#[test]
fn invalid_column_index_on_pick_up() {
    let mut game = Game::new(&mut DeterministicRng::from_seed(13));
    let before = game.clone();
    assert_eq!(game.pick_up(10, 0), Err(EngineError::InvalidColumnIndex(10)));
    assert_eq!(game.pick_up(usize::MAX, 1), Err(EngineError::InvalidColumnIndex(usize::MAX)));
    assert_eq!(game, before);
}

#[test]
fn invalid_column_index_on_move_rolls_back() {
    let mut game = Game::new(&mut DeterministicRng::from_seed(14));
    let before = game.clone();
    game.pick_up(2, 0).unwrap();

    assert_eq!(game.move_to(Some(42)), Err(EngineError::InvalidColumnIndex(42)));
    assert!(!game.is_holding());
    assert_eq!(game, before);
}

#[test]
fn empty_column_and_invalid_split_on_pick_up() {
    let mut game = board(vec![(0, col(&["9s 8s"], ""))], "");
    let before = game.clone();

    assert_eq!(
        game.pick_up(1, 0),
        Err(EngineError::Domain(DomainError::EmptyColumn))
    );
    assert_eq!(
        game.pick_up(0, 2),
        Err(EngineError::Domain(DomainError::InvalidSplit { index: 2, len: 2 }))
    );
    assert_eq!(game, before);
    assert!(!game.is_holding());
}

#[test]
fn deal_blocked_lists_every_empty_column() {
    let layout = (0..NUM_COLUMNS)
        .filter(|i| ![2, 7].contains(i))
        .map(|i| (i, col(&["Kh"], "")))
        .collect();
    let mut game = board(layout, "As 2s 3s 4s 5s 6s 7s 8s 9s Ts");
    let before = game.clone();

    assert_eq!(
        game.deal(),
        Err(EngineError::DealBlocked {
            empty_columns: vec![2, 7]
        })
    );
    assert_eq!(game, before);
}

#[test]
fn stock_exhausted_is_checked_before_empty_columns() {
    let mut game = board(vec![(0, col(&["Kh"], ""))], "");
    assert_eq!(game.deal(), Err(EngineError::StockExhausted));

    let mut game = full_board("");
    assert_eq!(game.deal(), Err(EngineError::StockExhausted));
}

#[test]
fn illegal_move_returns_sequence_to_origin() {
    let mut game = board(vec![(0, col(&["Ts", "9h 8h"], "")), (1, col(&["5s"], ""))], "");
    let before = game.clone();

    game.pick_up(0, 0).unwrap();
    assert_eq!(
        game.move_to(Some(1)),
        Err(EngineError::IllegalMove { from: 0, to: 1 })
    );
    assert!(!game.is_holding());
    assert_eq!(game, before);
}

#[test]
fn illegal_move_after_partial_lift_remerges() {
    let mut game = board(vec![(0, col(&["9h 8h 7h"], "")), (1, col(&["Kh"], ""))], "");
    let before = game.clone();

    game.pick_up(0, 1).unwrap();
    assert!(matches!(
        game.move_to(Some(1)),
        Err(EngineError::IllegalMove { .. })
    ));
    assert_eq!(game, before);
    assert_eq!(game.column(0).unwrap().sequences(), &[seq("9h 8h 7h")]);
}

#[test]
fn errors_have_readable_messages() {
    let blocked = EngineError::DealBlocked {
        empty_columns: vec![1, 4],
    };
    assert!(blocked.to_string().contains("[1, 4]"));

    let wrapped: EngineError = DomainError::EmptyColumn.into();
    assert_eq!(wrapped.to_string(), DomainError::EmptyColumn.to_string());
}

// -----------------------------
// СЛУЧАЙНАЯ ИГРА
// -----------------------------

fn assert_consistent(game: &Game) {
    assert_eq!(game.total_cards() + 13 * game.completed_runs(), SPIDER_DECK_SIZE);
    for column in game.columns() {
        for s in column.sequences() {
            assert!(Sequence::new(s.cards().to_vec()).is_ok());
            assert!(!s.is_complete(), "complete runs never stay on the table");
        }
    }
    assert_eq!(game.is_won(), game.columns().iter().all(Column::is_empty));
}

#[test]
fn random_play_preserves_card_count_and_move_rules() {
    for seed in 0..8 {
        let mut rng = DeterministicRng::from_seed(seed);
        let mut game = Game::new(&mut rng);
        assert_consistent(&game);

        for _ in 0..3_000 {
            match rng.below(6) {
                0 => {
                    let _ = game.deal();
                }
                1 | 2 => {
                    let _ = game.pick_up(rng.below(NUM_COLUMNS + 1), rng.below(4));
                }
                3 => {
                    game.abort_move();
                }
                _ => {
                    let target = rng.below(NUM_COLUMNS + 1);
                    check_move_rules(&mut game, target);
                }
            }
            assert_consistent(&game);
        }
    }
}

/// Пустая цель или совпадение по рангу — ход проходит;
/// цель вне диапазона или без совпадения по рангу — ошибка и откат.
fn check_move_rules(game: &mut Game, target: usize) {
    let Some(held) = game.held().cloned() else {
        assert_eq!(game.move_to(Some(target)), Err(EngineError::NotMoving));
        return;
    };
    let result = game.move_to(Some(target));
    assert!(!game.is_holding());

    if target == held.origin {
        assert_eq!(result, Ok(MoveOutcome::Returned));
        return;
    }
    if target >= NUM_COLUMNS {
        assert_eq!(result, Err(EngineError::InvalidColumnIndex(target)));
        return;
    }

    let target_column = game.column(target).unwrap();
    match result {
        Ok(MoveOutcome::Appended) | Ok(MoveOutcome::Merged { .. }) => {}
        Err(EngineError::IllegalMove { from, to }) => {
            assert_eq!((from, to), (held.origin, target));
            // цель не изменилась, значит её нижняя карта и была несовместима
            let bottom = target_column.last_sequence().unwrap();
            assert!(!held.sequence.fits_to(bottom, false));
            assert!(game
                .column(held.origin)
                .unwrap()
                .face_up_cards()
                .collect::<Vec<_>>()
                .ends_with(&held.sequence.iter().collect::<Vec<_>>()));
        }
        other => panic!("unexpected move result: {other:?}"),
    }
}

#[test]
fn saved_game_while_holding_loads_and_aborts() {
    let mut game = Game::new(&mut DeterministicRng::from_seed(21));
    game.pick_up(0, 0).unwrap();

    let json = serde_json::to_string(&game).unwrap();
    let mut loaded: Game = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, game);

    assert!(loaded.abort_move());
    assert!(game.abort_move());
    assert_eq!(loaded, game);
}

#[test]
fn saved_game_with_out_of_range_origin_is_rejected() {
    let mut game = Game::new(&mut DeterministicRng::from_seed(22));
    game.pick_up(0, 0).unwrap();

    let mut value = serde_json::to_value(&game).unwrap();
    value["held"]["origin"] = serde_json::json!(42);
    let err = serde_json::from_value::<Game>(value).unwrap_err();
    assert!(err.to_string().contains("42"), "unexpected error: {err}");

    let mut value = serde_json::to_value(&game).unwrap();
    value["held"]["origin"] = serde_json::json!(NUM_COLUMNS);
    assert!(serde_json::from_value::<Game>(value).is_err());
}
