// src/bin/spider_cli.rs

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};

use spider_engine::api::{apply_command, parse_command, CommandResponse};
use spider_engine::engine::{Game, GameConfig, MoveOutcome};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(cfg) => cfg,
        Err(msg) => {
            eprintln!("[CLI] {msg}");
            std::process::exit(2);
        }
    };

    let mut game = match Game::with_config(&config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("[CLI] Не удалось начать партию: {e}");
            std::process::exit(2);
        }
    };

    if let Some(seed) = config.seed {
        println!("spider_cli: партия с seed={seed}");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!();
        println!("{game}");
        print_options(&game);

        print!("Input: ");
        if let Err(e) = io::stdout().flush() {
            warn!(error = %e, "failed to flush stdout");
        }

        let Some(Ok(line)) = lines.next() else {
            println!();
            println!("[CLI] Ввод закончился, выходим.");
            return;
        };

        let command = match parse_command(&line, game.is_holding()) {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match apply_command(&mut game, command) {
            Ok(response) => report(&response),
            Err(e) => println!("{e}"),
        }

        if game.is_won() {
            println!();
            println!("{game}");
            println!("Поздравляем, партия выиграна!");
            return;
        }
    }
}

fn print_options(game: &Game) {
    println!("Options:");
    match game.held() {
        Some(held) => {
            println!("picked up: {}", held.sequence);
            println!("k     переложить последовательность на колонку k");
            println!("b     вернуть последовательность на колонку {}", held.origin);
        }
        None => {
            let left = game.num_cards_remaining_in_stock();
            if left > 0 {
                println!("d     раздать (в прикупе ещё {left} карт)");
            }
            println!("k,n   поднять хвост нижней последовательности колонки k с позиции n");
            println!("k     поднять всю нижнюю последовательность колонки k");
        }
    }
}

fn report(response: &CommandResponse) {
    match response {
        CommandResponse::Dealt(outcome) if !outcome.completed_columns.is_empty() => {
            println!("Собрана масть в колонках {:?}", outcome.completed_columns);
        }
        CommandResponse::Moved(MoveOutcome::Merged { completed: true }) => {
            println!("Масть собрана и убрана со стола!");
        }
        _ => {}
    }
}

/// Очень маленький разбор аргументов: `--seed=<u64>` и `--config=<path.json>`.
fn parse_args() -> Result<GameConfig, String> {
    let mut config = GameConfig::default();
    let mut seed = None;

    for arg in env::args().skip(1) {
        if let Some(rest) = arg.strip_prefix("--seed=") {
            match rest.parse::<u64>() {
                Ok(v) => seed = Some(v),
                Err(_) => eprintln!("Warning: could not parse seed from '{rest}'; ignoring"),
            }
        } else if let Some(path) = arg.strip_prefix("--config=") {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("не удалось прочитать {path}: {e}"))?;
            config = GameConfig::from_json(&json).map_err(|e| e.to_string())?;
        } else {
            eprintln!(
                "Warning: unrecognized argument '{arg}'; supported: --seed=<u64>, --config=<path>"
            );
        }
    }

    // --seed в командной строке важнее seed из файла
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .init();
}
