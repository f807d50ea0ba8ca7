// src/bin/holdem_dev_cli.rs
//
// Dev-CLI: садит N ботов за один стол и прогоняет раздачи до конца игры
// или до лимита. Итог печатается в JSON.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use holdem_table::api::{execute_query, Query, QueryResponse, TableSnapshotDto};
use holdem_table::domain::{Chips, NewPlayer, PlayerId, TableConfig, TableId, TableStatus};
use holdem_table::engine::{ActionKind, ShowdownResult, TableService};
use holdem_table::infra::{DeterministicRng, InMemoryTableStore, Viewer};
use holdem_table::EngineError;

#[derive(Parser, Debug)]
#[command(name = "holdem_dev_cli")]
#[command(about = "Self-play simulation of a single Texas Hold'em table")]
struct Args {
    /// Игроков за столом (2–10).
    #[arg(long, default_value_t = 4)]
    players: u8,

    /// Стартовый стек каждого игрока.
    #[arg(long, default_value_t = 1_000)]
    stack: u64,

    #[arg(long, default_value_t = 10)]
    small_blind: u64,

    #[arg(long, default_value_t = 20)]
    big_blind: u64,

    /// Максимум раздач.
    #[arg(long, default_value_t = 50)]
    hands: u64,

    /// Seed для тасовки и решений ботов.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Serialize)]
struct Report {
    hands_played: u64,
    game_ended: bool,
    results: Vec<ShowdownResult>,
    table: TableSnapshotDto,
}

type Service = TableService<InMemoryTableStore, DeterministicRng>;

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("[CLI] не удалось сериализовать отчёт: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("[CLI] ОШИБКА: {e}");
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<Report, EngineError> {
    let service: Service = TableService::new(
        InMemoryTableStore::new(),
        DeterministicRng::from_u64(args.seed),
    );
    let mut policy = StdRng::seed_from_u64(args.seed.wrapping_add(1));

    let config = TableConfig::new(Chips(args.small_blind), Chips(args.big_blind))
        .named("DEV TABLE")
        .with_max_seats(args.players.max(2));
    let table_id = service.create_table(config)?.id;

    for n in 0..args.players {
        service.add_player(
            table_id,
            NewPlayer::new(format!("Bot {}", n + 1), Chips(args.stack)),
        )?;
    }

    service.start_hand(table_id)?;
    log::info!("[CLI] стол {} запущен, {} игроков", table_id, args.players);

    let mut results = Vec::new();
    let mut hands_played = 0;
    let mut game_ended = false;

    while hands_played < args.hands {
        if let Some(result) = play_out_hand(&service, table_id, &mut policy)? {
            results.push(result);
        }
        hands_played += 1;

        let outcome = service.end_hand(table_id)?;
        if outcome.game_ended {
            game_ended = true;
            break;
        }
        if let Some(result) = outcome.showdown {
            results.push(result);
        }
    }

    let table = match execute_query(
        &service,
        Query::GetState {
            table_id,
            viewer: Viewer::Operator,
        },
    ) {
        Ok(QueryResponse::Table(dto)) => dto,
        _ => return Err(EngineError::TableNotFound(table_id)),
    };

    Ok(Report {
        hands_played,
        game_ended,
        results,
        table,
    })
}

/// Ходить за ботов, пока раздача не закончится.
fn play_out_hand(
    service: &Service,
    table_id: TableId,
    policy: &mut StdRng,
) -> Result<Option<ShowdownResult>, EngineError> {
    const MAX_STEPS: u32 = 500;

    for _ in 0..MAX_STEPS {
        let state = service.get_state(table_id)?;
        if state.table.status != TableStatus::Active {
            return Ok(None);
        }
        let Some(player_id) = state.table.current_player_id else {
            return Ok(None);
        };

        let action = choose_action(service, table_id, player_id, policy)?;
        let outcome = service.apply_action(table_id, player_id, action, Some(state.table.current_round))?;
        if outcome.showdown.is_some() {
            return Ok(outcome.showdown);
        }
    }

    log::warn!("[CLI] превышен лимит шагов ({MAX_STEPS}) на столе {table_id}");
    Ok(None)
}

/// Простая политика: check если можно, иначе чаще call, иногда рейз, редко fold.
fn choose_action(
    service: &Service,
    table_id: TableId,
    player_id: PlayerId,
    policy: &mut StdRng,
) -> Result<ActionKind, EngineError> {
    let state = service.get_state(table_id)?;
    let player = state.player(player_id)?;
    let to_call = state.table.current_bet.saturating_sub(player.current_bet);
    let roll: u8 = policy.gen_range(0..100);

    let raise = Chips(state.table.big_blind().0 * 2);
    if roll < 10 && player.chips > to_call + raise {
        return Ok(ActionKind::Raise(to_call + raise));
    }
    if service.can_check(table_id, player_id)? {
        return Ok(ActionKind::Check);
    }
    if !to_call.is_zero() && roll < 85 {
        Ok(ActionKind::Call(to_call.min(player.chips)))
    } else {
        Ok(ActionKind::Fold)
    }
}
