//! Тесты сервиса столов и API-слоя.
//!
//! Проверяем:
//! - операции сервиса поверх хранилища (единица работы);
//! - отклонённая операция не меняет сохранённый стол;
//! - конкурентные запросы к одному столу сериализуются;
//! - команды/запросы в JSON, скрытие чужих карт, классы ошибок.

use std::sync::Arc;

use holdem_table::api::{
    execute_command, execute_command_json, execute_query, ApiError, Command, CommandResponse, Query,
    QueryResponse,
};
use holdem_table::domain::{Chips, NewPlayer, Street, TableConfig, TableId, TableStatus};
use holdem_table::engine::{ActionKind, EngineError, ErrorKind, RandomSource, TableService};
use holdem_table::infra::{DeterministicRng, InMemoryTableStore, SystemRng, TableStore, Viewer};
use holdem_table::TableState;

struct DummyRng;

impl RandomSource for DummyRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

type Service = TableService<InMemoryTableStore, DummyRng>;

fn service() -> Service {
    TableService::new(InMemoryTableStore::new(), DummyRng)
}

/// Стол 10/20 с двумя игроками по 1000; раздача начата.
fn heads_up<S: TableStore, R: RandomSource>(service: &TableService<S, R>) -> TableId {
    let table = service
        .create_table(TableConfig::new(Chips(10), Chips(20)).named("HU"))
        .expect("стол должен создаться");
    service.add_player(table.id, NewPlayer::new("P1", Chips(1000))).unwrap();
    service.add_player(table.id, NewPlayer::new("P2", Chips(1000))).unwrap();
    service.start_hand(table.id).unwrap();
    table.id
}

#[test]
fn service_runs_heads_up_preflop() {
    let service = service();
    let table_id = heads_up(&service);
    let state = service.get_state(table_id).unwrap();
    let (p1, p2) = (state.players[0].id, state.players[1].id);

    assert_eq!(state.table.status, TableStatus::Active);
    assert_eq!(state.table.current_pot, Chips(30));
    assert_eq!(state.table.current_player_id, Some(p1));

    service
        .apply_action(table_id, p1, ActionKind::Call(Chips(10)), Some(Street::Preflop))
        .unwrap();
    assert!(service.can_check(table_id, p2).unwrap());
    let out = service.apply_action(table_id, p2, ActionKind::Check, None).unwrap();

    assert_eq!(out.next_round, Some(Street::Flop));
    let state = service.get_state(table_id).unwrap();
    assert_eq!(state.table.community_cards.len(), 3);
    assert_eq!(state.table.current_pot, Chips(40));
}

#[test]
fn failed_operation_keeps_stored_state() {
    let service = service();
    let table_id = heads_up(&service);
    let before = service.get_state(table_id).unwrap();
    let p2 = before.players[1].id;

    let err = service.apply_action(table_id, p2, ActionKind::Check, None).unwrap_err();
    assert_eq!(err, EngineError::NotPlayersTurn(p2));
    assert_eq!(service.get_state(table_id).unwrap(), before);

    let err = service.set_community_cards(table_id, Vec::new(), Street::Flop).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCards);
    assert_eq!(service.get_state(table_id).unwrap(), before);
}

#[test]
fn unknown_table_is_not_found() {
    let service = service();
    let err = service.start_hand(42).unwrap_err();
    assert_eq!(err, EngineError::TableNotFound(42));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(service.get_state(42).is_err());
}

#[test]
fn ids_continue_after_stored_tables() {
    let store = Arc::new(InMemoryTableStore::new());
    let first = TableService::new(Arc::clone(&store), DummyRng);
    let table_id = heads_up(&first);
    let last_player = first.get_state(table_id).unwrap().players[1].id;

    let second = TableService::new(Arc::clone(&store), DummyRng);
    let table = second.create_table(TableConfig::new(Chips(5), Chips(10))).unwrap();
    assert!(table.id > table_id, "id стола не должен повторяться");
    let player = second.add_player(table.id, NewPlayer::new("P3", Chips(100))).unwrap();
    assert!(player.id > last_player);
    assert_eq!(store.table_ids(), vec![table_id, table.id]);
}

#[test]
fn concurrent_actions_on_one_table_apply_once() {
    let service = TableService::new(InMemoryTableStore::new(), DeterministicRng::from_u64(7));
    let table = service.create_table(TableConfig::new(Chips(10), Chips(20))).unwrap();
    let p1 = service.add_player(table.id, NewPlayer::new("P1", Chips(1000))).unwrap().id;
    service.add_player(table.id, NewPlayer::new("P2", Chips(1000))).unwrap();
    service.start_hand(table.id).unwrap();

    let results: Vec<Result<_, EngineError>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| service.apply_action(table.id, p1, ActionKind::Call(Chips(10)), None)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1, "ход применяется ровно один раз");
    let state = service.get_state(table.id).unwrap();
    assert_eq!(state.table.current_pot, Chips(40));
    assert_eq!(state.actions.len(), 1);
}

#[test]
fn different_tables_progress_in_parallel() {
    let service = TableService::new(InMemoryTableStore::new(), DeterministicRng::from_u64(11));

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let table = service.create_table(TableConfig::new(Chips(10), Chips(20))).unwrap();
                let p1 = service.add_player(table.id, NewPlayer::new("A", Chips(500))).unwrap().id;
                service.add_player(table.id, NewPlayer::new("B", Chips(500))).unwrap();
                service.start_hand(table.id).unwrap();
                service.apply_action(table.id, p1, ActionKind::Fold, None).unwrap();
                service.end_hand(table.id).unwrap();
            });
        }
    });

    let ids = service.table_ids();
    assert_eq!(ids.len(), 4);
    for id in ids {
        let state = service.get_state(id).unwrap();
        assert_eq!(state.table.hand_number, 2);
        assert_eq!(state.chips_in_play(), Chips(1000), "фишки не теряются");
    }
}

#[test]
fn system_rng_deals_distinct_cards() {
    let service = TableService::new(InMemoryTableStore::new(), SystemRng);
    let table_id = heads_up(&service);
    let state = service.get_state(table_id).unwrap();

    let cards = state.cards_in_play();
    assert_eq!(cards.len(), 4);
    assert!(cards.iter().enumerate().all(|(i, c)| !cards[..i].contains(c)));
}

#[test]
fn json_commands_drive_a_table() {
    let service = service();

    let created = execute_command_json(
        &service,
        r#"{"command":"create_table","config":{"name":"Live","max_seats":6,"small_blind":5,"big_blind":10,"deal_mode":"manual"}}"#,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&created).unwrap();
    assert_eq!(value["type"], "table");
    assert_eq!(value["data"]["deal_mode"], "manual");
    let table_id = value["data"]["table_id"].as_u64().unwrap();

    for name in ["Ann", "Bob"] {
        let cmd = Command::AddPlayer {
            table_id,
            name: name.to_string(),
            chips: Chips(300),
            position: None,
        };
        assert!(matches!(execute_command(&service, cmd).unwrap(), CommandResponse::Player(_)));
    }
    execute_command(&service, Command::StartHand { table_id }).unwrap();

    let state = service.get_state(table_id).unwrap();
    let ann = state.players[0].id;
    let resp = execute_command(
        &service,
        Command::SetHoleCards {
            table_id,
            player_id: ann,
            cards: vec!["A♠".to_string(), "10h".to_string()],
        },
    )
    .unwrap();
    match resp {
        CommandResponse::Player(p) => assert_eq!(p.hole_cards.map(|c| c.len()), Some(2)),
        other => panic!("ожидался ответ Player, получено {other:?}"),
    }

    let action = format!(
        r#"{{"command":"player_action","table_id":{table_id},"player_id":{ann},"action":{{"type":"call","amount":5}},"round":"preflop"}}"#
    );
    let resp = execute_command_json(&service, &action).unwrap();
    assert!(resp.contains(r#""type":"action""#));
}

#[test]
fn json_split_command_divides_pot() {
    let service = service();
    let table_id = heads_up(&service);
    let state = service.get_state(table_id).unwrap();
    let (p1, p2) = (state.players[0].id, state.players[1].id);

    let resp = execute_command_json(
        &service,
        &format!(r#"{{"command":"settle_split","table_id":{table_id},"winner_ids":[{p2},{p1}]}}"#),
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&resp).unwrap();
    assert_eq!(value["type"], "showdown");
    assert_eq!(value["data"]["pot"], 30);
    assert_eq!(value["data"]["payouts"][0]["player_id"], p2);
    assert_eq!(value["data"]["payouts"][0]["amount"], 15);

    let state = service.get_state(table_id).unwrap();
    assert_eq!(state.player(p1).unwrap().chips, Chips(1005));
    assert_eq!(state.player(p2).unwrap().chips, Chips(995));
    assert_eq!(state.table.status, TableStatus::HandCompleted);
}

#[test]
fn rejected_seating_does_not_consume_player_id() {
    let service = service();
    let table = service.create_table(TableConfig::new(Chips(10), Chips(20)).with_max_seats(2)).unwrap();
    let first = service.add_player(table.id, NewPlayer::new("A", Chips(500)).at(0)).unwrap();

    let err = service.add_player(table.id, NewPlayer::new("B", Chips(500)).at(0)).unwrap_err();
    assert_eq!(err, EngineError::SeatUnavailable(0));
    service.add_player(table.id, NewPlayer::new("B", Chips::ZERO)).unwrap_err();

    let second = service.add_player(table.id, NewPlayer::new("B", Chips(500))).unwrap();
    assert_eq!(second.id, first.id + 1, "нумерация без дыр");
    assert_eq!(
        service.add_player(table.id, NewPlayer::new("C", Chips(500))).unwrap_err(),
        EngineError::TableFull
    );
}

#[test]
fn api_errors_carry_kind() {
    let service = service();
    let table_id = heads_up(&service);
    let p1 = service.get_state(table_id).unwrap().players[0].id;

    let err = execute_command(&service, Command::StartHand { table_id: 999 }).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert_eq!(err.kind(), Some(ErrorKind::NotFound));

    let err = execute_command(
        &service,
        Command::SetHoleCards {
            table_id,
            player_id: p1,
            cards: vec!["Zz".to_string(), "Ah".to_string()],
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCards(_)));

    let err = execute_command(
        &service,
        Command::PlayerAction {
            table_id,
            player_id: p1,
            action: ActionKind::Check,
            round: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidAction(_)));

    let err = execute_command_json(&service, "{not json").unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
    assert_eq!(err.kind(), None);

    let json = serde_json::to_string(&ApiError::InvalidCards("x".into())).unwrap();
    assert_eq!(json, r#"{"kind":"invalid_cards","message":"x"}"#);
}

#[test]
fn snapshot_hides_other_players_cards() {
    let service = service();
    let table_id = heads_up(&service);
    let state = service.get_state(table_id).unwrap();
    let (p1, p2) = (state.players[0].id, state.players[1].id);

    let view = |viewer| match execute_query(&service, Query::GetState { table_id, viewer }).unwrap() {
        QueryResponse::Table(dto) => dto,
        other => panic!("ожидался снимок стола, получено {other:?}"),
    };

    let mine = view(Viewer::Player(p1));
    assert!(mine.players.iter().find(|p| p.player_id == p1).unwrap().hole_cards.is_some());
    assert!(mine.players.iter().find(|p| p.player_id == p2).unwrap().hole_cards.is_none());

    let spectator = view(Viewer::Spectator);
    assert!(spectator.players.iter().all(|p| p.hole_cards.is_none()));

    let operator = view(Viewer::Operator);
    assert!(operator.players.iter().all(|p| p.hole_cards.is_some()));
    assert_eq!(operator.current_pot, Chips(30));
}

#[test]
fn queries_list_tables_and_check_option() {
    let service = service();
    let table_id = heads_up(&service);
    let state = service.get_state(table_id).unwrap();

    match execute_query(&service, Query::ListTables).unwrap() {
        QueryResponse::Tables(list) => {
            assert_eq!(list.len(), 1);
            assert_eq!(list[0].name, "HU");
            assert_eq!(list[0].players, 2);
        }
        other => panic!("ожидался список столов, получено {other:?}"),
    }

    let resp = execute_query(
        &service,
        Query::CanCheck {
            table_id,
            player_id: state.players[0].id,
        },
    )
    .unwrap();
    assert!(matches!(resp, QueryResponse::CanCheck(false)));
}

#[test]
fn table_state_round_trips_through_json() {
    let service = service();
    let table_id = heads_up(&service);
    let state = service.get_state(table_id).unwrap();

    let json = state.to_json().unwrap();
    let restored = TableState::from_json(&json).unwrap();
    assert_eq!(restored, state);
}
