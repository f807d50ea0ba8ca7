//! Тесты раунда ставок.
//!
//! Проверяем:
//! - блайнды и первый ход (хедз-ап и 3 игрока);
//! - call / raise / check / fold и их валидацию;
//! - повторное открытие торговли после рейза;
//! - предикат завершения раунда и переход улиц;
//! - отклонённый ход не меняет состояние.

use holdem_table::domain::{Chips, NewPlayer, PlayerId, Role, Street, TableConfig};
use holdem_table::engine::betting::is_round_complete;
use holdem_table::engine::game_loop::ActionOutcome;
use holdem_table::engine::{
    add_player, apply_action, can_check, create_table, start_hand, ActionKind, EngineError,
    PlayerAction, RandomSource,
};
use holdem_table::TableState;

/// RNG без перемешивания: карты идут в порядке колоды.
struct DummyRng;

impl RandomSource for DummyRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

/// Стол 10/20 с игроками id = 1..=n на местах 0..n-1, раздача начата.
fn started_table(stacks: &[u64]) -> TableState {
    let mut state = create_table(1, TableConfig::new(Chips(10), Chips(20))).expect("конфиг валиден");
    for (i, &stack) in stacks.iter().enumerate() {
        let id = i as PlayerId + 1;
        add_player(&mut state, id, NewPlayer::new(format!("P{id}"), Chips(stack)))
            .expect("игрок должен сесть");
    }
    start_hand(&mut state, &mut DummyRng).expect("раздача должна начаться");
    state
}

fn act(state: &mut TableState, player_id: PlayerId, kind: ActionKind) -> Result<ActionOutcome, EngineError> {
    apply_action(state, PlayerAction::new(player_id, kind), None, &mut DummyRng)
}

#[test]
fn heads_up_call_and_check_moves_to_flop() {
    let mut state = started_table(&[1000, 1000]);

    let p1 = state.player(1).unwrap();
    let p2 = state.player(2).unwrap();
    assert_eq!(p1.role, Role::SmallBlind);
    assert_eq!((p1.chips, p1.current_bet), (Chips(990), Chips(10)));
    assert_eq!(p2.role, Role::BigBlind);
    assert_eq!((p2.chips, p2.current_bet), (Chips(980), Chips(20)));
    assert_eq!(state.table.current_pot, Chips(30));
    assert_eq!(state.table.current_bet, Chips(20));
    assert_eq!(state.table.current_player_id, Some(1), "первым ходит SB");

    let out = act(&mut state, 1, ActionKind::Call(Chips(10))).unwrap();
    assert_eq!((out.player.chips, out.player.current_bet), (Chips(980), Chips(20)));
    assert_eq!(state.table.current_pot, Chips(40));
    assert!(!out.round_complete, "BB ещё не ответил");
    assert_eq!(out.next_player, Some(2));

    let out = act(&mut state, 2, ActionKind::Check).unwrap();
    assert!(out.round_complete);
    assert_eq!(out.next_round, Some(Street::Flop));
    assert_eq!(state.table.current_round, Street::Flop);
    assert_eq!(state.table.community_cards.len(), 3);
    assert_eq!(state.table.current_bet, Chips::ZERO);
    assert!(state.players.iter().all(|p| p.current_bet.is_zero()), "ставки обнулены");
    assert_eq!(state.table.current_pot, Chips(40));
    assert_eq!(state.table.current_player_id, Some(1), "на флопе первым ходит SB");
}

#[test]
fn three_handed_preflop_starts_after_big_blind() {
    let state = started_table(&[1000, 1000, 1000]);

    assert_eq!(state.player(1).unwrap().role, Role::Button);
    assert_eq!(state.player(2).unwrap().role, Role::SmallBlind);
    assert_eq!(state.player(3).unwrap().role, Role::BigBlind);
    assert_eq!(state.table.current_player_id, Some(1));

    assert!(!can_check(&state, 1).unwrap(), "кнопка должна уравнять BB");
    assert!(can_check(&state, 3).unwrap(), "у BB есть опция check");
}

#[test]
fn raise_and_calls_close_the_round() {
    let mut state = started_table(&[1000, 1000, 1000]);

    let out = act(&mut state, 1, ActionKind::Raise(Chips(60))).unwrap();
    assert_eq!(state.table.current_bet, Chips(60));
    assert_eq!(out.record.table_bet, Chips(60));
    assert_eq!(out.next_player, Some(2));

    act(&mut state, 2, ActionKind::Call(Chips(50))).unwrap();
    let out = act(&mut state, 3, ActionKind::Call(Chips(40))).unwrap();

    assert!(out.round_complete);
    assert_eq!(state.table.current_round, Street::Flop);
    assert_eq!(state.table.current_pot, Chips(180));
    assert_eq!(state.table.current_player_id, Some(2), "первым на флопе ходит SB");
}

#[test]
fn check_allowed_only_while_nobody_bet() {
    let mut state = started_table(&[1000, 1000, 1000]);
    act(&mut state, 1, ActionKind::Call(Chips(20))).unwrap();
    act(&mut state, 2, ActionKind::Call(Chips(10))).unwrap();
    act(&mut state, 3, ActionKind::Check).unwrap();
    assert_eq!(state.table.current_round, Street::Flop);

    act(&mut state, 2, ActionKind::Check).unwrap();
    assert!(can_check(&state, 3).unwrap(), "на улице были только чеки");

    act(&mut state, 3, ActionKind::Raise(Chips(40))).unwrap();
    assert_eq!(state.table.current_player_id, Some(1));
    assert!(!can_check(&state, 1).unwrap());
    assert_eq!(act(&mut state, 1, ActionKind::Check).unwrap_err(), EngineError::CannotCheck);

    act(&mut state, 1, ActionKind::Call(Chips(40))).unwrap();
    assert_eq!(state.table.current_player_id, Some(2), "SB должен ответить на рейз");
    assert!(!can_check(&state, 2).unwrap());

    let out = act(&mut state, 2, ActionKind::Fold).unwrap();
    assert!(out.round_complete);
    assert_eq!(state.table.current_round, Street::Turn);
    assert_eq!(state.table.community_cards.len(), 4);
}

#[test]
fn raise_reopens_action_for_caller() {
    let mut state = started_table(&[1000, 1000]);
    act(&mut state, 1, ActionKind::Call(Chips(10))).unwrap();

    let out = act(&mut state, 2, ActionKind::Raise(Chips(40))).unwrap();
    assert!(!out.round_complete);
    assert_eq!(state.table.current_bet, Chips(60));
    assert!(!state.player(1).unwrap().has_acted_this_round, "после рейза SB снова должен ответить");
    assert_eq!(out.next_player, Some(1));

    assert_eq!(act(&mut state, 1, ActionKind::Check).unwrap_err(), EngineError::CannotCheck);

    let out = act(&mut state, 1, ActionKind::Call(Chips(40))).unwrap();
    assert!(out.round_complete);
    assert_eq!(state.table.current_round, Street::Flop);
    assert_eq!(state.table.current_pot, Chips(120));
}

#[test]
fn raise_size_is_validated() {
    let mut state = started_table(&[1000, 1000]);

    assert_eq!(act(&mut state, 1, ActionKind::Raise(Chips(0))).unwrap_err(), EngineError::ZeroAmount);
    assert_eq!(act(&mut state, 1, ActionKind::Raise(Chips(10))).unwrap_err(), EngineError::RaiseTooSmall);
    assert_eq!(
        act(&mut state, 1, ActionKind::Raise(Chips(25))).unwrap_err(),
        EngineError::RaiseTooSmall,
        "повышение на 15 меньше BB"
    );
    assert_eq!(act(&mut state, 1, ActionKind::Raise(Chips(2000))).unwrap_err(), EngineError::NotEnoughChips);

    let out = act(&mut state, 1, ActionKind::Raise(Chips(30))).unwrap();
    assert_eq!(out.player.current_bet, Chips(40));
    assert_eq!(state.table.current_bet, Chips(40));
}

#[test]
fn short_all_in_raise_must_still_be_answered() {
    let mut state = started_table(&[1000, 35]);
    act(&mut state, 1, ActionKind::Call(Chips(10))).unwrap();

    let out = act(&mut state, 2, ActionKind::Raise(Chips(15))).unwrap();
    assert!(out.player.is_all_in, "весь стек ушёл в банк");
    assert!(!out.round_complete, "SB должен ответить на олл-ин");
    assert_eq!(out.next_player, Some(1));

    let out = act(&mut state, 1, ActionKind::Call(Chips(15))).unwrap();
    assert!(out.round_complete);
    let result = out.showdown.expect("раздача доигрывается до вскрытия");
    assert!(result.evaluated);
    assert_eq!(state.table.community_cards.len(), 5);

    // Одинаковые руки: банк уходит игроку с меньшей позицией.
    assert_eq!(result.winner_ids(), vec![1]);
    assert_eq!(state.player(1).unwrap().chips, Chips(1035));
    assert_eq!(state.player(2).unwrap().chips, Chips::ZERO);
    assert_eq!(state.table.current_pot, Chips::ZERO);
}

#[test]
fn call_amount_must_match_what_is_owed() {
    let mut state = started_table(&[1000, 1000]);

    assert_eq!(
        act(&mut state, 1, ActionKind::Call(Chips(5))).unwrap_err(),
        EngineError::WrongCallAmount {
            expected: Chips(10),
            actual: Chips(5),
        }
    );

    act(&mut state, 1, ActionKind::Call(Chips(10))).unwrap();
    act(&mut state, 2, ActionKind::Check).unwrap();
    assert_eq!(act(&mut state, 1, ActionKind::Call(Chips(0))).unwrap_err(), EngineError::CannotCall);
}

#[test]
fn rejected_actions_leave_state_unchanged() {
    let mut state = started_table(&[1000, 1000]);
    let before = state.clone();

    assert_eq!(act(&mut state, 2, ActionKind::Check).unwrap_err(), EngineError::NotPlayersTurn(2));
    assert_eq!(act(&mut state, 9, ActionKind::Fold).unwrap_err(), EngineError::PlayerNotFound(9));
    assert_eq!(
        apply_action(
            &mut state,
            PlayerAction::new(1, ActionKind::Call(Chips(10))),
            Some(Street::Flop),
            &mut DummyRng
        )
        .unwrap_err(),
        EngineError::RoundMismatch {
            requested: Street::Flop,
            actual: Street::Preflop,
        }
    );
    act(&mut state, 1, ActionKind::Raise(Chips(15))).unwrap_err();

    assert_eq!(state, before, "отклонённые ходы не должны менять стол");
}

#[test]
fn round_completion_requires_everyone_to_respond() {
    let mut state = started_table(&[1000, 1000, 1000]);
    assert!(!is_round_complete(&state));

    act(&mut state, 1, ActionKind::Call(Chips(20))).unwrap();
    assert!(!is_round_complete(&state), "SB ставит меньше максимума");

    act(&mut state, 2, ActionKind::Call(Chips(10))).unwrap();
    assert!(!is_round_complete(&state), "BB ещё не ответил");

    let out = act(&mut state, 3, ActionKind::Check).unwrap();
    assert!(out.round_complete);
}

#[test]
fn action_log_records_every_move() {
    let mut state = started_table(&[1000, 1000]);
    act(&mut state, 1, ActionKind::Call(Chips(10))).unwrap();
    let out = act(&mut state, 2, ActionKind::Check).unwrap();

    assert_eq!(state.actions.len(), 2);
    assert_eq!(out.record.id, 2);
    assert_eq!(out.record.round, Street::Preflop);
    assert_eq!(out.record.pot_size, Chips(40));
    assert_eq!(out.record.role, Role::BigBlind);
    assert_eq!(out.record.hole_cards.len(), 2);
}
