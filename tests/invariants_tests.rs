//! Инварианты движка на случайных раздачах (proptest).
//!
//! - банк после хода = банк до хода + сумма хода;
//! - фишки в стеках + банк не меняются за раздачу;
//! - ставка стола — максимум ставок игроков (стеки больше блайндов);
//! - split_pot раздаёт ровно весь банк.

use holdem_table::domain::{Chips, NewPlayer, PlayerId, TableConfig, TableStatus};
use holdem_table::engine::{
    add_player, apply_action, create_table, split_pot, start_hand, ActionKind, PlayerAction,
};
use holdem_table::infra::DeterministicRng;
use holdem_table::TableState;
use proptest::prelude::*;

fn started_table(stacks: &[u64], rng: &mut DeterministicRng) -> TableState {
    let config = TableConfig::new(Chips(10), Chips(20)).with_max_seats(10);
    let mut state = create_table(1, config).expect("конфиг валиден");
    for (i, &stack) in stacks.iter().enumerate() {
        let id = i as PlayerId + 1;
        add_player(&mut state, id, NewPlayer::new(format!("P{id}"), Chips(stack)))
            .expect("игрок должен сесть");
    }
    start_hand(&mut state, rng).expect("раздача должна начаться");
    state
}

/// Выбрать заведомо допустимый ход по байту из стратегии.
fn pick_action(state: &TableState, player_id: PlayerId, choice: u8) -> ActionKind {
    let p = state.player(player_id).expect("текущий игрок за столом");
    let owed = state.table.current_bet.saturating_sub(p.current_bet);
    let call_or_check = if owed.is_zero() {
        ActionKind::Check
    } else {
        ActionKind::Call(owed.min(p.chips))
    };

    match choice % 4 {
        0 if !owed.is_zero() => ActionKind::Fold,
        2 if p.chips > owed + state.table.big_blind() => {
            ActionKind::Raise(owed + state.table.big_blind())
        }
        3 => ActionKind::AllIn,
        _ => call_or_check,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn pot_and_chips_are_conserved(
        seed in any::<u64>(),
        stacks in proptest::collection::vec(30u64..2_000, 2..=6),
        choices in proptest::collection::vec(any::<u8>(), 1..120),
    ) {
        let mut rng = DeterministicRng::from_u64(seed);
        let mut state = started_table(&stacks, &mut rng);
        let total: Chips = stacks.iter().map(|&s| Chips(s)).sum();
        prop_assert_eq!(state.chips_in_play(), total);

        for choice in choices {
            if state.table.status != TableStatus::Active {
                break;
            }
            let Some(id) = state.table.current_player_id else { break };

            let pot_before = state.table.current_pot;
            let kind = pick_action(&state, id, choice);
            let out = apply_action(&mut state, PlayerAction::new(id, kind), None, &mut rng)
                .map_err(|e| TestCaseError::fail(format!("{kind:?}: {e}")))?;

            prop_assert_eq!(out.record.pot_size, pot_before + out.record.amount);
            if out.showdown.is_none() {
                prop_assert_eq!(state.table.current_pot, pot_before + out.record.amount);
                let max_bet = state.players.iter().map(|p| p.current_bet).max().unwrap_or(Chips::ZERO);
                prop_assert_eq!(state.table.current_bet, max_bet);
            } else {
                prop_assert_eq!(state.table.current_pot, Chips::ZERO);
            }
            prop_assert_eq!(state.chips_in_play(), total);
        }
    }

    #[test]
    fn split_pot_pays_out_everything(pot in 0u64..100_000, winners in 1usize..=9) {
        let ids: Vec<PlayerId> = (1..=winners as PlayerId).collect();
        let payouts = split_pot(Chips(pot), &ids);

        let paid: Chips = payouts.iter().map(|p| p.amount).sum();
        prop_assert_eq!(paid, Chips(pot));
        let max = payouts.iter().map(|p| p.amount.0).max().unwrap_or(0);
        let min = payouts.iter().map(|p| p.amount.0).min().unwrap_or(0);
        prop_assert!(max - min <= 1);
        // Остаток достаётся первым в списке.
        prop_assert!(payouts.windows(2).all(|w| w[0].amount >= w[1].amount));
    }
}
