use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId, SeatIndex, Street, TableStatus};
use crate::engine::errors::EngineError;
use crate::engine::pot::{split_pot, Payout};
use crate::eval::{describe_hand, evaluate_hand, HandValue};
use crate::state::TableState;

/// Рука одного игрока на вскрытии.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShowdownHand {
    pub player_id: PlayerId,
    pub position: SeatIndex,
    pub hand: HandValue,
    pub description: String,
}

/// Итог раздачи: кому и сколько выплачено.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShowdownResult {
    pub hand_number: u64,
    /// Размер банка до выплаты.
    pub pot: Chips,
    pub payouts: Vec<Payout>,
    /// Все вскрытые руки, от сильнейшей к слабейшей.
    pub hands: Vec<ShowdownHand>,
    /// false — банк отдан без вскрытия.
    pub evaluated: bool,
}

impl ShowdownResult {
    pub fn winner_ids(&self) -> Vec<PlayerId> {
        self.payouts.iter().map(|p| p.player_id).collect()
    }
}

/// Хватает ли карт, чтобы вскрыть всех оставшихся.
pub fn can_evaluate(state: &TableState) -> bool {
    state.table.community_cards.len() == Street::River.board_size()
        && state.in_hand().all(|p| p.hole_cards.len() == 2)
}

/// Все, кроме одного, сбросили: он забирает банк без вскрытия.
pub fn settle_uncontested(state: &mut TableState) -> Result<ShowdownResult, EngineError> {
    let winner = state
        .in_hand()
        .next()
        .map(|p| p.id)
        .ok_or(EngineError::NotEnoughPlayers)?;

    let pot = state.table.current_pot;
    let payouts = vec![Payout {
        player_id: winner,
        amount: pot,
    }];
    pay_and_finish(state, &payouts)?;

    log::info!(
        "table {}: hand #{} won uncontested by player {} ({} chips)",
        state.id(),
        state.table.hand_number,
        winner,
        pot
    );

    Ok(ShowdownResult {
        hand_number: state.table.hand_number,
        pot,
        payouts,
        hands: Vec::new(),
        evaluated: false,
    })
}

/// Вскрытие: оцениваем руки всех оставшихся, весь банк уходит лучшей.
///
/// Сортировка стабильная, поэтому при точном равенстве банк получает
/// игрок с меньшей позицией.
pub fn settle_showdown(state: &mut TableState) -> Result<ShowdownResult, EngineError> {
    let board = state.table.community_cards.clone();

    let mut hands: Vec<ShowdownHand> = state
        .in_hand()
        .map(|p| {
            let hand = evaluate_hand(&p.hole_cards, &board);
            ShowdownHand {
                player_id: p.id,
                position: p.position,
                description: describe_hand(&hand),
                hand,
            }
        })
        .collect();

    if hands.is_empty() {
        return Err(EngineError::NotEnoughPlayers);
    }
    // Только стабильная сортировка: при равенстве первым остаётся меньшее место.
    hands.sort_by(|a, b| b.hand.cmp(&a.hand));

    let pot = state.table.current_pot;
    let payouts = vec![Payout {
        player_id: hands[0].player_id,
        amount: pot,
    }];
    pay_and_finish(state, &payouts)?;

    log::info!(
        "table {}: hand #{} showdown won by player {} with {} ({} chips)",
        state.id(),
        state.table.hand_number,
        hands[0].player_id,
        hands[0].description,
        pot
    );

    Ok(ShowdownResult {
        hand_number: state.table.hand_number,
        pot,
        payouts,
        hands,
        evaluated: true,
    })
}

/// Принудительный делёж банка между указанными игроками.
///
/// Повторы в списке игнорируются, порядок первого появления сохраняется.
pub fn settle_split(
    state: &mut TableState,
    winners: &[PlayerId],
) -> Result<ShowdownResult, EngineError> {
    if !state.table.hand_in_progress() {
        return Err(EngineError::NoActiveHand);
    }
    if winners.is_empty() {
        return Err(EngineError::NoWinners);
    }

    let mut unique: Vec<PlayerId> = Vec::with_capacity(winners.len());
    for &id in winners {
        if !state.player(id)?.is_in_hand() {
            return Err(EngineError::NotInHand(id));
        }
        if !unique.contains(&id) {
            unique.push(id);
        }
    }

    let pot = state.table.current_pot;
    let payouts = split_pot(pot, &unique);
    pay_and_finish(state, &payouts)?;

    log::info!(
        "table {}: hand #{} pot {} split between {:?}",
        state.id(),
        state.table.hand_number,
        pot,
        unique
    );

    Ok(ShowdownResult {
        hand_number: state.table.hand_number,
        pot,
        payouts,
        hands: Vec::new(),
        evaluated: false,
    })
}

/// Выплатить банк и закрыть раздачу.
fn pay_and_finish(state: &mut TableState, payouts: &[Payout]) -> Result<(), EngineError> {
    for payout in payouts {
        state.player_mut(payout.player_id)?.chips += payout.amount;
    }

    let table = &mut state.table;
    table.current_pot = Chips::ZERO;
    table.current_bet = Chips::ZERO;
    table.current_round = Street::Showdown;
    table.current_player_id = None;
    table.status = TableStatus::HandCompleted;
    Ok(())
}
