use crate::domain::{Chips, Player, PlayerId, Role, SeatIndex, Street};
use crate::engine::hand_history::{only_checks, raise_indices};
use crate::state::TableState;

/// Порядок хода на улице: игроки в раздаче с фишками, по позиции.
pub fn active_order(state: &TableState) -> Vec<&Player> {
    state.players.iter().filter(|p| p.can_act()).collect()
}

/// Должен ли игрок ещё ответить на текущий уровень ставки.
fn owes_response(player: &Player, table_bet: Chips) -> bool {
    !player.has_acted_this_round || player.current_bet < table_bet
}

/// Следующий ходящий после места `position`, по кругу.
///
/// Сам игрок на `position` мог уже выпасть из порядка (fold / all-in).
/// Пока кто-то должен ответить на ставку, уже ответившие пропускаются.
pub fn next_player_after(state: &TableState, position: SeatIndex) -> Option<PlayerId> {
    let order = active_order(state);
    if order.is_empty() {
        return None;
    }

    let start = order
        .iter()
        .position(|p| p.position > position)
        .unwrap_or(0);
    let table_bet = state.table.current_bet;

    (0..order.len())
        .map(|k| order[(start + k) % order.len()])
        .find(|p| owes_response(p, table_bet))
        .or_else(|| order.get(start).copied())
        .map(|p| p.id)
}

/// Первый ходящий на новой улице: small blind, а если он выбыл —
/// первый активный после него по кругу.
pub fn first_to_act(state: &TableState) -> Option<PlayerId> {
    let order = active_order(state);
    let first = order.first()?;

    match state.players.iter().find(|p| p.role == Role::SmallBlind) {
        Some(sb) if sb.can_act() => Some(sb.id),
        Some(sb) => order
            .iter()
            .find(|p| p.position > sb.position)
            .or(Some(first))
            .map(|p| p.id),
        None => Some(first.id),
    }
}

/// Завершён ли раунд ставок.
///
/// - никто не может ходить — завершён;
/// - ходить может один — завершён, если он уравнял ставку стола или уже ответил;
/// - иначе у всех ходящих одинаковая (максимальная) ставка и все ответили.
pub fn is_round_complete(state: &TableState) -> bool {
    let order = active_order(state);
    match order.as_slice() {
        [] => true,
        [only] => only.current_bet >= state.table.current_bet || only.has_acted_this_round,
        _ => {
            let max_bet = order
                .iter()
                .map(|p| p.current_bet)
                .max()
                .unwrap_or(Chips::ZERO);
            order
                .iter()
                .all(|p| p.current_bet == max_bet && p.has_acted_this_round)
        }
    }
}

/// Можно ли игроку сделать check.
///
/// Ставка игрока должна совпадать со ставкой стола, и при этом
/// либо на улице были только чеки, либо после последнего хода игрока
/// никто не повышал.
pub fn can_check(state: &TableState, player: &Player) -> bool {
    let table = &state.table;
    if !table.hand_in_progress() || table.current_round == Street::Showdown || !player.can_act() {
        return false;
    }
    if player.current_bet != table.current_bet {
        return false;
    }

    let round = state.actions.for_round(table.hand_number, table.current_round);
    if only_checks(&round) {
        return true;
    }

    let opening_bet = if table.current_round == Street::Preflop {
        table.big_blind()
    } else {
        Chips::ZERO
    };
    let raises = raise_indices(&round, opening_bet);

    match round.iter().rposition(|r| r.player_id == player.id) {
        Some(last_own) => raises.iter().all(|&idx| idx <= last_own),
        None => raises.is_empty(),
    }
}

/// После повышения все остальные снова должны ответить.
pub fn reopen_action(state: &mut TableState, raiser: PlayerId) {
    for p in state.players.iter_mut() {
        if p.id != raiser && p.can_act() {
            p.has_acted_this_round = false;
        }
    }
}
