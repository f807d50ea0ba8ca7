use crate::domain::{PlayerId, Role};
use crate::engine::errors::EngineError;
use crate::state::TableState;

/// Роли по смещению от кнопки.
pub const ROLE_TABLE: [Role; 7] = [
    Role::Button,
    Role::SmallBlind,
    Role::BigBlind,
    Role::Utg,
    Role::Utg1,
    Role::Utg2,
    Role::Cutoff,
];

/// Хедз-ап: кнопка ставит small blind, соперник — big blind.
pub const HEADS_UP_ROLES: [Role; 2] = [Role::SmallBlind, Role::BigBlind];

/// Роль места со смещением `offset` от кнопки при `seated` игроках с фишками.
pub fn role_for_offset(offset: usize, seated: usize) -> Role {
    let table: &[Role] = if seated == 2 { &HEADS_UP_ROLES } else { &ROLE_TABLE };
    table.get(offset).copied().unwrap_or(Role::Regular)
}

/// Расставить роли: i-й игрок с фишками (по позиции) получает
/// ROLE_TABLE[(i - dealer_position) mod n]. Игроки без фишек — Regular.
pub fn setup_positions(state: &mut TableState) {
    let n = state.players_with_chips();
    if n == 0 {
        for p in state.players.iter_mut() {
            p.role = Role::Regular;
        }
        return;
    }

    state.table.dealer_position %= n;
    let dealer = state.table.dealer_position;

    let mut i = 0;
    for p in state.players.iter_mut() {
        if p.chips.is_zero() {
            p.role = Role::Regular;
            continue;
        }
        p.role = role_for_offset((i + n - dealer) % n, n);
        i += 1;
    }
}

/// Сдвинуть кнопку на одно место среди игроков с фишками.
pub fn rotate_dealer_button(state: &mut TableState) {
    let n = state.players_with_chips();
    if n == 0 {
        return;
    }
    state.table.dealer_position = (state.table.dealer_position + 1) % n;
}

/// Индекс игрока среди игроков с фишками — то, что хранится в `dealer_position`.
pub fn button_index_of(state: &TableState, player_id: PlayerId) -> Result<usize, EngineError> {
    let player = state.player(player_id)?;
    if player.chips.is_zero() {
        return Err(EngineError::NotInHand(player_id));
    }
    Ok(state
        .players
        .iter()
        .filter(|p| !p.chips.is_zero())
        .take_while(|p| p.id != player_id)
        .count())
}

/// Id игрока с данной ролью, если такой есть.
pub fn player_with_role(state: &TableState, role: Role) -> Option<PlayerId> {
    state.players.iter().find(|p| p.role == role).map(|p| p.id)
}
