use serde::{Deserialize, Serialize};

use crate::api::dto::{PlayerDto, TableSnapshotDto};
use crate::domain::{Player, PlayerId};
use crate::state::TableState;

/// Кто смотрит на стол: от этого зависит, чьи карманные карты видны.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "player_id")]
pub enum Viewer {
    /// Оператор живого стола видит всё.
    #[default]
    Operator,
    Player(PlayerId),
    /// Зритель не видит ничьих карт.
    Spectator,
}

impl Viewer {
    pub fn sees_cards_of(&self, player_id: PlayerId) -> bool {
        match *self {
            Viewer::Operator => true,
            Viewer::Player(id) => id == player_id,
            Viewer::Spectator => false,
        }
    }
}

pub fn map_player_to_dto(player: &Player, viewer: Viewer) -> PlayerDto {
    PlayerDto {
        player_id: player.id,
        name: player.name.clone(),
        position: player.position,
        role: player.role,
        chips: player.chips,
        current_bet: player.current_bet,
        hole_cards: if viewer.sees_cards_of(player.id) {
            Some(player.hole_cards.clone())
        } else {
            None
        },
        is_active: player.is_active,
        is_folded: player.is_folded,
        is_all_in: player.is_all_in,
        has_acted_this_round: player.has_acted_this_round,
    }
}

/// Снимок стола для клиента.
pub fn map_table_to_dto(state: &TableState, viewer: Viewer) -> TableSnapshotDto {
    let table = &state.table;
    TableSnapshotDto {
        table_id: table.id,
        name: table.config.name.clone(),
        status: table.status,
        deal_mode: table.config.deal_mode,
        max_seats: table.max_seats(),
        small_blind: table.small_blind(),
        big_blind: table.big_blind(),
        hand_number: table.hand_number,
        current_round: table.current_round,
        current_pot: table.current_pot,
        current_bet: table.current_bet,
        dealer_position: table.dealer_position,
        current_player_id: table.current_player_id,
        community_cards: table.community_cards.clone(),
        players: state
            .players
            .iter()
            .map(|p| map_player_to_dto(p, viewer))
            .collect(),
        actions_logged: state.actions.len(),
    }
}
