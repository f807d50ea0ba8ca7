use serde::{Deserialize, Serialize};

use crate::domain::{
    Card, Chips, DealMode, PlayerId, Role, SeatIndex, Street, TableId, TableStatus,
};
use crate::state::TableState;

/// DTO игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerDto {
    pub player_id: PlayerId,
    pub name: String,
    pub position: SeatIndex,
    pub role: Role,
    pub chips: Chips,
    pub current_bet: Chips,
    /// Карманные карты – только для самого игрока или оператора.
    pub hole_cards: Option<Vec<Card>>,
    pub is_active: bool,
    pub is_folded: bool,
    pub is_all_in: bool,
    pub has_acted_this_round: bool,
}

/// DTO стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSnapshotDto {
    pub table_id: TableId,
    pub name: String,
    pub status: TableStatus,
    pub deal_mode: DealMode,
    pub max_seats: u8,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub hand_number: u64,
    pub current_round: Street,
    pub current_pot: Chips,
    pub current_bet: Chips,
    pub dealer_position: usize,
    /// Чей сейчас ход.
    pub current_player_id: Option<PlayerId>,
    pub community_cards: Vec<Card>,
    pub players: Vec<PlayerDto>,
    /// Сколько записей в журнале действий.
    pub actions_logged: usize,
}

/// Короткая строка для списка столов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSummaryDto {
    pub table_id: TableId,
    pub name: String,
    pub status: TableStatus,
    pub players: usize,
    pub hand_number: u64,
}

impl From<&TableState> for TableSummaryDto {
    fn from(state: &TableState) -> Self {
        Self {
            table_id: state.table.id,
            name: state.table.config.name.clone(),
            status: state.table.status,
            players: state.players.len(),
            hand_number: state.table.hand_number,
        }
    }
}
