//! Агрегат одного стола: сам стол, его игроки и журнал действий.
//!
//! Именно этот агрегат загружается и сохраняется целиком
//! за одну операцию, так что игроки и действия всегда ссылаются на свой стол.

use serde::{Deserialize, Serialize};

use crate::domain::{Card, Chips, Player, PlayerId, Table, TableId};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::ActionLog;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableState {
    pub table: Table,
    /// Игроки, отсортированные по позиции.
    pub players: Vec<Player>,
    pub actions: ActionLog,
}

impl TableState {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            players: Vec::new(),
            actions: ActionLog::new(),
        }
    }

    pub fn id(&self) -> TableId {
        self.table.id
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, EngineError> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(EngineError::PlayerNotFound(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, EngineError> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(EngineError::PlayerNotFound(id))
    }

    /// Посадить игрока, сохраняя порядок по позиции.
    pub fn insert_player(&mut self, player: Player) {
        let idx = self
            .players
            .iter()
            .position(|p| p.position > player.position)
            .unwrap_or(self.players.len());
        self.players.insert(idx, player);
    }

    /// Все карты в игре: карманные всех игроков + борд.
    pub fn cards_in_play(&self) -> Vec<Card> {
        self.players
            .iter()
            .flat_map(|p| p.hole_cards.iter().copied())
            .chain(self.table.community_cards.iter().copied())
            .collect()
    }

    /// Игроки, которые ещё претендуют на банк.
    pub fn in_hand(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_in_hand())
    }

    pub fn in_hand_count(&self) -> usize {
        self.in_hand().count()
    }

    /// Сколько игроков за столом ещё с фишками.
    pub fn players_with_chips(&self) -> usize {
        self.players.iter().filter(|p| !p.chips.is_zero()).count()
    }

    /// Фишки в стеках + банк. Внутри раздачи не меняется.
    pub fn chips_in_play(&self) -> Chips {
        self.players.iter().map(|p| p.chips).sum::<Chips>() + self.table.current_pot
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
