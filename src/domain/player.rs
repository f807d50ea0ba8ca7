use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{PlayerId, SeatIndex, TableId};

/// Роль места в текущей раздаче. Пересчитывается каждую раздачу
/// от позиции игрока относительно кнопки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Button,
    #[serde(rename = "sb")]
    SmallBlind,
    #[serde(rename = "bb")]
    BigBlind,
    Utg,
    #[serde(rename = "utg+1")]
    Utg1,
    #[serde(rename = "utg+2")]
    Utg2,
    Cutoff,
    /// Нейтральная роль: лишние места и игроки без фишек.
    Regular,
}

/// Данные для посадки нового игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPlayer {
    pub name: String,
    pub chips: Chips,
    /// Конкретное место; None — первое свободное.
    pub position: Option<SeatIndex>,
}

impl NewPlayer {
    pub fn new(name: impl Into<String>, chips: Chips) -> Self {
        Self {
            name: name.into(),
            chips,
            position: None,
        }
    }

    pub fn at(mut self, position: SeatIndex) -> Self {
        self.position = Some(position);
        self
    }
}

/// Состояние игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub table_id: TableId,
    pub name: String,
    /// Место за столом, назначается один раз и не меняется.
    pub position: SeatIndex,
    pub role: Role,
    /// Стек. Переносится между раздачами.
    pub chips: Chips,
    /// Ставка в текущем раунде.
    pub current_bet: Chips,
    /// Карманные карты: 0 или ровно 2.
    pub hole_cards: Vec<Card>,
    /// Участвует в игре (есть фишки на старте раздачи).
    pub is_active: bool,
    pub is_folded: bool,
    pub is_all_in: bool,
    /// Ответил ли игрок на текущий уровень ставки в этом раунде.
    pub has_acted_this_round: bool,
}

impl Player {
    pub fn new(id: PlayerId, table_id: TableId, position: SeatIndex, name: String, chips: Chips) -> Self {
        Self {
            id,
            table_id,
            name,
            position,
            role: Role::Regular,
            chips,
            current_bet: Chips::ZERO,
            hole_cards: Vec::new(),
            is_active: !chips.is_zero(),
            is_folded: false,
            is_all_in: false,
            has_acted_this_round: false,
        }
    }

    /// Игрок ещё претендует на банк.
    pub fn is_in_hand(&self) -> bool {
        self.is_active && !self.is_folded
    }

    /// Игрок может делать ходы: в раздаче и есть фишки.
    pub fn can_act(&self) -> bool {
        self.is_in_hand() && !self.chips.is_zero()
    }

    /// Сбросить всё, что относится к раздаче. Стек сохраняется.
    pub fn reset_for_hand(&mut self) {
        self.current_bet = Chips::ZERO;
        self.hole_cards.clear();
        self.is_folded = false;
        self.is_all_in = false;
        self.has_acted_this_round = false;
        self.is_active = !self.chips.is_zero();
    }
}
