use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::player::Role;
use crate::domain::{PlayerId, SeatIndex};

/// Улица (раунд) раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Следующая улица; у Showdown следующей нет.
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => Some(Street::Showdown),
            Street::Showdown => None,
        }
    }

    /// Сколько общих карт лежит на столе к началу торговли на этой улице.
    pub fn board_size(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown => 5,
        }
    }

    /// Сколько новых карт открывается при переходе на эту улицу.
    pub fn cards_dealt(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::Showdown => 0,
        }
    }
}

/// Тип действия в логе (без суммы).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ActionType {
    Check,
    Call,
    Raise,
    Fold,
    AllIn,
}

/// Запись в журнале действий. Журнал только дополняется.
///
/// Движку журнал нужен для проверки check; всё остальное —
/// для внешней аналитики.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRecord {
    pub id: u64,
    pub hand_number: u64,
    pub round: Street,
    pub player_id: PlayerId,
    pub position: SeatIndex,
    pub role: Role,
    pub action_type: ActionType,
    pub amount: Chips,
    /// Банк после действия.
    pub pot_size: Chips,
    /// Уровень ставки стола после действия.
    pub table_bet: Chips,
    pub hole_cards: Vec<Card>,
    pub community_cards: Vec<Card>,
}
