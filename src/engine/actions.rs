use serde::{Deserialize, Serialize};

use crate::domain::{ActionType, Chips, PlayerId};

/// Действие игрока. Сумма есть только там, где она имеет смысл.
///
/// `Call`/`Raise` несут количество фишек, которое игрок докладывает
/// в этом действии (а не итоговый размер ставки).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "amount", rename_all = "kebab-case")]
pub enum ActionKind {
    Check,
    Call(Chips),
    Raise(Chips),
    Fold,
    /// All-in – поставить весь стек.
    AllIn,
}

impl ActionKind {
    pub fn action_type(&self) -> ActionType {
        match self {
            ActionKind::Check => ActionType::Check,
            ActionKind::Call(_) => ActionType::Call,
            ActionKind::Raise(_) => ActionType::Raise,
            ActionKind::Fold => ActionType::Fold,
            ActionKind::AllIn => ActionType::AllIn,
        }
    }
}

/// Конкретное действие игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    pub player_id: PlayerId,
    pub kind: ActionKind,
}

impl PlayerAction {
    pub fn new(player_id: PlayerId, kind: ActionKind) -> Self {
        Self { player_id, kind }
    }
}
