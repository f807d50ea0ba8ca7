use serde::{Deserialize, Serialize};

use crate::domain::{ActionRecord, ActionType, Chips, Street};

/// Журнал действий стола за всё время. Только дополняется.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ActionLog {
    pub records: Vec<ActionRecord>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id следующей записи (1, 2, 3…).
    pub fn next_id(&self) -> u64 {
        self.records.len() as u64 + 1
    }

    pub fn push(&mut self, record: ActionRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionRecord> {
        self.records.iter()
    }

    /// Действия конкретной улицы конкретной раздачи, в порядке совершения.
    pub fn for_round(&self, hand_number: u64, round: Street) -> Vec<&ActionRecord> {
        self.records
            .iter()
            .filter(|r| r.hand_number == hand_number && r.round == round)
            .collect()
    }
}

/// Индексы записей улицы, которые подняли уровень ставки.
///
/// `opening_bet` — уровень до первого действия (BB на префлопе, 0 дальше).
pub fn raise_indices(round_actions: &[&ActionRecord], opening_bet: Chips) -> Vec<usize> {
    let mut level = opening_bet;
    let mut raises = Vec::new();
    for (idx, record) in round_actions.iter().enumerate() {
        if record.table_bet > level {
            raises.push(idx);
            level = record.table_bet;
        }
    }
    raises
}

/// На улице были только чеки (или вообще ничего).
pub fn only_checks(round_actions: &[&ActionRecord]) -> bool {
    round_actions
        .iter()
        .all(|r| r.action_type == ActionType::Check)
}
