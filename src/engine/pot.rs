use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId};

/// Выплата одному игроку.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payout {
    pub player_id: PlayerId,
    pub amount: Chips,
}

/// Поделить банк между победителями: каждому floor(pot / n),
/// остаток по одной фишке первым `pot mod n` победителям по порядку списка.
pub fn split_pot(pot: Chips, winners: &[PlayerId]) -> Vec<Payout> {
    if winners.is_empty() {
        return Vec::new();
    }

    let n = winners.len() as u64;
    let share = pot.0 / n;
    let remainder = pot.0 % n;

    winners
        .iter()
        .enumerate()
        .map(|(idx, &player_id)| Payout {
            player_id,
            amount: Chips(share + u64::from((idx as u64) < remainder)),
        })
        .collect()
}
