use crate::domain::{Chips, Player};
use crate::engine::actions::ActionKind;
use crate::engine::betting::can_check;
use crate::engine::errors::EngineError;
use crate::state::TableState;

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
///
/// Возвращает количество фишек, которое уйдёт в банк.
pub fn validate_action(
    state: &TableState,
    player: &Player,
    action: &ActionKind,
) -> Result<Chips, EngineError> {
    if !player.can_act() {
        return Err(EngineError::PlayerCannotAct(player.id));
    }

    let table = &state.table;
    let stack = player.chips;
    let to_call = diff_to_call(player, table.current_bet);

    match *action {
        ActionKind::Fold => Ok(Chips::ZERO),

        ActionKind::Check => {
            if can_check(state, player) {
                Ok(Chips::ZERO)
            } else {
                Err(EngineError::CannotCheck)
            }
        }

        ActionKind::Call(amount) => {
            if to_call.is_zero() {
                return Err(EngineError::CannotCall);
            }
            // Короткий стек коллирует всем, что есть.
            let expected = to_call.min(stack);
            if amount != expected {
                return Err(EngineError::WrongCallAmount {
                    expected,
                    actual: amount,
                });
            }
            Ok(amount)
        }

        ActionKind::Raise(amount) => {
            if amount.is_zero() {
                return Err(EngineError::ZeroAmount);
            }
            if amount > stack {
                return Err(EngineError::NotEnoughChips);
            }

            let new_bet = player.current_bet + amount;
            if new_bet <= table.current_bet {
                return Err(EngineError::RaiseTooSmall);
            }

            // Минимальное повышение — BB; весь стек можно поставить и меньше.
            let raise_size = new_bet - table.current_bet;
            if amount < stack && raise_size < table.big_blind() {
                return Err(EngineError::RaiseTooSmall);
            }

            Ok(amount)
        }

        ActionKind::AllIn => Ok(stack),
    }
}

/// Сколько фишек нужно добавить игроку, чтобы уравнять текущую ставку.
pub fn diff_to_call(player: &Player, table_bet: Chips) -> Chips {
    table_bet.saturating_sub(player.current_bet)
}
