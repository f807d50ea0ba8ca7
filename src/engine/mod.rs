//! Покерный движок одного стола: ставки, переход улиц, раздача карт, вскрытие.
//!
//! Все переходы — функции над `&mut TableState`:
//!   - `start_hand` – первая раздача за столом
//!   - `apply_action` – применить ход игрока
//!   - `end_hand` – закрыть раздачу и начать следующую
//!
//! `TableService` оборачивает их в единицу работы над хранилищем.

pub mod actions;
pub mod betting;
pub mod dealer;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod showdown;
pub mod table_manager;
pub mod validation;

pub use actions::{ActionKind, PlayerAction};
pub use errors::{EngineError, ErrorKind};
pub use game_loop::{
    add_player, apply_action, cancel_table, can_check, create_table, deal_community_cards,
    end_hand, seat_for_new_player, set_button_position, set_community_cards, set_hole_cards, settle_manually,
    settle_split, start_hand, ActionOutcome, EndHandOutcome, ManualSettlement,
};
pub use hand_history::ActionLog;
pub use pot::{split_pot, Payout};
pub use showdown::{ShowdownHand, ShowdownResult};
pub use table_manager::TableService;

/// Источник случайности для движка.
/// Реализации — в infra (обёртки над `rand`), в тестах — заглушки.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
