//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основная функция:
//!   `evaluate_hand(hole, board) -> HandValue`

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate_5card_hand, evaluate_hand};
pub use hand_rank::{describe_hand, HandCategory, HandValue};
