//! Движок одного стола техасского холдема.
//!
//! Слои:
//! - `domain` — карты, фишки, игроки, стол;
//! - `eval` — оценка лучшей пятикарточной руки;
//! - `engine` — ставки, улицы, вскрытие и `TableService`;
//! - `infra` — RNG, id, хранилище, маппинги;
//! - `api` — команды, запросы и DTO для внешнего слоя.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod state;

pub use engine::{EngineError, TableService};
pub use state::TableState;
