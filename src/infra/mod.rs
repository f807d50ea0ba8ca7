//! Инфраструктурный слой вокруг покерного движка:
//! - генерация ID;
//! - RNG-реализации для движка;
//! - хранилище столов;
//! - маппинги domain -> API.

pub mod ids;
pub mod mapping;
pub mod persistence;
pub mod rng;

pub use ids::*;
pub use mapping::*;
pub use persistence::*;
pub use rng::*;
