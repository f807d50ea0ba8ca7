use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{PlayerId, TableId};

/// Генерация ID на основе монотонных счётчиков.
///
/// Id игроков сквозные для всех столов, чтобы `PlayerId` был уникален
/// без привязки к столу.
#[derive(Debug)]
pub struct IdGenerator {
    table_counter: AtomicU64,
    player_counter: AtomicU64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1 для всех сущностей.
    pub fn new() -> Self {
        Self::starting_after(0, 0)
    }

    /// Продолжить нумерацию после уже занятых id (например, после загрузки
    /// столов из хранилища).
    pub fn starting_after(last_table: TableId, last_player: PlayerId) -> Self {
        Self {
            table_counter: AtomicU64::new(last_table + 1),
            player_counter: AtomicU64::new(last_player + 1),
        }
    }

    #[inline]
    pub fn next_table_id(&self) -> TableId {
        self.table_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_player_id(&self) -> PlayerId {
        self.player_counter.fetch_add(1, Ordering::Relaxed)
    }
}
