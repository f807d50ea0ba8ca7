use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::TableId;
use crate::state::TableState;

/// Абстракция хранилища столов.
///
/// Стол сохраняется целиком — вместе с игроками и журналом действий,
/// поэтому игрок или запись не могут ссылаться на чужой стол.
pub trait TableStore: Send + Sync {
    /// Загрузить стол.
    fn load(&self, id: TableId) -> Option<TableState>;

    /// Сохранить стол (вставка или замена).
    fn save(&self, state: &TableState);

    /// Id всех столов, по возрастанию.
    fn table_ids(&self) -> Vec<TableId>;
}

impl<T: TableStore + ?Sized> TableStore for Arc<T> {
    fn load(&self, id: TableId) -> Option<TableState> {
        (**self).load(id)
    }

    fn save(&self, state: &TableState) {
        (**self).save(state)
    }

    fn table_ids(&self) -> Vec<TableId> {
        (**self).table_ids()
    }
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemoryTableStore {
    tables: RwLock<HashMap<TableId, TableState>>,
}

impl InMemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }
}

impl TableStore for InMemoryTableStore {
    fn load(&self, id: TableId) -> Option<TableState> {
        self.tables.read().get(&id).cloned()
    }

    fn save(&self, state: &TableState) {
        self.tables.write().insert(state.id(), state.clone());
    }

    fn table_ids(&self) -> Vec<TableId> {
        let mut ids: Vec<TableId> = self.tables.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
