use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{Card, NewPlayer, Player, PlayerId, Street, Table, TableConfig, TableId};
use crate::engine::actions::{ActionKind, PlayerAction};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{self, ActionOutcome, EndHandOutcome, ManualSettlement};
use crate::engine::showdown::ShowdownResult;
use crate::engine::RandomSource;
use crate::infra::ids::IdGenerator;
use crate::infra::persistence::TableStore;
use crate::state::TableState;

/// Общий RNG сервиса: блокируется только на время одного перемешивания,
/// так что разные столы не ждут друг друга.
struct SharedRng<'a, R>(&'a Mutex<R>);

impl<R: RandomSource> RandomSource for SharedRng<'_, R> {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        self.0.lock().shuffle(slice);
    }
}

/// Сервис столов поверх хранилища.
///
/// Каждая операция — единица работы: взять мьютекс стола, загрузить
/// агрегат, выполнить переход на копии и сохранить её только при успехе.
/// Запросы к одному столу выполняются строго по очереди, к разным — параллельно.
pub struct TableService<S: TableStore, R: RandomSource> {
    store: S,
    rng: Mutex<R>,
    ids: IdGenerator,
    locks: Mutex<HashMap<TableId, Arc<Mutex<()>>>>,
}

impl<S: TableStore, R: RandomSource> TableService<S, R> {
    /// Сервис над хранилищем; нумерация id продолжается после уже сохранённых столов.
    pub fn new(store: S, rng: R) -> Self {
        let mut last_table = 0;
        let mut last_player = 0;
        for id in store.table_ids() {
            last_table = last_table.max(id);
            if let Some(state) = store.load(id) {
                if let Some(max) = state.players.iter().map(|p| p.id).max() {
                    last_player = last_player.max(max);
                }
            }
        }

        Self {
            store,
            rng: Mutex::new(rng),
            ids: IdGenerator::starting_after(last_table, last_player),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create_table(&self, config: TableConfig) -> Result<Table, EngineError> {
        let id = self.ids.next_table_id();
        let state = game_loop::create_table(id, config).map_err(|e| {
            log::warn!("create_table rejected: {}", e);
            e
        })?;

        let lock = self.table_lock(id);
        let _guard = lock.lock();
        self.store.save(&state);
        Ok(state.table)
    }

    /// Посадить игрока. Id выдаётся только после проверки места,
    /// так что отклонённая посадка не оставляет дыр в нумерации.
    pub fn add_player(&self, table_id: TableId, new_player: NewPlayer) -> Result<Player, EngineError> {
        self.transact(table_id, "add_player", |state, _| {
            game_loop::seat_for_new_player(state, &new_player)?;
            let player_id = self.ids.next_player_id();
            game_loop::add_player(state, player_id, new_player)
        })
    }

    pub fn start_hand(&self, table_id: TableId) -> Result<Table, EngineError> {
        self.transact(table_id, "start_hand", |state, rng| {
            game_loop::start_hand(state, rng)?;
            Ok(state.table.clone())
        })
    }

    pub fn apply_action(
        &self,
        table_id: TableId,
        player_id: PlayerId,
        kind: ActionKind,
        round: Option<Street>,
    ) -> Result<ActionOutcome, EngineError> {
        self.transact(table_id, "apply_action", |state, rng| {
            game_loop::apply_action(state, PlayerAction::new(player_id, kind), round, rng)
        })
    }

    pub fn deal_community_cards(&self, table_id: TableId, count: usize) -> Result<Vec<Card>, EngineError> {
        self.transact(table_id, "deal_community_cards", |state, rng| {
            game_loop::deal_community_cards(state, count, rng)
        })
    }

    pub fn set_community_cards(
        &self,
        table_id: TableId,
        cards: Vec<Card>,
        round: Street,
    ) -> Result<Vec<Card>, EngineError> {
        self.transact(table_id, "set_community_cards", |state, rng| {
            game_loop::set_community_cards(state, cards, round, rng)
        })
    }

    pub fn set_hole_cards(
        &self,
        table_id: TableId,
        player_id: PlayerId,
        cards: Vec<Card>,
    ) -> Result<Player, EngineError> {
        self.transact(table_id, "set_hole_cards", |state, rng| {
            game_loop::set_hole_cards(state, player_id, cards, rng)
        })
    }

    pub fn can_check(&self, table_id: TableId, player_id: PlayerId) -> Result<bool, EngineError> {
        let state = self.get_state(table_id)?;
        game_loop::can_check(&state, player_id)
    }

    pub fn settle_manually(&self, table_id: TableId, winner: PlayerId) -> Result<ManualSettlement, EngineError> {
        self.transact(table_id, "settle_manually", |state, _| {
            game_loop::settle_manually(state, winner)
        })
    }

    pub fn settle_split(&self, table_id: TableId, winners: &[PlayerId]) -> Result<ShowdownResult, EngineError> {
        self.transact(table_id, "settle_split", |state, _| {
            game_loop::settle_split(state, winners)
        })
    }

    pub fn end_hand(&self, table_id: TableId) -> Result<EndHandOutcome, EngineError> {
        self.transact(table_id, "end_hand", |state, rng| game_loop::end_hand(state, rng))
    }

    pub fn set_button_position(&self, table_id: TableId, player_id: PlayerId) -> Result<Table, EngineError> {
        self.transact(table_id, "set_button_position", |state, _| {
            game_loop::set_button_position(state, player_id)?;
            Ok(state.table.clone())
        })
    }

    pub fn cancel_table(&self, table_id: TableId) -> Result<Table, EngineError> {
        self.transact(table_id, "cancel_table", |state, _| {
            game_loop::cancel_table(state)?;
            Ok(state.table.clone())
        })
    }

    /// Снимок стола целиком.
    pub fn get_state(&self, table_id: TableId) -> Result<TableState, EngineError> {
        let lock = self.table_lock(table_id);
        let _guard = lock.lock();
        self.store
            .load(table_id)
            .ok_or(EngineError::TableNotFound(table_id))
    }

    pub fn table_ids(&self) -> Vec<TableId> {
        self.store.table_ids()
    }

    /// Мьютекс конкретного стола; создаётся при первом обращении.
    fn table_lock(&self, table_id: TableId) -> Arc<Mutex<()>> {
        self.locks.lock().entry(table_id).or_default().clone()
    }

    fn transact<T, F>(&self, table_id: TableId, op: &str, f: F) -> Result<T, EngineError>
    where
        F: FnOnce(&mut TableState, &mut SharedRng<'_, R>) -> Result<T, EngineError>,
    {
        let lock = self.table_lock(table_id);
        let _guard = lock.lock();

        let result = self
            .store
            .load(table_id)
            .ok_or(EngineError::TableNotFound(table_id))
            .and_then(|mut draft| {
                // Хранилище отдаёт копию; в него попадает только успешный результат.
                let value = f(&mut draft, &mut SharedRng(&self.rng))?;
                self.store.save(&draft);
                Ok(value)
            });

        if let Err(e) = &result {
            log::warn!("table {}: {} rejected: {}", table_id, op, e);
        }
        result
    }
}
