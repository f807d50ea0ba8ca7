use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{PlayerId, TableId};

/// Индекс места за столом (0..max_seats-1).
pub type SeatIndex = u8;

/// Максимум мест за одним столом.
pub const MAX_SEATS_LIMIT: u8 = 10;

/// Статус стола.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    /// Стол создан, идёт рассадка.
    Waiting,
    /// Идёт раздача.
    Active,
    /// Банк выплачен, ждём команды на следующую раздачу.
    HandCompleted,
    /// Игра окончена: фишки остались меньше чем у двух игроков.
    Completed,
    Cancelled,
}

/// Кто поставляет карты.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DealMode {
    /// Движок сам тасует и раздаёт карманные и общие карты.
    #[default]
    Automatic,
    /// Оператор вводит карты руками (помощь за живым столом).
    Manual,
}

/// Конфиг стола: лимиты, число мест и режим раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    pub name: String,
    /// Максимальное количество мест за столом (2–10).
    pub max_seats: u8,
    pub small_blind: Chips,
    pub big_blind: Chips,
    #[serde(default)]
    pub deal_mode: DealMode,
}

impl TableConfig {
    /// Конфиг по умолчанию: 9 мест, автоматическая раздача.
    pub fn new(small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            name: "Table".to_string(),
            max_seats: 9,
            small_blind,
            big_blind,
            deal_mode: DealMode::Automatic,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_max_seats(mut self, max_seats: u8) -> Self {
        self.max_seats = max_seats;
        self
    }

    pub fn with_deal_mode(mut self, deal_mode: DealMode) -> Self {
        self.deal_mode = deal_mode;
        self
    }

    /// Проверка лимитов: 0 < SB < BB, 2..=10 мест.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.small_blind.is_zero() {
            return Err("small blind должен быть больше нуля");
        }
        if self.big_blind <= self.small_blind {
            return Err("big blind должен быть больше small blind");
        }
        if self.max_seats < 2 || self.max_seats > MAX_SEATS_LIMIT {
            return Err("число мест должно быть от 2 до 10");
        }
        Ok(())
    }
}

/// Основное состояние стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: TableId,
    pub config: TableConfig,
    pub status: TableStatus,

    /// Общий банк текущей раздачи.
    pub current_pot: Chips,
    /// Уровень ставки, который надо уравнять в текущем раунде.
    pub current_bet: Chips,
    pub current_round: Street,

    /// Индекс кнопки в списке игроков с фишками (по возрастанию позиции).
    pub dealer_position: usize,
    /// Ручная установка кнопки, которая применится к следующей раздаче.
    pub pending_button: Option<PlayerId>,

    /// Общие карты борда (0–5 карт).
    pub community_cards: Vec<Card>,

    /// Чей сейчас ход.
    pub current_player_id: Option<PlayerId>,

    /// Номер раздачи, 0 — ещё ни одной не было.
    pub hand_number: u64,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(id: TableId, config: TableConfig) -> Self {
        Self {
            id,
            config,
            status: TableStatus::Waiting,
            current_pot: Chips::ZERO,
            current_bet: Chips::ZERO,
            current_round: Street::Preflop,
            dealer_position: 0,
            pending_button: None,
            community_cards: Vec::new(),
            current_player_id: None,
            hand_number: 0,
        }
    }

    pub fn small_blind(&self) -> Chips {
        self.config.small_blind
    }

    pub fn big_blind(&self) -> Chips {
        self.config.big_blind
    }

    pub fn max_seats(&self) -> u8 {
        self.config.max_seats
    }

    pub fn is_manual(&self) -> bool {
        self.config.deal_mode == DealMode::Manual
    }

    /// Раздача в процессе: можно ходить и сдавать карты.
    pub fn hand_in_progress(&self) -> bool {
        self.status == TableStatus::Active
    }
}
