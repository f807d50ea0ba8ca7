use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Card, Chips, PlayerId, SeatIndex, Street, TableId, TableStatus};

/// Класс ошибки — то, во что внешний слой превращает ответ клиенту.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidAction,
    InvalidCards,
    InsufficientPlayers,
}

/// Ошибки движка покера.
///
/// Любая ошибка возвращается до изменения состояния стола.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Стол {0} не найден")]
    TableNotFound(TableId),

    #[error("Игрок {0} не найден за столом")]
    PlayerNotFound(PlayerId),

    #[error("Некорректный конфиг стола: {0}")]
    InvalidConfig(&'static str),

    #[error("Стол в статусе {actual:?}, ожидался {expected:?}")]
    WrongStatus {
        expected: TableStatus,
        actual: TableStatus,
    },

    #[error("Стол в статусе {actual:?}, операция допустима в {allowed:?}")]
    StatusNotAllowed {
        allowed: &'static [TableStatus],
        actual: TableStatus,
    },

    #[error("За столом нет свободных мест")]
    TableFull,

    #[error("Место {0} занято или не существует")]
    SeatUnavailable(SeatIndex),

    #[error("Нельзя сесть за стол без фишек")]
    EmptyStack,

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Сейчас не ход игрока с id={0}")]
    NotPlayersTurn(PlayerId),

    #[error("Игрок {0} не может действовать (сфолдил, в олл-ине или выбыл)")]
    PlayerCannotAct(PlayerId),

    #[error("Действие для улицы {requested:?}, а на столе {actual:?}")]
    RoundMismatch { requested: Street, actual: Street },

    #[error("Невозможно выполнить check – нужно хотя бы уравнять ставку")]
    CannotCheck,

    #[error("Невозможно выполнить call – нет ставки для уравнивания")]
    CannotCall,

    #[error("Сумма call должна быть {expected}, передано {actual}")]
    WrongCallAmount { expected: Chips, actual: Chips },

    #[error("Сумма действия должна быть больше нуля")]
    ZeroAmount,

    #[error("Недостаточно фишек для этой ставки")]
    NotEnoughChips,

    #[error("Размер рейза слишком мал")]
    RaiseTooSmall,

    #[error("Игрок {0} не претендует на банк")]
    NotInHand(PlayerId),

    #[error("Нужно {expected} карт, передано {actual}")]
    WrongCardCount { expected: usize, actual: usize },

    #[error("Карта {0} уже в игре")]
    DuplicateCard(Card),

    #[error("В колоде не осталось {0} карт")]
    DeckExhausted(usize),

    #[error("Общие карты для улицы {0:?} сейчас выложить нельзя")]
    BoardOutOfOrder(Street),

    #[error("Недостаточно игроков с фишками для раздачи")]
    NotEnoughPlayers,

    #[error("Не указан ни один победитель")]
    NoWinners,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        use EngineError::*;

        match self {
            TableNotFound(_) | PlayerNotFound(_) => ErrorKind::NotFound,
            WrongCardCount { .. } | DuplicateCard(_) | DeckExhausted(_) | BoardOutOfOrder(_) => {
                ErrorKind::InvalidCards
            }
            NotEnoughPlayers => ErrorKind::InsufficientPlayers,
            InvalidConfig(_)
            | WrongStatus { .. }
            | StatusNotAllowed { .. }
            | TableFull
            | SeatUnavailable(_)
            | EmptyStack
            | NoActiveHand
            | NotPlayersTurn(_)
            | PlayerCannotAct(_)
            | RoundMismatch { .. }
            | CannotCheck
            | CannotCall
            | WrongCallAmount { .. }
            | ZeroAmount
            | NotEnoughChips
            | RaiseTooSmall
            | NotInHand(_)
            | NoWinners => ErrorKind::InvalidAction,
        }
    }
}
