use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::CardParseError;
use crate::engine::{EngineError, ErrorKind};

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ApiError {
    /// Стол или игрок не найден.
    #[error("{0}")]
    NotFound(String),

    /// Действие не может быть выполнено в текущем состоянии.
    #[error("{0}")]
    InvalidAction(String),

    /// Карты битые, повторяются или уже в игре.
    #[error("{0}")]
    InvalidCards(String),

    /// Не хватает игроков с фишками.
    #[error("{0}")]
    InsufficientPlayers(String),

    /// Неправильные входные данные (например, битый JSON).
    #[error("Некорректный запрос: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// Класс ошибки движка; у `BadRequest` его нет.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ApiError::NotFound(_) => Some(ErrorKind::NotFound),
            ApiError::InvalidAction(_) => Some(ErrorKind::InvalidAction),
            ApiError::InvalidCards(_) => Some(ErrorKind::InvalidCards),
            ApiError::InsufficientPlayers(_) => Some(ErrorKind::InsufficientPlayers),
            ApiError::BadRequest(_) => None,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::NotFound => ApiError::NotFound(message),
            ErrorKind::InvalidAction => ApiError::InvalidAction(message),
            ErrorKind::InvalidCards => ApiError::InvalidCards(message),
            ErrorKind::InsufficientPlayers => ApiError::InsufficientPlayers(message),
        }
    }
}

impl From<CardParseError> for ApiError {
    fn from(err: CardParseError) -> Self {
        ApiError::InvalidCards(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
