use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::TableId;
use crate::engine::EngineError;
use crate::table::RegistryError;

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON или нет суммы у bet).
    #[error("неверный запрос: {0}")]
    BadRequest(String),

    #[error("стол {0} не найден")]
    TableNotFound(TableId),

    #[error("стол {0} закрыт")]
    TableClosed(TableId),

    /// Команда отклонена движком; `code` – стабильный код причины.
    #[error("{code}: {message}")]
    Rejected { code: String, message: String },

    /// Внутренняя ошибка сервера.
    #[error("внутренняя ошибка: {0}")]
    Internal(String),
}

impl ApiError {
    /// Код для клиента.
    pub fn code(&self) -> &str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::TableNotFound(_) => "TABLE_NOT_FOUND",
            ApiError::TableClosed(_) => "TABLE_CLOSED",
            ApiError::Rejected { code, .. } => code,
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    fn rejected(code: &str, err: &EngineError) -> Self {
        ApiError::Rejected {
            code: code.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match &err {
            EngineError::IllegalAction(reason) => ApiError::rejected(reason.code(), &err),
            EngineError::InsufficientSeats => ApiError::rejected("INSUFFICIENT_SEATS", &err),
            EngineError::HandAlreadyInProgress => ApiError::rejected("HAND_IN_PROGRESS", &err),
            EngineError::NoActiveHand => ApiError::rejected("NO_ACTIVE_HAND", &err),
            EngineError::InvalidSeat(_) => ApiError::rejected("INVALID_SEAT", &err),
            EngineError::SeatOccupied(_) => ApiError::rejected("SEAT_OCCUPIED", &err),
            EngineError::EmptyDeck
            | EngineError::ChipConservation { .. }
            | EngineError::Eval(_)
            | EngineError::Internal(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::TableNotFound(id) => ApiError::TableNotFound(id),
            RegistryError::TableClosed(id) => ApiError::TableClosed(id),
            RegistryError::Engine(e) => e.into(),
            RegistryError::Config(e) => ApiError::BadRequest(e.to_string()),
        }
    }
}
