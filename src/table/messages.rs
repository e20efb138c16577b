//! Сообщения актора стола.

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::domain::{Chips, HandId, HandSummary, PlayerId, SeatIndex, Table, TableId};
use crate::engine::{EngineError, HandEvent, HandStatus, LegalActions, PlayerAction};

/// Сообщения, которые обрабатывает TableActor. Строго по одному за раз.
#[derive(Debug)]
pub enum TableMessage {
    /// Посадить игрока на пустое место (в раздаче он участвует со следующей).
    SeatPlayer {
        seat: SeatIndex,
        player_id: PlayerId,
        stack: Chips,
        response: oneshot::Sender<Result<(), EngineError>>,
    },

    /// Убрать игрока; возвращает его стек.
    UnseatPlayer {
        seat: SeatIndex,
        response: oneshot::Sender<Result<Chips, EngineError>>,
    },

    /// Запустить новую раздачу.
    StartHand {
        response: oneshot::Sender<Result<HandStatus, EngineError>>,
    },

    /// Действие игрока.
    SubmitAction {
        action: PlayerAction,
        response: oneshot::Sender<Result<ActionAck, EngineError>>,
    },

    /// Таймаут хода с номером `turn` (устаревший игнорируется).
    Timeout { turn: u64 },

    /// Снимок состояния стола.
    GetState {
        response: oneshot::Sender<TableSnapshot>,
    },

    /// Закрыть стол. Идущая раздача аннулируется.
    Close {
        response: oneshot::Sender<Option<HandSummary>>,
    },
}

/// Подтверждение принятого действия.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionAck {
    /// Ход перешёл к следующему месту.
    TurnAdvanced { next_seat: SeatIndex, turn: u64 },
    /// Раздача закончилась.
    HandFinished(HandSummary),
}

/// Событие стола для подписчиков.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableEvent {
    pub table_id: TableId,
    pub hand_id: HandId,
    pub event: HandEvent,
}

impl TableEvent {
    /// Можно ли показать событие зрителю. `viewer` – место смотрящего,
    /// `None` – сторонний наблюдатель (видит только публичные события).
    pub fn visible_to(&self, viewer: Option<SeatIndex>) -> bool {
        match self.event.kind.private_to() {
            Some(owner) => viewer == Some(owner),
            None => true,
        }
    }
}

/// Снимок состояния стола (только чтение).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub table: Table,
    pub hand_id: Option<HandId>,
    /// Чей ход и его номер.
    pub current_turn: Option<(SeatIndex, u64)>,
    pub legal_actions: Option<LegalActions>,
    pub pot_total: Chips,
    pub hands_played: u64,
}
