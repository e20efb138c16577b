//! Актор одного стола: отдельная tokio-задача с mpsc-инбоксом.
//!
//! Все изменения состояния стола идут через один цикл `run`, поэтому действия,
//! таймауты, запросы и закрытие никогда не обрабатываются одновременно.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{interval_at, Duration, Instant};

use super::messages::{ActionAck, TableEvent, TableMessage, TableSnapshot};
use super::registry::RegistryError;
use crate::domain::{Chips, Deck, HandSummary, PlayerId, Seat, SeatIndex, Table, TableId};
use crate::engine::{
    apply_action, apply_timeout, start_hand_with_deck, void_hand, EngineError, HandEngine,
    HandStatus, PlayerAction,
};
use crate::infra::{IdGenerator, RngSeed};
use crate::time_ctrl::{TimeoutState, TurnClock};

/// Размер инбокса актора.
const INBOX_CAPACITY: usize = 100;
/// Размер буфера рассылки событий.
const EVENTS_CAPACITY: usize = 1024;
/// Шаг логического таймера хода.
const TICK_SECS: u32 = 1;

/// Хэндл для отправки сообщений актору стола.
#[derive(Clone, Debug)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
    events: broadcast::Sender<TableEvent>,
    table_id: TableId,
}

impl TableHandle {
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Подписаться на события стола (с текущего момента).
    ///
    /// В канал идут все события раздачи, включая карманные карты каждого
    /// места. Транспорт до клиента обязан фильтровать их через
    /// `TableEvent::visible_to`.
    pub fn subscribe(&self) -> broadcast::Receiver<TableEvent> {
        self.events.subscribe()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Отправить сообщение без ожидания ответа.
    pub async fn send(&self, message: TableMessage) -> Result<(), RegistryError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| RegistryError::TableClosed(self.table_id))
    }

    /// Отправить запрос и дождаться ответа актора.
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> TableMessage,
    ) -> Result<T, RegistryError> {
        let (tx, rx) = oneshot::channel();
        self.send(make(tx)).await?;
        rx.await.map_err(|_| RegistryError::TableClosed(self.table_id))
    }

    pub async fn seat_player(
        &self,
        seat: SeatIndex,
        player_id: PlayerId,
        stack: Chips,
    ) -> Result<(), RegistryError> {
        self.request(|response| TableMessage::SeatPlayer {
            seat,
            player_id,
            stack,
            response,
        })
        .await?
        .map_err(RegistryError::from)
    }

    pub async fn unseat_player(&self, seat: SeatIndex) -> Result<Chips, RegistryError> {
        self.request(|response| TableMessage::UnseatPlayer { seat, response })
            .await?
            .map_err(RegistryError::from)
    }

    pub async fn start_hand(&self) -> Result<HandStatus, RegistryError> {
        self.request(|response| TableMessage::StartHand { response })
            .await?
            .map_err(RegistryError::from)
    }

    pub async fn submit_action(&self, action: PlayerAction) -> Result<ActionAck, RegistryError> {
        self.request(|response| TableMessage::SubmitAction { action, response })
            .await?
            .map_err(RegistryError::from)
    }

    pub async fn timeout(&self, turn: u64) -> Result<(), RegistryError> {
        self.send(TableMessage::Timeout { turn }).await
    }

    pub async fn state(&self) -> Result<TableSnapshot, RegistryError> {
        self.request(|response| TableMessage::GetState { response })
            .await
    }

    pub async fn close(&self) -> Result<Option<HandSummary>, RegistryError> {
        self.request(|response| TableMessage::Close { response })
            .await
    }
}

/// Актор, владеющий столом и текущей раздачей.
pub struct TableActor {
    table: Table,
    engine: Option<HandEngine>,
    /// Базовый seed стола: колода каждой раздачи выводится из него.
    base_seed: RngSeed,
    ids: Arc<IdGenerator>,
    hands_played: u64,
    clock: TurnClock,
    inbox: mpsc::Receiver<TableMessage>,
    events: broadcast::Sender<TableEvent>,
    /// Сколько событий текущей раздачи уже разослано.
    published: usize,
    is_closed: bool,
}

impl TableActor {
    /// Создать актора и хэндл к нему. Актор нужно запустить через `tokio::spawn(actor.run())`.
    pub fn new(table: Table, base_seed: RngSeed, ids: Arc<IdGenerator>) -> (Self, TableHandle) {
        let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);
        let (events, _) = broadcast::channel(EVENTS_CAPACITY);

        let handle = TableHandle {
            sender,
            events: events.clone(),
            table_id: table.id,
        };

        let actor = Self {
            table,
            engine: None,
            base_seed,
            ids,
            hands_played: 0,
            clock: TurnClock::new(),
            inbox,
            events,
            published: 0,
            is_closed: false,
        };

        (actor, handle)
    }

    /// Цикл обработки сообщений и тиков таймера.
    pub async fn run(mut self) {
        info!("стол {} '{}' запущен", self.table.id, self.table.name);

        let period = Duration::from_secs(u64::from(TICK_SECS));
        let mut ticker = interval_at(Instant::now() + period, period);

        loop {
            tokio::select! {
                message = self.inbox.recv() => {
                    match message {
                        Some(message) => self.handle_message(message),
                        // Все хэндлы отброшены – закрываемся.
                        None => {
                            self.close();
                        }
                    }
                    if self.is_closed {
                        break;
                    }
                }

                _ = ticker.tick() => {
                    self.tick();
                }
            }
        }

        info!("стол {} '{}' закрыт", self.table.id, self.table.name);
    }

    fn handle_message(&mut self, message: TableMessage) {
        match message {
            TableMessage::SeatPlayer {
                seat,
                player_id,
                stack,
                response,
            } => {
                let _ = response.send(self.seat_player(seat, player_id, stack));
            }

            TableMessage::UnseatPlayer { seat, response } => {
                let _ = response.send(self.unseat_player(seat));
            }

            TableMessage::StartHand { response } => {
                let _ = response.send(self.start_hand());
            }

            TableMessage::SubmitAction { action, response } => {
                let _ = response.send(self.submit_action(action));
            }

            TableMessage::Timeout { turn } => self.on_timeout(turn),

            TableMessage::GetState { response } => {
                let _ = response.send(self.snapshot());
            }

            TableMessage::Close { response } => {
                let summary = self.close();
                let _ = response.send(summary);
            }
        }
    }

    fn seat_player(&mut self, seat: SeatIndex, player_id: PlayerId, stack: Chips) -> Result<(), EngineError> {
        let slot = self
            .table
            .seats
            .get_mut(seat as usize)
            .ok_or(EngineError::InvalidSeat(seat))?;
        if slot.is_some() {
            return Err(EngineError::SeatOccupied(seat));
        }

        let mut player = Seat::new(player_id, stack);
        // Фишек нет или раздача уже идёт – ждёт следующей раздачи.
        player.reset_for_hand();
        *slot = Some(player);
        info!("стол {}: игрок {player_id} сел на место {seat} со стеком {stack}", self.table.id);
        Ok(())
    }

    fn unseat_player(&mut self, seat: SeatIndex) -> Result<Chips, EngineError> {
        let in_hand = self
            .engine
            .as_ref()
            .is_some_and(|e| e.order.contains(&seat));
        if in_hand {
            return Err(EngineError::HandAlreadyInProgress);
        }

        let player = self
            .table
            .seats
            .get_mut(seat as usize)
            .ok_or(EngineError::InvalidSeat(seat))?
            .take()
            .ok_or(EngineError::InvalidSeat(seat))?;
        info!("стол {}: игрок {} встал с места {seat}", self.table.id, player.player_id);
        Ok(player.stack)
    }

    fn start_hand(&mut self) -> Result<HandStatus, EngineError> {
        if self.engine.is_some() {
            return Err(EngineError::HandAlreadyInProgress);
        }

        let hand_id = self.ids.next_hand_id();
        let seed = self
            .base_seed
            .derive(self.table.id, hand_id, self.hands_played);
        let engine = start_hand_with_deck(&mut self.table, Deck::new_shuffled(&seed), hand_id)?;

        self.hands_played += 1;
        self.published = 0;
        self.engine = Some(engine);
        Ok(self.after_change())
    }

    fn submit_action(&mut self, action: PlayerAction) -> Result<ActionAck, EngineError> {
        let engine = self.engine.as_mut().ok_or(EngineError::NoActiveHand)?;
        apply_action(&mut self.table, engine, action)?;

        match self.after_change() {
            HandStatus::Finished(summary) => Ok(ActionAck::HandFinished(summary)),
            HandStatus::Ongoing => {
                let (next_seat, turn) = self
                    .engine
                    .as_ref()
                    .and_then(HandEngine::current_turn)
                    .ok_or(EngineError::Internal("раздача идёт, но нет текущего хода"))?;
                Ok(ActionAck::TurnAdvanced { next_seat, turn })
            }
        }
    }

    fn on_timeout(&mut self, turn: u64) {
        let Some(engine) = self.engine.as_mut() else {
            debug!("стол {}: таймаут {turn} без раздачи", self.table.id);
            return;
        };

        match apply_timeout(&mut self.table, engine, turn) {
            Ok(Some(_)) => {
                self.after_change();
            }
            Ok(None) => {}
            Err(e) => warn!("стол {}: авто-действие по таймауту отклонено: {e}", self.table.id),
        }
    }

    /// Тик логического таймера: истёкший ход превращается в таймаут.
    fn tick(&mut self) {
        if let TimeoutState::TimedOut { seat, turn } = self.clock.elapse(TICK_SECS) {
            debug!("стол {}: время хода {turn} места {seat} вышло", self.table.id);
            self.on_timeout(turn);
        }
    }

    /// Закрыть стол: идущая раздача аннулируется, стеки возвращаются.
    fn close(&mut self) -> Option<HandSummary> {
        let summary = self.engine.as_mut().map(|engine| {
            void_hand(&mut self.table, engine, "стол закрыт")
        });
        if summary.is_some() {
            self.after_change();
        }
        self.clock.clear();
        self.is_closed = true;
        summary
    }

    /// После любого изменения раздачи: разослать новые события, перезапустить
    /// таймер хода, выбросить законченную раздачу.
    fn after_change(&mut self) -> HandStatus {
        let Some(engine) = self.engine.as_ref() else {
            self.clock.clear();
            return HandStatus::Ongoing;
        };

        for event in engine.history.since(self.published) {
            // Ошибка только при отсутствии подписчиков.
            let _ = self.events.send(TableEvent {
                table_id: self.table.id,
                hand_id: engine.hand_id,
                event: event.clone(),
            });
        }
        self.published = engine.history.len();

        if let Some(summary) = engine.summary().cloned() {
            self.engine = None;
            self.published = 0;
            self.clock.clear();
            return HandStatus::Finished(summary);
        }

        match engine.current_turn() {
            Some((seat, turn)) => self.clock.start_turn(seat, turn, &self.table.config.time),
            None => self.clock.clear(),
        }
        HandStatus::Ongoing
    }

    fn snapshot(&self) -> TableSnapshot {
        let mut table = self.table.clone();
        // Карманные карты приватны.
        for seat in table.seats.iter_mut().flatten() {
            seat.hole_cards.clear();
        }

        TableSnapshot {
            table,
            hand_id: self.engine.as_ref().map(|e| e.hand_id),
            current_turn: self.engine.as_ref().and_then(HandEngine::current_turn),
            legal_actions: self
                .engine
                .as_ref()
                .and_then(|e| e.legal_actions(&self.table)),
            pot_total: self
                .engine
                .as_ref()
                .map(|e| e.pot.total())
                .unwrap_or_default(),
            hands_played: self.hands_played,
        }
    }
}
