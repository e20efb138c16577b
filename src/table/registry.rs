//! Реестр столов: table id -> хэндл актора.
//!
//! Реестр – обычное значение, которое создаёт и держит вызывающий код.
//! Глобальных синглтонов нет.

use std::collections::HashMap;
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};

use super::actor::{TableActor, TableHandle};
use super::messages::{ActionAck, TableEvent, TableSnapshot};
use crate::domain::{Chips, ConfigError, HandSummary, PlayerId, SeatIndex, Table, TableConfig, TableId};
use crate::engine::{EngineError, HandStatus, PlayerAction};
use crate::infra::{IdGenerator, RngSeed};

/// Ошибки уровня реестра (над актором стола).
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("стол {0} не найден")]
    TableNotFound(TableId),

    #[error("стол {0} закрыт")]
    TableClosed(TableId),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Краткая информация о столе для списка столов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableMetadata {
    pub id: TableId,
    pub name: String,
    pub seated: usize,
    pub max_seats: u8,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub hand_in_progress: bool,
}

/// Реестр столов.
#[derive(Clone, Default)]
pub struct TableRegistry {
    tables: Arc<RwLock<HashMap<TableId, TableHandle>>>,
    ids: Arc<IdGenerator>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Создать стол со случайным базовым seed.
    pub async fn create_table(
        &self,
        name: impl Into<String>,
        config: TableConfig,
    ) -> Result<TableId, RegistryError> {
        self.create_table_with_seed(name, config, RngSeed::random())
            .await
    }

    /// Создать стол с заданным seed (раздачи воспроизводимы) и запустить его актора.
    pub async fn create_table_with_seed(
        &self,
        name: impl Into<String>,
        config: TableConfig,
        seed: RngSeed,
    ) -> Result<TableId, RegistryError> {
        config.validate()?;

        let table_id = self.ids.next_table_id();
        let table = Table::new(table_id, name, config);
        let (actor, handle) = TableActor::new(table, seed, Arc::clone(&self.ids));
        tokio::spawn(actor.run());

        self.tables.write().await.insert(table_id, handle);
        info!("реестр: создан стол {table_id}");
        Ok(table_id)
    }

    /// Хэндл стола.
    pub async fn handle(&self, table_id: TableId) -> Result<TableHandle, RegistryError> {
        self.tables
            .read()
            .await
            .get(&table_id)
            .cloned()
            .ok_or(RegistryError::TableNotFound(table_id))
    }

    pub async fn seat_player(
        &self,
        table_id: TableId,
        seat: SeatIndex,
        player_id: PlayerId,
        stack: Chips,
    ) -> Result<(), RegistryError> {
        self.handle(table_id)
            .await?
            .seat_player(seat, player_id, stack)
            .await
    }

    pub async fn unseat_player(&self, table_id: TableId, seat: SeatIndex) -> Result<Chips, RegistryError> {
        self.handle(table_id).await?.unseat_player(seat).await
    }

    pub async fn start_hand(&self, table_id: TableId) -> Result<HandStatus, RegistryError> {
        self.handle(table_id).await?.start_hand().await
    }

    pub async fn submit_action(
        &self,
        table_id: TableId,
        action: PlayerAction,
    ) -> Result<ActionAck, RegistryError> {
        self.handle(table_id).await?.submit_action(action).await
    }

    /// Сообщить столу о таймауте хода `turn`.
    pub async fn timeout(&self, table_id: TableId, turn: u64) -> Result<(), RegistryError> {
        self.handle(table_id).await?.timeout(turn).await
    }

    pub async fn state(&self, table_id: TableId) -> Result<TableSnapshot, RegistryError> {
        self.handle(table_id).await?.state().await
    }

    /// Поток событий стола. Приватные события не отфильтрованы,
    /// см. `TableHandle::subscribe`.
    pub async fn subscribe(
        &self,
        table_id: TableId,
    ) -> Result<broadcast::Receiver<TableEvent>, RegistryError> {
        Ok(self.handle(table_id).await?.subscribe())
    }

    /// Закрыть стол и убрать его из реестра. Идущая раздача аннулируется;
    /// возвращается её итог, если она была.
    pub async fn close_table(&self, table_id: TableId) -> Result<Option<HandSummary>, RegistryError> {
        let handle = self
            .tables
            .write()
            .await
            .remove(&table_id)
            .ok_or(RegistryError::TableNotFound(table_id))?;
        let summary = handle.close().await?;
        info!("реестр: стол {table_id} закрыт");
        Ok(summary)
    }

    /// Список открытых столов.
    pub async fn list_tables(&self) -> Vec<TableMetadata> {
        let handles: Vec<TableHandle> = self.tables.read().await.values().cloned().collect();

        let mut out = Vec::with_capacity(handles.len());
        for handle in handles {
            if let Ok(snapshot) = handle.state().await {
                let t = snapshot.table;
                out.push(TableMetadata {
                    id: t.id,
                    name: t.name.clone(),
                    seated: t.seated_count(),
                    max_seats: t.max_seats(),
                    small_blind: t.config.stakes.small_blind,
                    big_blind: t.config.stakes.big_blind,
                    hand_in_progress: t.hand_in_progress,
                });
            }
        }
        out.sort_by_key(|m| m.id);
        out
    }

    pub async fn table_count(&self) -> usize {
        self.tables.read().await.len()
    }
}
