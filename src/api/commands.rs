use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{HandSummary, PlayerId, SeatIndex, TableConfig, TableId};
use crate::engine::{HandStatus, PlayerAction, PlayerActionKind};
use crate::infra::RngSeed;
use crate::table::{ActionAck, TableRegistry};

use super::errors::ApiError;

/// Команда верхнего уровня.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Создать новый стол.
    CreateTable(CreateTableCommand),

    /// Операция над конкретным столом.
    TableCommand(TableCommand),
}

/// Команда создания стола.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateTableCommand {
    /// Имя стола (отображается в лобби).
    pub name: String,
    pub config: TableConfig,
    /// Базовый seed колоды; без него раздачи невоспроизводимы.
    pub seed: Option<u64>,
}

/// Команды, которые относятся к существующему столу.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TableCommand {
    SeatPlayer(SeatPlayerCommand),
    UnseatPlayer(UnseatPlayerCommand),
    StartHand { table_id: TableId },
    PlayerAction(ActionCommand),
    CloseTable { table_id: TableId },
}

/// Посадить игрока в конкретное место.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeatPlayerCommand {
    pub table_id: TableId,
    pub player_id: PlayerId,
    pub seat_index: SeatIndex,
    pub initial_stack: Chips,
}

/// Убрать игрока с места.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnseatPlayerCommand {
    pub table_id: TableId,
    pub seat_index: SeatIndex,
}

/// Вид действия во внешнем формате.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

/// Действие игрока: `{table_id, seat, kind, amount?}`.
/// `amount` обязателен для bet (ставка) и raise (прибавка к текущей ставке).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionCommand {
    pub table_id: TableId,
    pub seat: SeatIndex,
    pub kind: ActionType,
    #[serde(default)]
    pub amount: Option<Chips>,
}

impl ActionCommand {
    pub fn to_player_action(&self) -> Result<PlayerAction, ApiError> {
        let amount = || {
            self.amount
                .ok_or_else(|| ApiError::BadRequest(format!("{:?} требует amount", self.kind)))
        };

        let kind = match self.kind {
            ActionType::Fold => PlayerActionKind::Fold,
            ActionType::Check => PlayerActionKind::Check,
            ActionType::Call => PlayerActionKind::Call,
            ActionType::Bet => PlayerActionKind::Bet(amount()?),
            ActionType::Raise => PlayerActionKind::Raise(amount()?),
            ActionType::AllIn => PlayerActionKind::AllIn,
        };
        Ok(PlayerAction::new(self.seat, kind))
    }
}

/// Результат выполнения команды.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CommandResponse {
    TableCreated(TableId),
    Seated,
    Unseated { stack: Chips },
    HandStarted(HandStatus),
    Action(ActionAck),
    TableClosed(Option<HandSummary>),
}

/// Выполнить команду через реестр столов.
pub async fn execute(registry: &TableRegistry, command: Command) -> Result<CommandResponse, ApiError> {
    match command {
        Command::CreateTable(cmd) => {
            let id = match cmd.seed {
                Some(seed) => {
                    registry
                        .create_table_with_seed(cmd.name, cmd.config, RngSeed::from_u64(seed))
                        .await?
                }
                None => registry.create_table(cmd.name, cmd.config).await?,
            };
            Ok(CommandResponse::TableCreated(id))
        }

        Command::TableCommand(TableCommand::SeatPlayer(cmd)) => {
            registry
                .seat_player(cmd.table_id, cmd.seat_index, cmd.player_id, cmd.initial_stack)
                .await?;
            Ok(CommandResponse::Seated)
        }

        Command::TableCommand(TableCommand::UnseatPlayer(cmd)) => {
            let stack = registry.unseat_player(cmd.table_id, cmd.seat_index).await?;
            Ok(CommandResponse::Unseated { stack })
        }

        Command::TableCommand(TableCommand::StartHand { table_id }) => {
            let status = registry.start_hand(table_id).await?;
            Ok(CommandResponse::HandStarted(status))
        }

        Command::TableCommand(TableCommand::PlayerAction(cmd)) => {
            let action = cmd.to_player_action()?;
            let ack = registry.submit_action(cmd.table_id, action).await?;
            Ok(CommandResponse::Action(ack))
        }

        Command::TableCommand(TableCommand::CloseTable { table_id }) => {
            let summary = registry.close_table(table_id).await?;
            Ok(CommandResponse::TableClosed(summary))
        }
    }
}

/// Разобрать команду из JSON.
pub fn parse_command(json: &str) -> Result<Command, ApiError> {
    serde_json::from_str(json).map_err(|e| ApiError::BadRequest(e.to_string()))
}
