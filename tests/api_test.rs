//! Внешний API: JSON-команды, выполнение через реестр, коды ошибок.

use holdem_engine::api::{
    execute, parse_command, ActionCommand, ActionType, ApiError, Command, CommandResponse,
    CreateTableCommand, SeatPlayerCommand, TableCommand, UnseatPlayerCommand,
};
use holdem_engine::domain::{Chips, TableConfig, TableId};
use holdem_engine::engine::{EngineError, HandStatus, IllegalActionReason, PlayerActionKind};
use holdem_engine::table::{ActionAck, TableRegistry};

async fn create_table(registry: &TableRegistry) -> TableId {
    let response = execute(
        registry,
        Command::CreateTable(CreateTableCommand {
            name: "api".to_string(),
            config: TableConfig::default(),
            seed: Some(5),
        }),
    )
    .await
    .unwrap();
    match response {
        CommandResponse::TableCreated(id) => id,
        other => panic!("ожидали TableCreated, получили {other:?}"),
    }
}

async fn seat(registry: &TableRegistry, table_id: TableId, seat_index: u8) {
    let response = execute(
        registry,
        Command::TableCommand(TableCommand::SeatPlayer(SeatPlayerCommand {
            table_id,
            player_id: 10 + u64::from(seat_index),
            seat_index,
            initial_stack: Chips(2000),
        })),
    )
    .await
    .unwrap();
    assert!(matches!(response, CommandResponse::Seated));
}

fn action(table_id: TableId, seat: u8, kind: ActionType, amount: Option<u64>) -> Command {
    Command::TableCommand(TableCommand::PlayerAction(ActionCommand {
        table_id,
        seat,
        kind,
        amount: amount.map(Chips),
    }))
}

#[tokio::test]
async fn full_hand_through_commands() {
    let registry = TableRegistry::new();
    let table_id = create_table(&registry).await;
    seat(&registry, table_id, 0).await;
    seat(&registry, table_id, 1).await;

    let response = execute(
        &registry,
        Command::TableCommand(TableCommand::StartHand { table_id }),
    )
    .await
    .unwrap();
    assert!(matches!(response, CommandResponse::HandStarted(HandStatus::Ongoing)));

    let response = execute(&registry, action(table_id, 0, ActionType::Raise, Some(200)))
        .await
        .unwrap();
    assert!(matches!(
        response,
        CommandResponse::Action(ActionAck::TurnAdvanced { next_seat: 1, .. })
    ));

    let response = execute(&registry, action(table_id, 1, ActionType::Fold, None))
        .await
        .unwrap();
    let CommandResponse::Action(ActionAck::HandFinished(summary)) = response else {
        panic!("после фолда раздача закончена");
    };
    assert_eq!(summary.table_id, table_id);

    let response = execute(
        &registry,
        Command::TableCommand(TableCommand::UnseatPlayer(UnseatPlayerCommand {
            table_id,
            seat_index: 0,
        })),
    )
    .await
    .unwrap();
    assert!(matches!(response, CommandResponse::Unseated { stack: Chips(2100) }));

    let response = execute(
        &registry,
        Command::TableCommand(TableCommand::CloseTable { table_id }),
    )
    .await
    .unwrap();
    assert!(matches!(response, CommandResponse::TableClosed(None)));
}

#[tokio::test]
async fn rejected_actions_carry_reason_codes() {
    let registry = TableRegistry::new();
    let table_id = create_table(&registry).await;
    seat(&registry, table_id, 0).await;
    seat(&registry, table_id, 1).await;
    execute(&registry, Command::TableCommand(TableCommand::StartHand { table_id }))
        .await
        .unwrap();

    let err = execute(&registry, action(table_id, 1, ActionType::Check, None))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NOT_YOUR_TURN");

    let err = execute(&registry, action(table_id, 0, ActionType::Raise, Some(10)))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "BELOW_MINIMUM");

    let err = execute(&registry, action(table_id, 0, ActionType::Check, None))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CANNOT_CHECK");

    let err = execute(&registry, action(table_id, 0, ActionType::Bet, None))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "BAD_REQUEST");

    let err = execute(&registry, Command::TableCommand(TableCommand::StartHand { table_id }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "HAND_IN_PROGRESS");

    let err = execute(&registry, action(table_id + 100, 0, ActionType::Fold, None))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::TableNotFound(table_id + 100));
    assert_eq!(err.code(), "TABLE_NOT_FOUND");
}

#[tokio::test]
async fn invalid_config_is_a_bad_request() {
    let registry = TableRegistry::new();
    let mut config = TableConfig::default();
    config.max_seats = 0;

    let err = execute(
        &registry,
        Command::CreateTable(CreateTableCommand {
            name: "bad".to_string(),
            config,
            seed: None,
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "BAD_REQUEST");
}

#[test]
fn parses_json_commands() {
    let json = r#"{"TableCommand":{"PlayerAction":{"table_id":3,"seat":2,"kind":"Raise","amount":300}}}"#;
    let Command::TableCommand(TableCommand::PlayerAction(cmd)) = parse_command(json).unwrap() else {
        panic!("ожидали PlayerAction");
    };
    let action = cmd.to_player_action().unwrap();
    assert_eq!(action.seat, 2);
    assert_eq!(action.kind, PlayerActionKind::Raise(Chips(300)));

    let json = r#"{"TableCommand":{"PlayerAction":{"table_id":3,"seat":2,"kind":"Fold"}}}"#;
    let Command::TableCommand(TableCommand::PlayerAction(cmd)) = parse_command(json).unwrap() else {
        panic!("ожидали PlayerAction");
    };
    assert_eq!(cmd.to_player_action().unwrap().kind, PlayerActionKind::Fold);

    let json = r#"{"TableCommand":{"StartHand":{"table_id":3}}}"#;
    assert!(matches!(
        parse_command(json),
        Ok(Command::TableCommand(TableCommand::StartHand { table_id: 3 }))
    ));

    let err = parse_command("{not json").unwrap_err();
    assert_eq!(err.code(), "BAD_REQUEST");
}

#[test]
fn engine_errors_map_to_api_errors() {
    let err: ApiError = EngineError::from(IllegalActionReason::BettingNotReopened).into();
    assert_eq!(err.code(), "BETTING_NOT_REOPENED");

    let err: ApiError = EngineError::InsufficientSeats.into();
    assert_eq!(err.code(), "INSUFFICIENT_SEATS");

    let err: ApiError = EngineError::ChipConservation {
        expected: Chips(100),
        actual: Chips(90),
    }
    .into();
    assert_eq!(err.code(), "INTERNAL");
}
