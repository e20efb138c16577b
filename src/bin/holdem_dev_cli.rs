// src/bin/holdem_dev_cli.rs
//! Dev-CLI: несколько столов параллельно, боты по сценариям, лог событий.

use holdem_engine::domain::{Chips, HandOutcome, HandSummary, Street, TableConfig, TableId};
use holdem_engine::engine::{HandEventKind, HandStatus, LegalActions, PlayerAction, PlayerActionKind};
use holdem_engine::infra::RngSeed;
use holdem_engine::table::{ActionAck, RegistryError, TableRegistry};

/// Сценарий тестовой раздачи.
#[derive(Copy, Clone, Debug)]
enum Scenario {
    SimpleCheckCall,
    WithFold,
    WithRaises,
    WithAllInSidePots,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    println!("holdem_dev_cli: стартуем мульти-табличный dev-CLI…");

    let registry = TableRegistry::new();
    let config = TableConfig::default();

    let scenarios = [
        Scenario::SimpleCheckCall,
        Scenario::WithFold,
        Scenario::WithRaises,
        Scenario::WithAllInSidePots,
    ];

    let mut tasks = Vec::new();
    for (n, scenario) in scenarios.into_iter().enumerate() {
        let registry = registry.clone();
        let config = config.clone();
        tasks.push(tokio::spawn(async move {
            let table_id = setup_table(&registry, n, config).await?;
            play_hand(&registry, table_id, scenario).await
        }));
    }

    for task in tasks {
        match task.await {
            Ok(Ok(summary)) => print_summary(&summary),
            Ok(Err(e)) => println!("[CLI] ОШИБКА: {e}"),
            Err(e) => println!("[CLI] задача стола упала: {e}"),
        }
    }

    for meta in registry.list_tables().await {
        println!(
            "[CLI] стол {} '{}': игроков {}, блайнды {}/{}",
            meta.id, meta.name, meta.seated, meta.small_blind, meta.big_blind
        );
        if let Err(e) = registry.close_table(meta.id).await {
            println!("[CLI] не удалось закрыть стол {}: {e}", meta.id);
        }
    }

    println!("[CLI] Завершение работы dev-CLI.");
}

/// Создать стол и посадить 3–6 игроков. В сценарии с сайд-потами стеки разные.
async fn setup_table(
    registry: &TableRegistry,
    n: usize,
    config: TableConfig,
) -> Result<TableId, RegistryError> {
    let table_id = registry
        .create_table_with_seed(format!("AUTO TABLE {}", n + 1), config, RngSeed::from_u64(n as u64))
        .await?;

    let players = 3 + n as u8;
    for seat in 0..players {
        let stack = if n == 3 {
            Chips::new(1_000 * (u64::from(seat) + 1))
        } else {
            Chips::new(10_000)
        };
        registry
            .seat_player(table_id, seat, 100 * table_id + u64::from(seat), stack)
            .await?;
    }
    Ok(table_id)
}

/// Одна полная раздача по сценарию.
async fn play_hand(
    registry: &TableRegistry,
    table_id: TableId,
    scenario: Scenario,
) -> Result<HandSummary, RegistryError> {
    let mut events = registry.subscribe(table_id).await?;
    let printer = tokio::spawn(async move {
        while let Ok(e) = events.recv().await {
            // Печатаем как наблюдатель: чужие карманные карты не показываем.
            if !e.visible_to(None) {
                continue;
            }
            println!("[table_id={}] {:?}", e.table_id, e.event.kind);
            if matches!(e.event.kind, HandEventKind::HandEnded { .. }) {
                break;
            }
        }
    });

    let mut summary = match registry.start_hand(table_id).await? {
        HandStatus::Finished(summary) => Some(summary),
        HandStatus::Ongoing => None,
    };

    const MAX_STEPS: u32 = 200;
    let mut step = 0;
    while summary.is_none() && step < MAX_STEPS {
        step += 1;
        let state = registry.state(table_id).await?;
        let (Some((seat, _turn)), Some(legal)) = (state.current_turn, state.legal_actions) else {
            break;
        };

        let kind = pick_action(scenario, step, state.table.street, &legal);
        println!(
            "[CLI][table_id={table_id}] [step={step}] street={} seat={seat} -> {kind}",
            state.table.street
        );

        match registry.submit_action(table_id, PlayerAction::new(seat, kind)).await {
            Ok(ActionAck::HandFinished(s)) => summary = Some(s),
            Ok(ActionAck::TurnAdvanced { .. }) => {}
            Err(e) => {
                println!("[CLI] действие отклонено: {e}, делаем check/fold");
                let fallback = PlayerAction::new(seat, legal.timeout_default());
                if let ActionAck::HandFinished(s) = registry.submit_action(table_id, fallback).await? {
                    summary = Some(s);
                }
            }
        }
    }

    let _ = printer.await;
    match summary {
        Some(s) => Ok(s),
        None => Ok(registry
            .close_table(table_id)
            .await?
            .unwrap_or_else(|| empty_summary(table_id))),
    }
}

fn empty_summary(table_id: TableId) -> HandSummary {
    HandSummary {
        hand_id: 0,
        table_id,
        street_reached: Street::Preflop,
        board: Vec::new(),
        total_pot: Chips::ZERO,
        outcome: HandOutcome::Voided {
            reason: "превышен лимит шагов".to_string(),
        },
        results: Vec::new(),
    }
}

/// Базовая стратегия бота: check, если можно, иначе call.
fn base_action(legal: &LegalActions) -> PlayerActionKind {
    if legal.can_check {
        PlayerActionKind::Check
    } else if legal.call.is_some() {
        PlayerActionKind::Call
    } else {
        PlayerActionKind::Fold
    }
}

fn pick_action(scenario: Scenario, step: u32, street: Street, legal: &LegalActions) -> PlayerActionKind {
    match scenario {
        Scenario::SimpleCheckCall => base_action(legal),

        Scenario::WithFold => {
            if street == Street::Preflop && step <= 2 {
                return PlayerActionKind::Fold;
            }
            base_action(legal)
        }

        Scenario::WithRaises => match (street, legal.raise, legal.bet) {
            (Street::Preflop, Some((min, _)), _) if step == 1 => PlayerActionKind::Raise(min),
            (Street::Flop, _, Some((min, _))) => PlayerActionKind::Bet(min),
            _ => base_action(legal),
        },

        Scenario::WithAllInSidePots => {
            if street == Street::Preflop && legal.all_in.is_some() {
                return PlayerActionKind::AllIn;
            }
            base_action(legal)
        }
    }
}

fn print_summary(summary: &HandSummary) {
    println!("=== РАЗДАЧА ЗАВЕРШЕНА ===");
    println!(
        "table_id={} hand_id={} street_reached={} total_pot={} outcome={:?}",
        summary.table_id, summary.hand_id, summary.street_reached, summary.total_pot, summary.outcome
    );
    let board: Vec<String> = summary.board.iter().map(ToString::to_string).collect();
    println!("board: {}", board.join(" "));
    for r in &summary.results {
        println!(
            "  seat={} player_id={} | won={} | stack={} | winner={}",
            r.seat, r.player_id, r.won, r.final_stack, r.is_winner
        );
    }
}
