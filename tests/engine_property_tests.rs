//! Свойства движка на случайных раздачах: фишки сохраняются после каждого
//! действия, раздача всегда доходит до конца, стеки не уходят в минус.

use holdem_engine::domain::{Chips, Deck, HandOutcome, Seat, Table, TableConfig, TableStakes};
use holdem_engine::engine::{
    apply_action, apply_timeout, start_hand_with_deck, HandEventKind, LegalActions, PlayerAction,
    PlayerActionKind,
};
use holdem_engine::infra::RngSeed;
use proptest::prelude::*;

/// Верхняя граница действий в одной раздаче (10 мест, 4 улицы, рейзы до all-in).
const MAX_ACTIONS: usize = 400;

fn choices(legal: &LegalActions) -> Vec<PlayerActionKind> {
    let mut out = vec![PlayerActionKind::Fold];
    if legal.can_check {
        out.push(PlayerActionKind::Check);
    }
    if legal.call.is_some() {
        out.push(PlayerActionKind::Call);
    }
    if let Some((min, max)) = legal.bet {
        out.push(PlayerActionKind::Bet(min));
        out.push(PlayerActionKind::Bet(max));
    }
    if let Some((min, _)) = legal.raise {
        out.push(PlayerActionKind::Raise(min));
    }
    if legal.all_in.is_some() {
        out.push(PlayerActionKind::AllIn);
    }
    out
}

fn table_with(stacks: &[u64], ante: u64) -> Table {
    let config = TableConfig {
        max_seats: 10,
        stakes: TableStakes::new(Chips(5), Chips(10), Chips(ante)),
        ..TableConfig::default()
    };
    let mut table = Table::new(1, "prop", config);
    for (i, stack) in stacks.iter().enumerate() {
        table.seats[i] = Some(Seat::new(i as u64, Chips(*stack)));
    }
    table
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn chips_are_conserved_through_random_hands(
        stacks in prop::collection::vec(1u64..400, 2..=10),
        ante in 0u64..=3,
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<u8>(), MAX_ACTIONS),
        timeouts in prop::collection::vec(any::<bool>(), MAX_ACTIONS),
    ) {
        let mut table = table_with(&stacks, ante);
        let total = table.total_stacks();

        // Несколько раздач подряд: кнопка двигается, вылетевшие садятся в sit-out.
        for hand_id in 1..=3u64 {
            let deck = Deck::new_shuffled(&RngSeed::from_u64(seed).derive(1, hand_id, hand_id));
            let mut engine = match start_hand_with_deck(&mut table, deck, hand_id) {
                Ok(engine) => engine,
                Err(_) => {
                    prop_assert!(table.ready_count() < 2);
                    break;
                }
            };

            let mut steps = 0;
            while let Some((seat, turn)) = engine.current_turn() {
                prop_assert!(steps < MAX_ACTIONS, "раздача не закончилась");

                let status = if timeouts[steps] && picks[steps] % 4 == 0 {
                    apply_timeout(&mut table, &mut engine, turn).unwrap()
                } else {
                    let legal = engine.legal_actions(&table).unwrap();
                    prop_assert_eq!(legal.seat, seat);
                    let options = choices(&legal);
                    let kind = options[picks[steps] as usize % options.len()];
                    Some(apply_action(&mut table, &mut engine, PlayerAction::new(seat, kind)).unwrap())
                };
                prop_assert!(status.is_some());

                prop_assert_eq!(table.total_stacks() + engine.pot.total(), total);
                steps += 1;
            }

            prop_assert!(engine.is_finished());
            prop_assert!(!table.hand_in_progress);
            prop_assert_eq!(engine.pot.total(), Chips::ZERO);
            prop_assert_eq!(table.total_stacks(), total);

            let summary = engine.summary().unwrap();
            let voided = matches!(summary.outcome, HandOutcome::Voided { .. });
            prop_assert!(!voided, "раздача аннулирована");
            let won: Chips = summary.results.iter().map(|r| r.won).sum();
            prop_assert_eq!(won, summary.total_pot);
            let ended = matches!(
                engine.history.events.last().map(|e| &e.kind),
                Some(HandEventKind::HandEnded { .. })
            );
            prop_assert!(ended, "последнее событие не HandEnded");
        }
    }
}
