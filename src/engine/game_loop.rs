use std::collections::{BTreeMap, BTreeSet};

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandOutcome, HandRank, HandSummary, PlayerHandResult, Street};
use crate::domain::player::{Seat, SeatStatus};
use crate::domain::table::{Table, TableStakes};
use crate::domain::{HandId, PlayerId, SeatIndex, TableId};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::betting::{BettingState, RoundState};
use crate::engine::errors::{EngineError, IllegalActionReason};
use crate::engine::hand_history::{BlindKind, HandEventKind, HandHistory};
use crate::engine::positions::{blind_seats, collect_seats_from, is_ready, next_dealer, rotate_after};
use crate::engine::pot::PotManager;
use crate::engine::side_pots::split_pot;
use crate::engine::validation::{legal_actions, to_call, validate_action, LegalActions};
use crate::engine::RandomSource;
use crate::eval::{describe_hand, evaluate_best_hand};

/// Статус раздачи для внешнего кода.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandStatus {
    Ongoing,
    Finished(HandSummary),
}

/// Внутреннее состояние раздачи. Создаётся на старте, выбрасывается после расчёта.
#[derive(Clone, Debug)]
pub struct HandEngine {
    pub table_id: TableId,
    pub hand_id: HandId,
    deck: Deck,
    pub betting: BettingState,
    pub pot: PotManager,
    pub button: SeatIndex,
    /// Участники раздачи по часовой, начиная слева от кнопки.
    pub order: Vec<SeatIndex>,
    /// Игроки раздачи и их стеки на момент старта (для аннулирования).
    /// Место, на котором сменился игрок, в учёт не входит.
    start_stacks: BTreeMap<SeatIndex, (PlayerId, Chips)>,
    /// Сумма фишек, которая должна сохраняться всю раздачу.
    chip_total: Chips,
    /// Номер текущего хода; растёт с каждым новым ходом.
    turn: u64,
    summary: Option<HandSummary>,
    /// История раздачи.
    pub history: HandHistory,
}

impl HandEngine {
    fn new(table: &Table, hand_id: HandId, deck: Deck, button: SeatIndex, order: Vec<SeatIndex>) -> Self {
        let big_blind = table.config.stakes.big_blind;
        let start_stacks: BTreeMap<SeatIndex, (PlayerId, Chips)> = order
            .iter()
            .filter_map(|s| table.seat(*s).map(|p| (*s, (p.player_id, p.stack))))
            .collect();
        let chip_total = start_stacks.values().map(|(_, stack)| *stack).sum();
        Self {
            table_id: table.id,
            hand_id,
            deck,
            betting: BettingState::new(Street::Preflop, big_blind, big_blind, Vec::new()),
            pot: PotManager::new(),
            button,
            order,
            start_stacks,
            chip_total,
            turn: 0,
            summary: None,
            history: HandHistory::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.summary.is_some()
    }

    /// Итог раздачи, если она закончилась.
    pub fn summary(&self) -> Option<&HandSummary> {
        self.summary.as_ref()
    }

    pub fn current_actor(&self) -> Option<SeatIndex> {
        if self.is_finished() {
            return None;
        }
        self.betting.current_actor()
    }

    /// Текущий ход: (место, номер хода).
    pub fn current_turn(&self) -> Option<(SeatIndex, u64)> {
        self.current_actor().map(|seat| (seat, self.turn))
    }

    pub fn round_state(&self, table: &Table) -> RoundState {
        if live_seats(table, &self.order).len() <= 1 {
            return RoundState::HandEndedByFold;
        }
        match self.current_actor() {
            Some(seat) => RoundState::AwaitingAction(seat),
            None => RoundState::RoundComplete,
        }
    }

    pub fn chip_total(&self) -> Chips {
        self.chip_total
    }

    /// Место участника раздачи, если на нём сидит тот же игрок, что и на старте.
    fn participant<'t>(&self, table: &'t Table, seat: SeatIndex) -> Option<&'t Seat> {
        let (player_id, _) = self.start_stacks.get(&seat)?;
        table.seat(seat).filter(|p| p.player_id == *player_id)
    }

    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }

    /// Доступные действия текущего актёра.
    pub fn legal_actions(&self, table: &Table) -> Option<LegalActions> {
        let actor = self.current_actor()?;
        let seat = table.seat(actor)?;
        Some(legal_actions(seat, actor, &self.betting, table.config.stakes.big_blind))
    }
}

/// Старт новой раздачи с колодой, перемешанной `rng`.
pub fn start_hand<R: RandomSource>(
    table: &mut Table,
    rng: &mut R,
    new_hand_id: HandId,
) -> Result<HandEngine, EngineError> {
    start_hand_with_deck(table, Deck::shuffled(rng), new_hand_id)
}

/// Старт новой раздачи с готовой колодой:
/// - двигает кнопку (sit-out пропускаются);
/// - постит анте и блайнды;
/// - раздаёт карманные карты;
/// - настраивает BettingState и первый ход.
///
/// Раздача может закончиться сразу (например, все в all-in с блайндов) –
/// тогда `is_finished()` уже true.
pub fn start_hand_with_deck(
    table: &mut Table,
    deck: Deck,
    new_hand_id: HandId,
) -> Result<HandEngine, EngineError> {
    if table.hand_in_progress {
        return Err(EngineError::HandAlreadyInProgress);
    }

    for seat in table.seats.iter_mut().flatten() {
        seat.reset_for_hand();
    }
    if table.ready_count() < 2 {
        return Err(EngineError::InsufficientSeats);
    }

    let button = next_dealer(table).ok_or(EngineError::InsufficientSeats)?;
    let order = rotate_after(&collect_seats_from(table, button, is_ready), button);

    table.dealer_button = Some(button);
    table.board.clear();
    table.street = Street::Preflop;
    table.hand_in_progress = true;

    let stakes = table.config.stakes.clone();
    let mut engine = HandEngine::new(table, new_hand_id, deck, button, order);

    let seats = engine
        .order
        .iter()
        .filter_map(|s| table.seat(*s).map(|p| (*s, p.player_id, p.stack)))
        .collect();
    engine.history.push(HandEventKind::HandStarted {
        table_id: table.id,
        hand_id: new_hand_id,
        seats,
        button,
        small_blind: stakes.small_blind,
        big_blind: stakes.big_blind,
        ante: stakes.ante,
    });
    info!(
        "стол {}: раздача {} началась, кнопка на месте {}, участников {}",
        table.id,
        new_hand_id,
        button,
        engine.order.len()
    );

    let started = post_blinds_and_antes(table, &mut engine, &stakes)
        .and_then(|_| deal_hole_cards(table, &mut engine))
        .and_then(|_| check_conservation(table, &engine))
        .and_then(|_| advance(table, &mut engine));

    if let Err(e) = started {
        error!("стол {}: раздача {} не стартовала: {e}", table.id, new_hand_id);
        void_hand(table, &mut engine, &e.to_string());
    }

    Ok(engine)
}

fn seat_mut(table: &mut Table, seat: SeatIndex) -> Result<&mut Seat, EngineError> {
    table.seat_mut(seat).ok_or(EngineError::InvalidSeat(seat))
}

/// Постинг анте и блайндов, очередь префлопа.
fn post_blinds_and_antes(
    table: &mut Table,
    engine: &mut HandEngine,
    stakes: &TableStakes,
) -> Result<(), EngineError> {
    if !stakes.ante.is_zero() {
        for &seat in &engine.order {
            let paid = seat_mut(table, seat)?.commit_dead(stakes.ante);
            engine.pot.add(seat, paid);
            engine.history.push(HandEventKind::BlindPosted {
                seat,
                kind: BlindKind::Ante,
                amount: paid,
            });
        }
    }

    let (sb_seat, bb_seat) =
        blind_seats(&engine.order, engine.button).ok_or(EngineError::InsufficientSeats)?;

    for (seat, kind, amount) in [
        (sb_seat, BlindKind::Small, stakes.small_blind),
        (bb_seat, BlindKind::Big, stakes.big_blind),
    ] {
        let paid = seat_mut(table, seat)?.commit(amount);
        engine.pot.add(seat, paid);
        engine.history.push(HandEventKind::BlindPosted {
            seat,
            kind,
            amount: paid,
        });
    }

    // Первым ходит место после BB, BB ходит последним (опция).
    engine.betting.last_aggressor = Some(bb_seat);
    engine.betting.to_act = rotate_after(&engine.order, bb_seat)
        .into_iter()
        .filter(|s| table.seat(*s).is_some_and(Seat::can_act))
        .collect();

    Ok(())
}

/// Раздача карманных карт – по 2 карты, по кругу слева от кнопки.
fn deal_hole_cards(table: &mut Table, engine: &mut HandEngine) -> Result<(), EngineError> {
    for _round in 0..2 {
        for &seat in &engine.order {
            let card = engine.deck.draw()?;
            seat_mut(table, seat)?.hole_cards.push(card);
        }
    }

    for &seat in &engine.order {
        let cards = table.seat(seat).map(|p| p.hole_cards.clone()).unwrap_or_default();
        engine.history.push(HandEventKind::HoleCardsDealt { seat, cards });
    }
    Ok(())
}

/// Применить действие игрока. Возвращает статус раздачи (идёт / закончилась).
///
/// Недопустимое действие возвращает ошибку и не меняет состояние.
pub fn apply_action(
    table: &mut Table,
    engine: &mut HandEngine,
    action: PlayerAction,
) -> Result<HandStatus, EngineError> {
    apply_action_inner(table, engine, action, false)
}

/// Таймаут хода `turn`: применяем действие по умолчанию (fold, если есть
/// ставка, иначе check). Устаревший таймаут игнорируется – `Ok(None)`.
pub fn apply_timeout(
    table: &mut Table,
    engine: &mut HandEngine,
    turn: u64,
) -> Result<Option<HandStatus>, EngineError> {
    let (seat, current) = match engine.current_turn() {
        Some(t) => t,
        None => {
            debug!("стол {}: таймаут хода {turn} без активного хода", table.id);
            return Ok(None);
        }
    };
    if current != turn {
        debug!(
            "стол {}: устаревший таймаут хода {turn} (текущий ход {current})",
            table.id
        );
        return Ok(None);
    }

    let kind = engine
        .legal_actions(table)
        .map(|l| l.timeout_default())
        .unwrap_or(PlayerActionKind::Fold);
    info!("стол {}: место {seat} не успело, авто-{kind}", table.id);

    apply_action_inner(table, engine, PlayerAction::new(seat, kind), true).map(Some)
}

fn apply_action_inner(
    table: &mut Table,
    engine: &mut HandEngine,
    action: PlayerAction,
    timed_out: bool,
) -> Result<HandStatus, EngineError> {
    if engine.is_finished() || !table.hand_in_progress {
        return Err(EngineError::NoActiveHand);
    }
    if action.seat as usize >= table.seats.len() {
        return Err(EngineError::InvalidSeat(action.seat));
    }
    if !engine.order.contains(&action.seat) {
        return Err(IllegalActionReason::SeatNotInHand.into());
    }
    if engine.betting.current_actor() != Some(action.seat) {
        return Err(IllegalActionReason::NotYourTurn.into());
    }

    let big_blind = table.config.stakes.big_blind;
    let player = table
        .seat(action.seat)
        .ok_or(IllegalActionReason::SeatNotInHand)?;
    validate_action(player, action.seat, &action.kind, &engine.betting, big_blind)?;

    let amount = execute(table, engine, action)?;

    engine.history.push(HandEventKind::ActionApplied {
        seat: action.seat,
        kind: action.kind,
        amount,
        pot_total: engine.pot.total(),
        timed_out,
    });
    debug!(
        "стол {}: место {} -> {} ({amount}), банк {}",
        table.id,
        action.seat,
        action.kind,
        engine.pot.total()
    );

    match check_conservation(table, engine).and_then(|_| advance(table, engine)) {
        Ok(status) => Ok(status),
        Err(e) => {
            error!("стол {}: раздача {} прервана: {e}", table.id, engine.hand_id);
            Ok(HandStatus::Finished(void_hand(table, engine, &e.to_string())))
        }
    }
}

/// Изменить состояние по уже проверенному действию. Возвращает внесённые фишки.
fn execute(table: &mut Table, engine: &mut HandEngine, action: PlayerAction) -> Result<Chips, EngineError> {
    let seat = action.seat;
    let current_bet = engine.betting.current_bet;

    let (paid, new_level) = {
        let player = seat_mut(table, seat)?;
        let owed = to_call(player, &engine.betting);
        let paid = match action.kind {
            PlayerActionKind::Fold => {
                player.status = SeatStatus::Folded;
                Chips::ZERO
            }
            PlayerActionKind::Check => Chips::ZERO,
            PlayerActionKind::Call => player.commit(owed),
            PlayerActionKind::Bet(amount) => player.commit(amount),
            PlayerActionKind::Raise(increment) => player.commit(owed + increment),
            PlayerActionKind::AllIn => player.commit(player.stack),
        };
        (paid, player.street_bet)
    };
    engine.pot.add(seat, paid);

    if new_level > current_bet {
        let requeue: Vec<SeatIndex> = rotate_after(&engine.order, seat)
            .into_iter()
            .filter(|s| *s != seat && table.seat(*s).is_some_and(Seat::can_act))
            .collect();
        let increment = new_level - current_bet;
        if increment >= engine.betting.min_raise {
            engine.betting.on_raise(seat, new_level, increment, requeue);
        } else {
            engine.betting.on_short_all_in(seat, new_level, requeue);
        }
    } else {
        engine.betting.mark_acted(seat);
    }

    Ok(paid)
}

/// Сумма стеков участников раздачи + банк должна совпадать с суммой на старте.
fn check_conservation(table: &Table, engine: &HandEngine) -> Result<(), EngineError> {
    let stacks: Chips = engine
        .start_stacks
        .keys()
        .filter_map(|s| engine.participant(table, *s))
        .map(|p| p.stack)
        .sum();
    let actual = stacks + engine.pot.total();
    if actual != engine.chip_total {
        return Err(EngineError::ChipConservation {
            expected: engine.chip_total,
            actual,
        });
    }
    Ok(())
}

/// Места, которые ещё претендуют на банк.
fn live_seats(table: &Table, order: &[SeatIndex]) -> BTreeSet<SeatIndex> {
    order
        .iter()
        .copied()
        .filter(|s| table.seat(*s).is_some_and(Seat::is_in_hand))
        .collect()
}

/// Двигать раздачу, пока не понадобится чьё-то действие или она не закончится:
/// завершение раунда, открытие улиц, прогон борда при all-in, шоудаун.
fn advance(table: &mut Table, engine: &mut HandEngine) -> Result<HandStatus, EngineError> {
    loop {
        let live = live_seats(table, &engine.order);
        if live.len() <= 1 {
            return finish_by_fold(table, engine, &live);
        }

        engine
            .betting
            .to_act
            .retain(|s| table.seat(*s).is_some_and(Seat::can_act));

        // Единственному, кто может ходить, не с кем торговаться, если он уже уравнял.
        let able: Vec<SeatIndex> = engine
            .order
            .iter()
            .copied()
            .filter(|s| table.seat(*s).is_some_and(Seat::can_act))
            .collect();
        if able.len() <= 1
            && able
                .iter()
                .all(|s| table.seat(*s).is_some_and(|p| to_call(p, &engine.betting).is_zero()))
        {
            engine.betting.to_act.clear();
        }

        if let Some(actor) = engine.betting.current_actor() {
            engine.turn += 1;
            debug!(
                "стол {}: ход {} за местом {actor} ({})",
                table.id, engine.turn, table.street
            );
            return Ok(HandStatus::Ongoing);
        }

        engine.history.push(HandEventKind::RoundComplete {
            street: table.street,
        });

        if table.street == Street::River {
            return showdown(table, engine, &live);
        }
        reveal_next_street(table, engine)?;
    }
}

/// Сжечь карту и открыть следующую улицу, начать новый раунд торговли.
fn reveal_next_street(table: &mut Table, engine: &mut HandEngine) -> Result<(), EngineError> {
    let (next, count) = table
        .street
        .next()
        .ok_or(EngineError::Internal("после ривера улиц нет"))?;

    engine.deck.burn()?;
    let cards = engine.deck.draw_n(count)?;
    table.board.extend_from_slice(&cards);
    table.street = next;

    for &seat in &engine.order {
        seat_mut(table, seat)?.street_bet = Chips::ZERO;
    }

    engine.history.push(HandEventKind::StreetRevealed {
        street: next,
        cards,
    });

    // После флопа первым ходит первый активный слева от кнопки.
    let to_act: Vec<SeatIndex> = engine
        .order
        .iter()
        .copied()
        .filter(|s| table.seat(*s).is_some_and(Seat::can_act))
        .collect();
    let to_act = if to_act.len() >= 2 { to_act } else { Vec::new() };
    let big_blind = table.config.stakes.big_blind;
    engine.betting = BettingState::new(next, Chips::ZERO, big_blind, to_act);

    Ok(())
}

fn return_uncalled(table: &mut Table, engine: &mut HandEngine) -> Result<(), EngineError> {
    if let Some((seat, amount)) = engine.pot.return_uncalled() {
        seat_mut(table, seat)?.stack += amount;
        engine
            .history
            .push(HandEventKind::UncalledBetReturned { seat, amount });
    }
    Ok(())
}

/// Все, кроме одного, сфолдили: весь банк уходит ему без вскрытия.
fn finish_by_fold(
    table: &mut Table,
    engine: &mut HandEngine,
    live: &BTreeSet<SeatIndex>,
) -> Result<HandStatus, EngineError> {
    let survivor = live
        .iter()
        .next()
        .copied()
        .ok_or(EngineError::Internal("в раздаче не осталось игроков"))?;

    return_uncalled(table, engine)?;

    let total_pot = engine.pot.total();
    seat_mut(table, survivor)?.stack += total_pot;
    engine.history.push(HandEventKind::PotAwarded {
        pot_index: 0,
        amount: total_pot,
        winners: vec![(survivor, total_pot)],
    });
    engine.pot.clear();
    check_conservation(table, engine)?;

    let winnings = BTreeMap::from([(survivor, total_pot)]);
    let summary = finish(
        table,
        engine,
        HandOutcome::Uncontested,
        total_pot,
        winnings,
        BTreeMap::new(),
    );
    Ok(HandStatus::Finished(summary))
}

/// Вскрытие: оценить руки, разыграть каждый банк отдельно.
fn showdown(
    table: &mut Table,
    engine: &mut HandEngine,
    live: &BTreeSet<SeatIndex>,
) -> Result<HandStatus, EngineError> {
    table.street = Street::Showdown;
    return_uncalled(table, engine)?;

    let mut ranks: BTreeMap<SeatIndex, HandRank> = BTreeMap::new();
    for seat in engine.order.iter().copied().filter(|s| live.contains(s)) {
        let player = table.seat(seat).ok_or(EngineError::InvalidSeat(seat))?;
        let evaluated = evaluate_best_hand(&player.hole_cards, &table.board)?;
        engine.history.push(HandEventKind::Showdown {
            seat,
            cards: player.hole_cards.clone(),
            best_five: evaluated.best_five.to_vec(),
            rank: evaluated.rank,
            description: describe_hand(evaluated.rank),
        });
        ranks.insert(seat, evaluated.rank);
    }

    let total_pot = engine.pot.total();
    let pots = engine.pot.pots(live);
    let mut winnings: BTreeMap<SeatIndex, Chips> = BTreeMap::new();

    for (pot_index, pot) in pots.iter().enumerate() {
        let best = pot
            .eligible_seats
            .iter()
            .filter_map(|s| ranks.get(s))
            .max()
            .copied()
            .ok_or(EngineError::Internal("банк без претендентов"))?;

        // Победители по часовой слева от кнопки – в этом порядке раздаются лишние фишки.
        let winners: Vec<SeatIndex> = engine
            .order
            .iter()
            .copied()
            .filter(|s| pot.eligible_seats.contains(s) && ranks.get(s) == Some(&best))
            .collect();

        let shares = split_pot(pot.amount, &winners);
        for &(seat, amount) in &shares {
            seat_mut(table, seat)?.stack += amount;
            *winnings.entry(seat).or_default() += amount;
        }
        engine.history.push(HandEventKind::PotAwarded {
            pot_index,
            amount: pot.amount,
            winners: shares,
        });
    }

    engine.pot.clear();
    check_conservation(table, engine)?;

    let summary = finish(table, engine, HandOutcome::Showdown, total_pot, winnings, ranks);
    Ok(HandStatus::Finished(summary))
}

/// Аннулировать раздачу: вернуть каждому стек на момент старта.
///
/// Используется при пустой колоде, нарушении сохранения фишек и закрытии
/// стола посреди раздачи.
pub fn void_hand(table: &mut Table, engine: &mut HandEngine, reason: &str) -> HandSummary {
    if let Some(summary) = engine.summary() {
        return summary.clone();
    }

    let table_id = table.id;
    for (seat, amount) in engine.pot.refund_all() {
        match table.seat_mut(seat) {
            Some(p) if engine.start_stacks.get(&seat).is_some_and(|(id, _)| *id == p.player_id) => {
                p.stack += amount;
            }
            _ => error!("стол {table_id}: место {seat} сменило игрока, возврат {amount} некуда зачислить"),
        }
    }
    for (seat, (player_id, stack)) in &engine.start_stacks {
        let Some(p) = table.seat_mut(*seat) else {
            continue;
        };
        if p.player_id != *player_id {
            continue;
        }
        if p.stack != *stack {
            warn!(
                "стол {table_id}: место {seat} – стек {} восстановлен до {stack}",
                p.stack
            );
            p.stack = *stack;
        }
    }
    table.board.clear();

    engine.history.push(HandEventKind::HandVoided {
        reason: reason.to_string(),
    });
    warn!(
        "стол {}: раздача {} аннулирована: {reason}",
        table.id, engine.hand_id
    );

    finish(
        table,
        engine,
        HandOutcome::Voided {
            reason: reason.to_string(),
        },
        Chips::ZERO,
        BTreeMap::new(),
        BTreeMap::new(),
    )
}

/// Общее завершение: сброс состояния мест, итог, событие HandEnded.
fn finish(
    table: &mut Table,
    engine: &mut HandEngine,
    outcome: HandOutcome,
    total_pot: Chips,
    winnings: BTreeMap<SeatIndex, Chips>,
    ranks: BTreeMap<SeatIndex, HandRank>,
) -> HandSummary {
    let street_reached = table.street;
    let board = table.board.clone();

    for seat in table.seats.iter_mut().flatten() {
        seat.reset_for_hand();
    }
    table.hand_in_progress = false;
    engine.betting.to_act.clear();

    let results = engine
        .order
        .iter()
        .filter_map(|&seat| {
            let p = table.seat(seat)?;
            let won = winnings.get(&seat).copied().unwrap_or_default();
            Some(PlayerHandResult {
                seat,
                player_id: p.player_id,
                rank: ranks.get(&seat).copied(),
                won,
                final_stack: p.stack,
                is_winner: !won.is_zero(),
            })
        })
        .collect();

    engine.history.push(HandEventKind::HandEnded {
        hand_id: engine.hand_id,
        stacks: table.stacks(),
    });

    let summary = HandSummary {
        hand_id: engine.hand_id,
        table_id: table.id,
        street_reached,
        board,
        total_pot,
        outcome,
        results,
    };
    info!(
        "стол {}: раздача {} завершена ({:?}), банк {}",
        table.id, engine.hand_id, summary.outcome, total_pot
    );

    engine.summary = Some(summary.clone());
    summary
}
