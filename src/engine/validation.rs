use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::Seat;
use crate::domain::SeatIndex;
use crate::engine::actions::PlayerActionKind;
use crate::engine::betting::BettingState;
use crate::engine::errors::IllegalActionReason;

/// Какие действия доступны текущему актёру и в каких пределах.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalActions {
    pub seat: SeatIndex,
    pub can_check: bool,
    /// Сколько фишек реально уйдёт на call (с учётом стека).
    pub call: Option<Chips>,
    /// Диапазон bet: (минимум, максимум) фишек.
    pub bet: Option<(Chips, Chips)>,
    /// Диапазон raise: (минимум, максимум) прибавки сверх текущей ставки.
    pub raise: Option<(Chips, Chips)>,
    /// Размер all-in, если он разрешён.
    pub all_in: Option<Chips>,
}

impl LegalActions {
    /// Действие по умолчанию при таймауте: check, если можно, иначе fold.
    pub fn timeout_default(&self) -> PlayerActionKind {
        if self.can_check {
            PlayerActionKind::Check
        } else {
            PlayerActionKind::Fold
        }
    }
}

/// Сколько фишек нужно добавить игроку, чтобы уравнять текущую ставку.
pub fn to_call(player: &Seat, betting: &BettingState) -> Chips {
    betting.current_bet.saturating_sub(player.street_bet)
}

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
/// Очерёдность хода проверяет движок.
pub fn validate_action(
    player: &Seat,
    seat: SeatIndex,
    action: &PlayerActionKind,
    betting: &BettingState,
    big_blind: Chips,
) -> Result<(), IllegalActionReason> {
    if !player.can_act() {
        return Err(IllegalActionReason::SeatNotInHand);
    }

    let stack = player.stack;
    let to_call = to_call(player, betting);

    match *action {
        PlayerActionKind::Fold => Ok(()),

        PlayerActionKind::Check => {
            if to_call.is_zero() {
                Ok(())
            } else {
                Err(IllegalActionReason::CannotCheck)
            }
        }

        // Короткий стек превращает call в all-in call – это разрешено.
        PlayerActionKind::Call => {
            if to_call.is_zero() {
                Err(IllegalActionReason::NothingToCall)
            } else {
                Ok(())
            }
        }

        PlayerActionKind::Bet(amount) => {
            if !betting.current_bet.is_zero() {
                return Err(IllegalActionReason::BetNotAllowed);
            }
            if amount.is_zero() {
                return Err(IllegalActionReason::ZeroAmount);
            }
            if amount > stack {
                return Err(IllegalActionReason::ExceedsStack);
            }
            if amount < big_blind {
                return Err(IllegalActionReason::BelowMinimum);
            }
            Ok(())
        }

        PlayerActionKind::Raise(increment) => {
            if betting.current_bet.is_zero() {
                return Err(IllegalActionReason::RaiseNotAllowed);
            }
            if increment.is_zero() {
                return Err(IllegalActionReason::ZeroAmount);
            }
            if !betting.can_reopen(seat) {
                return Err(IllegalActionReason::BettingNotReopened);
            }
            if to_call + increment > stack {
                return Err(IllegalActionReason::ExceedsStack);
            }
            if increment < betting.min_raise {
                return Err(IllegalActionReason::BelowMinimum);
            }
            Ok(())
        }

        PlayerActionKind::AllIn => {
            if stack.is_zero() {
                return Err(IllegalActionReason::ZeroAmount);
            }
            // All-in выше текущей ставки – это повышение, для него нужна открытая торговля.
            if stack > to_call && !betting.can_reopen(seat) {
                return Err(IllegalActionReason::BettingNotReopened);
            }
            Ok(())
        }
    }
}

/// Набор доступных действий для места (для клиентов и авто-действия по таймауту).
pub fn legal_actions(
    player: &Seat,
    seat: SeatIndex,
    betting: &BettingState,
    big_blind: Chips,
) -> LegalActions {
    let stack = player.stack;
    let to_call = to_call(player, betting);
    let reopen = betting.can_reopen(seat);

    let bet = (betting.current_bet.is_zero() && stack >= big_blind).then_some((big_blind, stack));

    let raise = (!betting.current_bet.is_zero() && reopen && to_call + betting.min_raise <= stack)
        .then(|| (betting.min_raise, stack - to_call));

    let all_in = (!stack.is_zero() && (stack <= to_call || reopen)).then_some(stack);

    LegalActions {
        seat,
        can_check: to_call.is_zero(),
        call: (!to_call.is_zero()).then(|| to_call.min(stack)),
        bet,
        raise,
        all_in,
    }
}
