//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основная функция:
//!   `evaluate_best_hand(hole, board) -> Result<EvaluatedHand, EvalError>`

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate_best_hand, evaluate_hand, EvalError, EvaluatedHand};
pub use hand_rank::{describe_hand, HandCategory};
