//! Внешний API движка.
//!
//! - команды (commands.rs) – всё, что меняет состояние (создать стол, посадить игрока, действие игрока);
//! - ошибки (errors.rs) – то, что видит клиент, с кодами причин.

pub mod commands;
pub mod errors;

pub use commands::*;
pub use errors::*;
