//! Шахматная система поверх доменной модели.
//!
//! Высокоуровневый объект: `ChessSystem`
//! Основные операции:
//!   - `add_tournament` / `remove_tournament` / `end_tournament`
//!   - `add_game` – проверка, потом запись с откатом при сбое
//!   - `remove_player` – каскад с пересчётом результатов соперников

pub mod chess_system;
pub mod errors;
pub mod standings;
pub mod validation;

pub use chess_system::{ChessSystem, PlayerLevel};
pub use errors::ChessError;
pub use standings::{compare_standings, pick_winner, sort_standings, Standing};
pub use validation::{has_played_against, prepare_add_game, AddGamePlan};
