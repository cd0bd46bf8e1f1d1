//! Внешний API шахматной системы.
//!
//! Здесь описываются:
//! - команды (commands.rs) — всё, что меняет состояние (турнир, партия, удаление);
//! - запросы (queries.rs) — только чтение;
//! - DTO (dto.rs) — плоские структуры для клиента;
//! - ошибки (errors.rs) — закрытый набор кодов, который видит клиент;
//! - handler.rs — проверка аргументов и вызов `ChessSystem`;
//! - export.rs — текстовые форматы выгрузки.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod export;
pub mod handler;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use handler::ChessApi;
pub use queries::*;
