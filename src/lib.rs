//! Учёт шахматных турниров в памяти процесса.
//!
//! Слои:
//!   - `infra`  – упорядоченное хранилище, проверка id, маппинги, логи;
//!   - `domain` – партии, игроки, турниры, веса очков;
//!   - `engine` – `ChessSystem`: операции, затрагивающие несколько сущностей;
//!   - `api`    – команды/запросы с сырыми аргументами, коды ошибок, выгрузка.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;

pub use api::{ApiError, ChessApi};
pub use engine::{ChessError, ChessSystem};
