//! Инфраструктурный слой вокруг шахматной системы:
//! - упорядоченное хранилище, на котором построены все сущности;
//! - проверка сырых ID;
//! - маппинги между API и domain;
//! - подключение логов.

pub mod ids;
pub mod mapping;
pub mod store;
#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use mapping::*;
pub use store::{AssociativeStore, FnComparator, KeyComparator, NaturalOrder, StoreError};
#[cfg(feature = "telemetry")]
pub use telemetry::init_tracing;
