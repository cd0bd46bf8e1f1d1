//! Подключение логов `tracing` для процессов, встраивающих систему.
//!
//! Библиотека сама подписчика не ставит – только пишет события.
//! Уровень берётся из `RUST_LOG`, по умолчанию `info`.

use tracing_subscriber::EnvFilter;

/// Поставить глобальный fmt-подписчик.
///
/// Возвращает `false`, если подписчик уже был установлен (например, в тестах).
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
