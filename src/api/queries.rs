use serde::{Deserialize, Serialize};

use super::dto::{PlayerLevelDto, StandingDto, TournamentStatsDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Среднее время партии игрока.
    AveragePlayTime { player_id: i64 },

    /// Уровень игрока по всем турнирам.
    PlayerLevel { player_id: i64 },

    /// Текущая таблица турнира (завершённого или нет).
    Standings { tournament_id: i64 },

    /// Итоги всех завершённых турниров.
    TournamentStatistics,

    /// Уровни игроков в порядке выгрузки.
    PlayersLevels,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum QueryResponse {
    AveragePlayTime(f64),
    PlayerLevel(f64),
    Standings(Vec<StandingDto>),
    TournamentStatistics(Vec<TournamentStatsDto>),
    PlayersLevels(Vec<PlayerLevelDto>),
}
