use serde::{Deserialize, Serialize};

use crate::domain::{GameId, PlayerId, TournamentId};

/// Итоги завершённого турнира – то же, что уходит в файл статистики.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TournamentStatsDto {
    pub tournament_id: TournamentId,
    pub winner_id: PlayerId,
    pub longest_game_time: u32,
    pub average_game_time: f64,
    pub location: String,
    pub total_games: u32,
    pub total_players: u32,
}

/// Уровень одного игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerLevelDto {
    pub player_id: PlayerId,
    pub level: f64,
}

/// Строка турнирной таблицы.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandingDto {
    pub position: u32,
    pub player_id: PlayerId,
    pub score: i64,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

/// Ответ на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CommandResponse {
    /// Успешный результат без доп.данных.
    Ok,

    /// Партия записана под этим номером.
    GameAdded {
        tournament_id: TournamentId,
        game_id: GameId,
    },

    /// Турнир завершён, выбран победитель.
    TournamentEnded {
        tournament_id: TournamentId,
        winner_id: PlayerId,
    },
}
