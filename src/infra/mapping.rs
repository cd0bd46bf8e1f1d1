use crate::api::commands::WinnerApi;
use crate::api::dto::{PlayerLevelDto, StandingDto, TournamentStatsDto};
use crate::domain::game::GameOutcome;
use crate::domain::tournament::TournamentStatistics;
use crate::engine::{PlayerLevel, Standing};

/// Маппинг исхода партии между API и domain.
pub fn outcome_from_api(api: WinnerApi) -> GameOutcome {
    match api {
        WinnerApi::FirstPlayer => GameOutcome::FirstPlayer,
        WinnerApi::SecondPlayer => GameOutcome::SecondPlayer,
        WinnerApi::Draw => GameOutcome::Draw,
    }
}

pub fn outcome_to_api(domain: GameOutcome) -> WinnerApi {
    match domain {
        GameOutcome::FirstPlayer => WinnerApi::FirstPlayer,
        GameOutcome::SecondPlayer => WinnerApi::SecondPlayer,
        GameOutcome::Draw => WinnerApi::Draw,
    }
}

pub fn map_statistics_to_dto(stats: &TournamentStatistics) -> TournamentStatsDto {
    TournamentStatsDto {
        tournament_id: stats.tournament_id,
        winner_id: stats.winner_id,
        longest_game_time: stats.longest_game,
        average_game_time: stats.average_game_time,
        location: stats.location.clone(),
        total_games: stats.games_count,
        total_players: stats.player_count,
    }
}

pub fn map_level_to_dto(level: &PlayerLevel) -> PlayerLevelDto {
    PlayerLevelDto {
        player_id: level.player_id,
        level: level.level,
    }
}

/// Таблица уже отсортирована; позиция считается с 1.
pub fn map_standings_to_dto(standings: &[Standing]) -> Vec<StandingDto> {
    standings
        .iter()
        .zip(1u32..)
        .map(|(s, position)| StandingDto {
            position,
            player_id: s.player_id,
            score: s.score,
            wins: s.wins,
            draws: s.draws,
            losses: s.losses,
        })
        .collect()
}
