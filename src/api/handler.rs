// src/api/handler.rs

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::scoring::{ScoringConfig, ScoringConfigError};
use crate::domain::tournament::TournamentConfig;
use crate::engine::ChessSystem;
use crate::infra::{ids, mapping};

use super::commands::{
    AddGameCommand, AddTournamentCommand, Command, EndTournamentCommand, RemovePlayerCommand,
    RemoveTournamentCommand,
};
use super::dto::{CommandResponse, PlayerLevelDto, TournamentStatsDto};
use super::errors::ApiError;
use super::export;
use super::queries::{Query, QueryResponse};

/// Вход в систему для внешнего клиента.
///
/// Проверяет сырые аргументы, переводит их в типизированные id
/// и вызывает `ChessSystem`. Все ошибки наружу – `ApiError`.
#[derive(Clone, Debug, Default)]
pub struct ChessApi {
    system: ChessSystem,
}

impl ChessApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(scoring: ScoringConfig) -> Result<Self, ScoringConfigError> {
        Ok(Self {
            system: ChessSystem::with_config(scoring)?,
        })
    }

    pub fn system(&self) -> &ChessSystem {
        &self.system
    }

    /// Выполнить команду.
    pub fn execute(&mut self, command: Command) -> Result<CommandResponse, ApiError> {
        debug!(?command, "execute");

        match command {
            Command::AddTournament(cmd) => self.add_tournament(cmd),
            Command::AddGame(cmd) => self.add_game(cmd),
            Command::RemoveTournament(cmd) => self.remove_tournament(cmd),
            Command::RemovePlayer(cmd) => self.remove_player(cmd),
            Command::EndTournament(cmd) => self.end_tournament(cmd),
        }
    }

    /// Выполнить запрос.
    pub fn query(&self, query: Query) -> Result<QueryResponse, ApiError> {
        match query {
            Query::AveragePlayTime { player_id } => {
                let player_id = ids::player_id(player_id)?;
                Ok(QueryResponse::AveragePlayTime(
                    self.system.average_play_time(player_id)?,
                ))
            }
            Query::PlayerLevel { player_id } => {
                let player_id = ids::player_id(player_id)?;
                Ok(QueryResponse::PlayerLevel(
                    self.system.player_level(player_id)?,
                ))
            }
            Query::Standings { tournament_id } => {
                let tournament_id = ids::tournament_id(tournament_id)?;
                let standings = self.system.standings(tournament_id)?;
                Ok(QueryResponse::Standings(mapping::map_standings_to_dto(
                    &standings,
                )))
            }
            Query::TournamentStatistics => Ok(QueryResponse::TournamentStatistics(
                self.ended_tournaments()?,
            )),
            Query::PlayersLevels => Ok(QueryResponse::PlayersLevels(self.players_levels())),
        }
    }

    /// Записать итоги всех завершённых турниров.
    ///
    /// `NoTournamentsEnded`, если завершённых нет (писать нечего).
    pub fn save_tournament_statistics<W: Write>(&self, out: &mut W) -> Result<(), ApiError> {
        let stats = self.ended_tournaments()?;
        export::write_tournament_statistics(out, &stats).map_err(|err| {
            warn!(error = %err, "failed to write tournament statistics");
            ApiError::SaveFailure
        })
    }

    /// То же, но в файл. Файл создаётся (или обнуляется) в любом случае.
    pub fn save_tournament_statistics_to_path(&self, path: &Path) -> Result<(), ApiError> {
        let file = File::create(path).map_err(|err| {
            warn!(path = %path.display(), error = %err, "failed to open statistics file");
            ApiError::SaveFailure
        })?;
        let mut out = BufWriter::new(file);
        self.save_tournament_statistics(&mut out)
    }

    /// Записать уровни игроков (только тех, у кого есть партии).
    pub fn save_players_levels<W: Write>(&self, out: &mut W) -> Result<(), ApiError> {
        export::write_players_levels(out, &self.players_levels()).map_err(|err| {
            warn!(error = %err, "failed to write players levels");
            ApiError::SaveFailure
        })
    }

    // ---------------------------------------------------------------------
    // Команды
    // ---------------------------------------------------------------------

    /// NullArgument → InvalidId → AlreadyExists → InvalidLocation → InvalidMaxGames.
    fn add_tournament(&mut self, cmd: AddTournamentCommand) -> Result<CommandResponse, ApiError> {
        let location = cmd.location.ok_or(ApiError::NullArgument)?;
        let tournament_id = ids::tournament_id(cmd.tournament_id)?;

        // Неположительный или слишком большой лимит – 0, его отсеет проверка конфига.
        let max_games = u32::try_from(cmd.max_games_per_player).unwrap_or(0);

        self.system
            .add_tournament(tournament_id, TournamentConfig::new(max_games, location))?;
        Ok(CommandResponse::Ok)
    }

    /// InvalidId → TournamentNotExist → TournamentEnded → GameAlreadyExists →
    /// InvalidPlayTime → ExceededGames.
    fn add_game(&mut self, cmd: AddGameCommand) -> Result<CommandResponse, ApiError> {
        let tournament_id = ids::tournament_id(cmd.tournament_id)?;
        let (first, second) = ids::game_players(cmd.first_player, cmd.second_player)?;

        let game_id = self.system.add_game(
            tournament_id,
            first,
            second,
            mapping::outcome_from_api(cmd.winner),
            cmd.play_time,
        )?;

        Ok(CommandResponse::GameAdded {
            tournament_id,
            game_id,
        })
    }

    fn remove_tournament(
        &mut self,
        cmd: RemoveTournamentCommand,
    ) -> Result<CommandResponse, ApiError> {
        let tournament_id = ids::tournament_id(cmd.tournament_id)?;
        self.system.remove_tournament(tournament_id)?;
        Ok(CommandResponse::Ok)
    }

    fn remove_player(&mut self, cmd: RemovePlayerCommand) -> Result<CommandResponse, ApiError> {
        let player_id = ids::player_id(cmd.player_id)?;
        self.system.remove_player(player_id)?;
        Ok(CommandResponse::Ok)
    }

    fn end_tournament(&mut self, cmd: EndTournamentCommand) -> Result<CommandResponse, ApiError> {
        let tournament_id = ids::tournament_id(cmd.tournament_id)?;
        let winner_id = self.system.end_tournament(tournament_id)?;
        Ok(CommandResponse::TournamentEnded {
            tournament_id,
            winner_id,
        })
    }

    // ---------------------------------------------------------------------
    // Внутреннее
    // ---------------------------------------------------------------------

    fn ended_tournaments(&self) -> Result<Vec<TournamentStatsDto>, ApiError> {
        let stats: Vec<TournamentStatsDto> = self
            .system
            .tournament_statistics()
            .iter()
            .map(mapping::map_statistics_to_dto)
            .collect();

        if stats.is_empty() {
            return Err(ApiError::NoTournamentsEnded);
        }
        Ok(stats)
    }

    fn players_levels(&self) -> Vec<PlayerLevelDto> {
        self.system
            .players_levels()
            .iter()
            .map(mapping::map_level_to_dto)
            .collect()
    }
}
