// src/domain/tournament.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::game::{Game, GameError, GameOutcome};
use crate::domain::{GameId, PlayerId, TournamentId};
use crate::infra::store::AssociativeStore;

/// Конфигурация турнира – то, что приходит при создании.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentConfig {
    /// Сколько партий может сыграть один игрок в этом турнире (>= 1).
    pub max_games_per_player: u32,

    /// Место проведения: первая буква заглавная латинская,
    /// дальше только строчные латинские буквы и пробелы.
    pub location: String,
}

impl TournamentConfig {
    pub fn new(max_games_per_player: u32, location: impl Into<String>) -> Self {
        Self {
            max_games_per_player,
            location: location.into(),
        }
    }

    /// Сначала место, потом лимит партий.
    pub fn validate(&self) -> Result<(), TournamentError> {
        if !is_valid_location(&self.location) {
            return Err(TournamentError::InvalidLocation {
                location: self.location.clone(),
            });
        }

        if self.max_games_per_player == 0 {
            return Err(TournamentError::InvalidMaxGames);
        }

        Ok(())
    }
}

/// "Paris", "Tel aviv" – да; "paris", "Tel Aviv", "" – нет.
pub fn is_valid_location(location: &str) -> bool {
    let mut chars = location.chars();

    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_lowercase() || c == ' ')
}

/// Итоговая статистика завершённого турнира.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TournamentStatistics {
    pub tournament_id: TournamentId,
    pub winner_id: PlayerId,
    pub longest_game: u32,
    pub average_game_time: f64,
    pub location: String,
    pub games_count: u32,
    pub player_count: u32,
}

/// Основной объект турнира.
#[derive(Clone, Debug)]
pub struct Tournament {
    id: TournamentId,
    config: TournamentConfig,

    /// Победитель. `None` – турнир ещё идёт.
    winner: Option<PlayerId>,

    /// Самая длинная партия (сек).
    longest_game: u32,

    /// Суммарное время всех партий (для среднего).
    total_game_time: u64,

    /// Следующий номер партии. Монотонно растёт, номера не переиспользуются.
    next_game_id: GameId,

    /// Сколько разных игроков сыграло в турнире.
    ///
    /// Растёт только когда партия приводит игрока, который раньше
    /// в этом турнире не играл (считает вызывающий).
    player_count: u32,

    games: AssociativeStore<GameId, Game>,
}

impl Tournament {
    pub fn new(id: TournamentId, config: TournamentConfig) -> Result<Self, TournamentError> {
        config.validate()?;

        Ok(Self {
            id,
            config,
            winner: None,
            longest_game: 0,
            total_game_time: 0,
            next_game_id: GameId::FIRST,
            player_count: 0,
            games: AssociativeStore::new(),
        })
    }

    pub fn id(&self) -> TournamentId {
        self.id
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn location(&self) -> &str {
        &self.config.location
    }

    pub fn max_games_per_player(&self) -> u32 {
        self.config.max_games_per_player
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Турнир завершён, если победитель уже назначен.
    pub fn is_ended(&self) -> bool {
        self.winner.is_some()
    }

    pub fn longest_game(&self) -> u32 {
        self.longest_game
    }

    pub fn total_game_time(&self) -> u64 {
        self.total_game_time
    }

    pub fn games_count(&self) -> u32 {
        u32::try_from(self.games.len()).unwrap_or(u32::MAX)
    }

    pub fn player_count(&self) -> u32 {
        self.player_count
    }

    pub fn next_game_id(&self) -> GameId {
        self.next_game_id
    }

    /// Среднее время партии, 0 если партий не было.
    pub fn average_game_time(&self) -> f64 {
        let games = self.games.len();
        if games == 0 {
            return 0.0;
        }
        self.total_game_time as f64 / games as f64
    }

    pub fn game(&self, game_id: GameId) -> Option<&Game> {
        self.games.get(&game_id)
    }

    /// Все партии в порядке номеров.
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    /// Добавить партию.
    ///
    /// Порядок проверок: id игроков → время → турнир завершён.
    /// `new_players` – сколько из двух игроков впервые играют в этом турнире (0..=2).
    /// Возвращает номер новой партии.
    pub fn add_game(
        &mut self,
        first: PlayerId,
        second: PlayerId,
        outcome: GameOutcome,
        duration: i64,
        new_players: u32,
    ) -> Result<GameId, TournamentError> {
        if first == second {
            return Err(TournamentError::InvalidId { first, second });
        }

        let duration = u32::try_from(duration)
            .map_err(|_| TournamentError::InvalidPlayTime { duration })?;

        if self.is_ended() {
            return Err(TournamentError::Ended {
                tournament_id: self.id,
            });
        }

        if new_players > 2 {
            return Err(TournamentError::InvalidNewPlayers { new_players });
        }

        let game_id = self.next_game_id;
        let next_game_id = game_id
            .next()
            .ok_or(TournamentError::GameIdsExhausted { game_id })?;
        let game = Game::new(self.id, game_id, first, second, outcome, duration);
        self.games
            .put(game_id, game)
            .map_err(|_| TournamentError::OutOfMemory)?;

        self.longest_game = self.longest_game.max(duration);
        self.total_game_time += u64::from(duration);
        self.player_count += new_players;
        self.next_game_id = next_game_id;

        Ok(game_id)
    }

    /// Отозвать только что добавленную партию (откат неудачного добавления).
    ///
    /// Номер партии возвращается в оборот – наружу он так и не попал.
    pub fn withdraw_last_game(
        &mut self,
        game_id: GameId,
        new_players: u32,
    ) -> Result<(), TournamentError> {
        if game_id.next() != Some(self.next_game_id) {
            return Err(TournamentError::GameNotFound { game_id });
        }

        let game = self
            .games
            .remove(&game_id)
            .map_err(|_| TournamentError::GameNotFound { game_id })?;

        self.total_game_time = self
            .total_game_time
            .saturating_sub(u64::from(game.duration()));
        self.player_count = self.player_count.saturating_sub(new_players);
        self.next_game_id = game_id;
        self.longest_game = self.games.values().map(Game::duration).max().unwrap_or(0);

        Ok(())
    }

    /// Убрать игрока из своих партий в этом турнире.
    ///
    /// Сначала проверяем все партии, потом меняем – либо все, либо ни одной.
    pub fn remove_player(
        &mut self,
        player_id: PlayerId,
        game_ids: &[GameId],
    ) -> Result<(), TournamentError> {
        if self.is_ended() {
            return Err(TournamentError::Ended {
                tournament_id: self.id,
            });
        }

        let capacity = self.config.max_games_per_player as usize;
        let game_ids = &game_ids[..game_ids.len().min(capacity)];

        for game_id in game_ids {
            let game = self
                .games
                .get(game_id)
                .ok_or(TournamentError::GameNotFound { game_id: *game_id })?;
            if !game.has_player(player_id) {
                return Err(TournamentError::PlayerNotInGame {
                    player_id,
                    game_id: *game_id,
                });
            }
        }

        for game_id in game_ids {
            if let Some(game) = self.games.get_mut(game_id) {
                game.remove_player(player_id)?;
            }
        }

        Ok(())
    }

    /// Завершить турнир с уже посчитанным победителем.
    ///
    /// Сам турнир победителя не выбирает – это делает ChessSystem.
    pub fn end(&mut self, winner: PlayerId) -> Result<(), TournamentError> {
        if self.is_ended() {
            return Err(TournamentError::Ended {
                tournament_id: self.id,
            });
        }

        if self.games.is_empty() {
            return Err(TournamentError::NoGames {
                tournament_id: self.id,
            });
        }

        self.winner = Some(winner);
        Ok(())
    }

    /// Статистика для выгрузки. `None`, пока турнир не завершён.
    pub fn statistics(&self) -> Option<TournamentStatistics> {
        let winner_id = self.winner?;

        Some(TournamentStatistics {
            tournament_id: self.id,
            winner_id,
            longest_game: self.longest_game,
            average_game_time: self.average_game_time(),
            location: self.config.location.clone(),
            games_count: self.games_count(),
            player_count: self.player_count,
        })
    }
}

/// Ошибки, которые могут возникать при работе с турниром.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TournamentError {
    #[error("Invalid tournament location: {location:?}")]
    InvalidLocation { location: String },

    #[error("Invalid max games per player: must be at least 1")]
    InvalidMaxGames,

    #[error("Invalid players for a game: {first} vs {second}")]
    InvalidId { first: PlayerId, second: PlayerId },

    #[error("Invalid play time: {duration}")]
    InvalidPlayTime { duration: i64 },

    #[error("Invalid new players count: {new_players}")]
    InvalidNewPlayers { new_players: u32 },

    #[error("Tournament {tournament_id} has already ended")]
    Ended { tournament_id: TournamentId },

    #[error("Tournament {tournament_id} has no games")]
    NoGames { tournament_id: TournamentId },

    #[error("Game {game_id} not found")]
    GameNotFound { game_id: GameId },

    #[error("Player {player_id} is not in game {game_id}")]
    PlayerNotInGame { player_id: PlayerId, game_id: GameId },

    #[error("No game ids left after {game_id}")]
    GameIdsExhausted { game_id: GameId },

    #[error("Out of memory")]
    OutOfMemory,
}

impl From<GameError> for TournamentError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::PlayerNotInGame { player_id, game_id } => {
                TournamentError::PlayerNotInGame { player_id, game_id }
            }
        }
    }
}
