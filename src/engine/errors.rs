use thiserror::Error;

use crate::domain::player::PlayerError;
use crate::domain::tournament::TournamentError;
use crate::domain::{PlayerId, TournamentId};

/// Ошибки шахматной системы.
///
/// Ошибки турнира и игрока переводятся сюда один к одному; то, что при
/// нормальном потоке случиться не может, уходит в `Internal`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("Некорректный идентификатор")]
    InvalidId,

    #[error("Некорректное место проведения: {0:?}")]
    InvalidLocation(String),

    #[error("Некорректный лимит партий на игрока")]
    InvalidMaxGames,

    #[error("Некорректное время партии: {0}")]
    InvalidPlayTime(i64),

    #[error("Турнир {0} уже существует")]
    TournamentAlreadyExists(TournamentId),

    #[error("Турнир {0} не найден")]
    TournamentNotFound(TournamentId),

    #[error("Игрок {0} не найден")]
    PlayerNotFound(PlayerId),

    #[error("Партия между {first} и {second} в этом турнире уже сыграна")]
    GameAlreadyExists { first: PlayerId, second: PlayerId },

    #[error("Игрок {player_id} исчерпал лимит партий в турнире {tournament_id}")]
    ExceededGames {
        player_id: PlayerId,
        tournament_id: TournamentId,
    },

    #[error("Турнир {0} уже завершён")]
    TournamentEnded(TournamentId),

    #[error("В турнире {0} ещё нет партий")]
    NoGames(TournamentId),

    #[error("Недостаточно памяти")]
    OutOfMemory,

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl From<TournamentError> for ChessError {
    fn from(err: TournamentError) -> Self {
        match err {
            TournamentError::InvalidLocation { location } => ChessError::InvalidLocation(location),
            TournamentError::InvalidMaxGames => ChessError::InvalidMaxGames,
            TournamentError::InvalidId { .. } => ChessError::InvalidId,
            TournamentError::InvalidPlayTime { duration } => ChessError::InvalidPlayTime(duration),
            TournamentError::Ended { tournament_id } => ChessError::TournamentEnded(tournament_id),
            TournamentError::NoGames { tournament_id } => ChessError::NoGames(tournament_id),
            TournamentError::OutOfMemory => ChessError::OutOfMemory,
            TournamentError::GameIdsExhausted { .. } => ChessError::OutOfMemory,
            TournamentError::InvalidNewPlayers { .. } => {
                ChessError::Internal("new players count out of range")
            }
            TournamentError::GameNotFound { .. } => {
                ChessError::Internal("game id recorded by player is missing in tournament")
            }
            TournamentError::PlayerNotInGame { .. } => {
                ChessError::Internal("player recorded a game he does not play in")
            }
        }
    }
}

impl From<PlayerError> for ChessError {
    fn from(err: PlayerError) -> Self {
        match err {
            PlayerError::GameAlreadyExists { .. } => ChessError::Internal("game id recorded twice"),
            PlayerError::ExceededGames { .. } => {
                ChessError::Internal("player capacity exceeded after validation")
            }
            PlayerError::PlayerNotInGame { .. } => {
                ChessError::Internal("player is not a participant of the game")
            }
            PlayerError::ConflictingId { .. } => {
                ChessError::Internal("game belongs to another tournament")
            }
            PlayerError::NothingToPromote => {
                ChessError::Internal("opponent promotion without a source result")
            }
            PlayerError::GameNotRecorded { .. } => {
                ChessError::Internal("rollback of a game that was not recorded last")
            }
            PlayerError::TournamentNotFound { tournament_id } => {
                ChessError::TournamentNotFound(tournament_id)
            }
            PlayerError::TournamentAlreadyExists { tournament_id } => {
                ChessError::TournamentAlreadyExists(tournament_id)
            }
            PlayerError::OutOfMemory => ChessError::OutOfMemory,
        }
    }
}
