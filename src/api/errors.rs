use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::InvalidIdError;
use crate::engine::ChessError;

/// Коды ошибок внешнего API – закрытый набор, как его видит клиент.
#[derive(Clone, Copy, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Обязательный аргумент не передан (например, место турнира).
    #[error("null argument")]
    NullArgument,

    #[error("invalid id")]
    InvalidId,

    #[error("invalid location")]
    InvalidLocation,

    #[error("invalid max games per player")]
    InvalidMaxGames,

    #[error("invalid play time")]
    InvalidPlayTime,

    #[error("tournament already exists")]
    TournamentAlreadyExists,

    #[error("tournament does not exist")]
    TournamentNotExist,

    #[error("player does not exist")]
    PlayerNotExist,

    #[error("game already exists")]
    GameAlreadyExists,

    #[error("exceeded games")]
    ExceededGames,

    #[error("tournament ended")]
    TournamentEnded,

    #[error("no games")]
    NoGames,

    #[error("no tournaments ended")]
    NoTournamentsEnded,

    #[error("save failure")]
    SaveFailure,

    #[error("out of memory")]
    OutOfMemory,
}

impl From<ChessError> for ApiError {
    fn from(err: ChessError) -> Self {
        match err {
            ChessError::InvalidId => ApiError::InvalidId,
            ChessError::InvalidLocation(_) => ApiError::InvalidLocation,
            ChessError::InvalidMaxGames => ApiError::InvalidMaxGames,
            ChessError::InvalidPlayTime(_) => ApiError::InvalidPlayTime,
            ChessError::TournamentAlreadyExists(_) => ApiError::TournamentAlreadyExists,
            ChessError::TournamentNotFound(_) => ApiError::TournamentNotExist,
            ChessError::PlayerNotFound(_) => ApiError::PlayerNotExist,
            ChessError::GameAlreadyExists { .. } => ApiError::GameAlreadyExists,
            ChessError::ExceededGames { .. } => ApiError::ExceededGames,
            ChessError::TournamentEnded(_) => ApiError::TournamentEnded,
            ChessError::NoGames(_) => ApiError::NoGames,
            ChessError::OutOfMemory => ApiError::OutOfMemory,
            // Нарушенный инвариант снаружи выглядит как сбой ресурсов.
            ChessError::Internal(_) => ApiError::OutOfMemory,
        }
    }
}

impl From<InvalidIdError> for ApiError {
    fn from(_: InvalidIdError) -> Self {
        ApiError::InvalidId
    }
}
