//! Доменная модель шахматной системы: партии, игроки, турниры, учёт очков.
//!
//! Владение строго иерархическое:
//!   ChessSystem → {Tournament, Player} → {Game | PlayerInTournament}.
//! Обратных ссылок нет – вместо них идентификаторы.

pub mod game;
pub mod player;
pub mod player_in_tournament;
pub mod scoring;
pub mod tournament;

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Сырое значение идентификатора не прошло проверку (<= 0 или не влезает в u32).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Некорректный идентификатор: {0}")]
pub struct InvalidIdError(pub i64);

/// Идентификатор игрока. Всегда > 0.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i64", into = "i64")]
pub struct PlayerId(u32);

/// Идентификатор турнира. Всегда > 0.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i64", into = "i64")]
pub struct TournamentId(u32);

impl PlayerId {
    /// `None` для неположительных значений.
    pub fn new(raw: i64) -> Option<Self> {
        positive_u32(raw).map(PlayerId)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TournamentId {
    /// `None` для неположительных значений.
    pub fn new(raw: i64) -> Option<Self> {
        positive_u32(raw).map(TournamentId)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

fn positive_u32(raw: i64) -> Option<u32> {
    if raw <= 0 {
        return None;
    }
    u32::try_from(raw).ok()
}

impl TryFrom<i64> for PlayerId {
    type Error = InvalidIdError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        PlayerId::new(raw).ok_or(InvalidIdError(raw))
    }
}

impl TryFrom<i64> for TournamentId {
    type Error = InvalidIdError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        TournamentId::new(raw).ok_or(InvalidIdError(raw))
    }
}

impl From<PlayerId> for i64 {
    fn from(id: PlayerId) -> Self {
        i64::from(id.0)
    }
}

impl From<TournamentId> for i64 {
    fn from(id: TournamentId) -> Self {
        i64::from(id.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Порядковый номер партии внутри турнира.
///
/// Выдаётся турниром при добавлении партии (0, 1, 2, ...) и никогда не переиспользуется.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameId(pub u32);

impl GameId {
    pub const FIRST: GameId = GameId(0);

    /// Следующий номер. `None` – номера исчерпаны.
    pub fn next(self) -> Option<GameId> {
        self.0.checked_add(1).map(GameId)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub use game::*;
pub use player::*;
pub use player_in_tournament::*;
pub use scoring::*;
pub use tournament::*;
