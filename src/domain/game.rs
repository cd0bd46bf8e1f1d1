use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{GameId, PlayerId, TournamentId};

/// Исход партии в том виде, в каком его записали.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameOutcome {
    FirstPlayer,
    SecondPlayer,
    Draw,
}

/// Слот игрока в партии.
///
/// После удаления игрока из системы слот остаётся в партии (для истории),
/// но больше не указывает ни на какого игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerSlot {
    Active(PlayerId),
    Deleted,
}

impl PlayerSlot {
    pub fn player_id(self) -> Option<PlayerId> {
        match self {
            PlayerSlot::Active(id) => Some(id),
            PlayerSlot::Deleted => None,
        }
    }

    pub fn is_player(self, player_id: PlayerId) -> bool {
        self == PlayerSlot::Active(player_id)
    }
}

/// Победитель партии по текущему состоянию слотов.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameWinner {
    Player(PlayerId),
    Draw,
    /// Выигравший слот сам был удалён.
    Deleted,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("Игрок {player_id} не участвует в партии {game_id}")]
    PlayerNotInGame { player_id: PlayerId, game_id: GameId },
}

/// Одна сыгранная партия.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Game {
    tournament_id: TournamentId,
    id: GameId,
    first: PlayerSlot,
    second: PlayerSlot,
    outcome: GameOutcome,
    /// Длительность в секундах.
    duration: u32,
}

impl Game {
    pub fn new(
        tournament_id: TournamentId,
        id: GameId,
        first: PlayerId,
        second: PlayerId,
        outcome: GameOutcome,
        duration: u32,
    ) -> Self {
        Self {
            tournament_id,
            id,
            first: PlayerSlot::Active(first),
            second: PlayerSlot::Active(second),
            outcome,
            duration,
        }
    }

    pub fn tournament_id(&self) -> TournamentId {
        self.tournament_id
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn first(&self) -> PlayerSlot {
        self.first
    }

    pub fn second(&self) -> PlayerSlot {
        self.second
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.first.is_player(player_id) || self.second.is_player(player_id)
    }

    /// Соперник игрока в этой партии.
    ///
    /// `None`, если игрока в партии нет или слот соперника уже удалён.
    pub fn opponent_of(&self, player_id: PlayerId) -> Option<PlayerId> {
        if self.first.is_player(player_id) {
            self.second.player_id()
        } else if self.second.is_player(player_id) {
            self.first.player_id()
        } else {
            None
        }
    }

    pub fn winner(&self) -> GameWinner {
        let slot = match self.outcome {
            GameOutcome::Draw => return GameWinner::Draw,
            GameOutcome::FirstPlayer => self.first,
            GameOutcome::SecondPlayer => self.second,
        };

        match slot {
            PlayerSlot::Active(id) => GameWinner::Player(id),
            PlayerSlot::Deleted => GameWinner::Deleted,
        }
    }

    /// Убрать игрока из партии.
    ///
    /// Слот помечается удалённым. Если удалённый игрок был победителем,
    /// победа переходит оставшемуся слоту; ничья остаётся ничьей.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), GameError> {
        if self.first.is_player(player_id) {
            self.first = PlayerSlot::Deleted;
            if self.outcome == GameOutcome::FirstPlayer {
                self.outcome = GameOutcome::SecondPlayer;
            }
            return Ok(());
        }

        if self.second.is_player(player_id) {
            self.second = PlayerSlot::Deleted;
            if self.outcome == GameOutcome::SecondPlayer {
                self.outcome = GameOutcome::FirstPlayer;
            }
            return Ok(());
        }

        Err(GameError::PlayerNotInGame {
            player_id,
            game_id: self.id,
        })
    }
}
