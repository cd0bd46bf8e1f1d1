use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::game::{Game, GameWinner};
use crate::domain::scoring::ScoringConfig;
use crate::domain::{GameId, PlayerId, TournamentId};

/// Результат одной партии с точки зрения конкретного игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Draw,
    Loss,
}

/// Пересчёт результата после удаления соперника.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Promotion {
    DrawToWin,
    LossToWin,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInTournamentError {
    #[error("Игрок {player_id} не участвует в партии {game_id}")]
    PlayerNotInGame { player_id: PlayerId, game_id: GameId },

    #[error("Партия {game_id} уже записана")]
    GameAlreadyExists { game_id: GameId },

    #[error("Превышен лимит партий на игрока ({capacity})")]
    ExceededGames { capacity: u32 },

    #[error("Партия из турнира {found}, а запись ведётся для турнира {expected}")]
    ConflictingId {
        expected: TournamentId,
        found: TournamentId,
    },

    #[error("Нечего пересчитывать: счётчик источника равен нулю")]
    NothingToPromote,

    #[error("Партия {game_id} не последняя записанная")]
    GameNotRecorded { game_id: GameId },

    #[error("Недостаточно памяти")]
    OutOfMemory,
}

/// Учёт игрока в одном турнире.
///
/// Инварианты:
///   - wins + draws + losses == game_ids.len() <= capacity;
///   - каждый GameId встречается не больше одного раза.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerInTournament {
    player_id: PlayerId,
    tournament_id: TournamentId,
    /// Лимит партий – max_games_per_player турнира.
    capacity: u32,
    game_ids: Vec<GameId>,
    wins: u32,
    draws: u32,
    losses: u32,
    total_time: u64,
}

impl PlayerInTournament {
    pub fn new(player_id: PlayerId, tournament_id: TournamentId, capacity: u32) -> Self {
        Self {
            player_id,
            tournament_id,
            capacity,
            game_ids: Vec::new(),
            wins: 0,
            draws: 0,
            losses: 0,
            total_time: 0,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn tournament_id(&self) -> TournamentId {
        self.tournament_id
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Записанные партии в порядке добавления.
    pub fn game_ids(&self) -> &[GameId] {
        &self.game_ids
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn total_time(&self) -> u64 {
        self.total_time
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    pub fn can_play_more(&self) -> bool {
        self.recorded() < self.capacity
    }

    fn recorded(&self) -> u32 {
        u32::try_from(self.game_ids.len()).unwrap_or(u32::MAX)
    }

    /// Очки в турнире (по умолчанию 2 за победу, 1 за ничью).
    pub fn score(&self, scoring: &ScoringConfig) -> i64 {
        scoring.tournament_win_points * i64::from(self.wins)
            + scoring.tournament_draw_points * i64::from(self.draws)
            + scoring.tournament_loss_points * i64::from(self.losses)
    }

    /// Какой результат эта партия даёт нашему игроку.
    pub fn result_for(&self, game: &Game) -> GameResult {
        match game.winner() {
            GameWinner::Player(id) if id == self.player_id => GameResult::Win,
            GameWinner::Draw => GameResult::Draw,
            _ => GameResult::Loss,
        }
    }

    /// Записать партию.
    ///
    /// Порядок проверок: участие → дубль → лимит → турнир.
    /// При ошибке ничего не меняется.
    pub fn add_game(&mut self, game: &Game) -> Result<GameResult, PlayerInTournamentError> {
        if !game.has_player(self.player_id) {
            return Err(PlayerInTournamentError::PlayerNotInGame {
                player_id: self.player_id,
                game_id: game.id(),
            });
        }

        if self.game_ids.contains(&game.id()) {
            return Err(PlayerInTournamentError::GameAlreadyExists { game_id: game.id() });
        }

        if !self.can_play_more() {
            return Err(PlayerInTournamentError::ExceededGames {
                capacity: self.capacity,
            });
        }

        if game.tournament_id() != self.tournament_id {
            return Err(PlayerInTournamentError::ConflictingId {
                expected: self.tournament_id,
                found: game.tournament_id(),
            });
        }

        self.game_ids
            .try_reserve(1)
            .map_err(|_| PlayerInTournamentError::OutOfMemory)?;
        self.game_ids.push(game.id());
        self.total_time += u64::from(game.duration());

        let result = self.result_for(game);
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::Loss => self.losses += 1,
        }

        Ok(result)
    }

    /// Откатить последнюю записанную партию (обратная операция к `add_game`).
    pub fn remove_last_game(&mut self, game: &Game) -> Result<GameResult, PlayerInTournamentError> {
        if self.game_ids.last() != Some(&game.id()) {
            return Err(PlayerInTournamentError::GameNotRecorded { game_id: game.id() });
        }

        let result = self.result_for(game);
        let counter = match result {
            GameResult::Win => &mut self.wins,
            GameResult::Draw => &mut self.draws,
            GameResult::Loss => &mut self.losses,
        };
        if *counter == 0 {
            return Err(PlayerInTournamentError::GameNotRecorded { game_id: game.id() });
        }
        *counter -= 1;

        self.game_ids.pop();
        self.total_time = self.total_time.saturating_sub(u64::from(game.duration()));

        Ok(result)
    }

    /// Соперник удалён, ничья превращается в победу.
    pub fn promote_draw_to_win(&mut self) -> Result<(), PlayerInTournamentError> {
        if self.draws == 0 {
            return Err(PlayerInTournamentError::NothingToPromote);
        }
        self.draws -= 1;
        self.wins += 1;
        Ok(())
    }

    /// Соперник удалён, поражение превращается в победу.
    pub fn promote_loss_to_win(&mut self) -> Result<(), PlayerInTournamentError> {
        if self.losses == 0 {
            return Err(PlayerInTournamentError::NothingToPromote);
        }
        self.losses -= 1;
        self.wins += 1;
        Ok(())
    }

    pub fn promote(&mut self, promotion: Promotion) -> Result<(), PlayerInTournamentError> {
        match promotion {
            Promotion::DrawToWin => self.promote_draw_to_win(),
            Promotion::LossToWin => self.promote_loss_to_win(),
        }
    }
}
