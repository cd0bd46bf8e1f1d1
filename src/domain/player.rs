use thiserror::Error;

use crate::domain::game::Game;
use crate::domain::player_in_tournament::{
    GameResult, PlayerInTournament, PlayerInTournamentError, Promotion,
};
use crate::domain::scoring::ScoringConfig;
use crate::domain::{GameId, PlayerId, TournamentId};
use crate::infra::store::{AssociativeStore, StoreError};

/// Ошибки уровня игрока.
///
/// Ошибки `PlayerInTournament` переводятся сюда один к одному.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlayerError {
    #[error("Игрок {player_id} не участвует в партии {game_id}")]
    PlayerNotInGame { player_id: PlayerId, game_id: GameId },

    #[error("Партия {game_id} уже записана у игрока")]
    GameAlreadyExists { game_id: GameId },

    #[error("Превышен лимит партий на игрока ({capacity})")]
    ExceededGames { capacity: u32 },

    #[error("Партия из турнира {found}, а запись ведётся для турнира {expected}")]
    ConflictingId {
        expected: TournamentId,
        found: TournamentId,
    },

    #[error("Нечего пересчитывать после удаления соперника")]
    NothingToPromote,

    #[error("Партия {game_id} не последняя записанная")]
    GameNotRecorded { game_id: GameId },

    #[error("Игрок не играл в турнире {tournament_id}")]
    TournamentNotFound { tournament_id: TournamentId },

    #[error("Запись игрока для турнира {tournament_id} уже есть")]
    TournamentAlreadyExists { tournament_id: TournamentId },

    #[error("Недостаточно памяти")]
    OutOfMemory,
}

impl From<PlayerInTournamentError> for PlayerError {
    fn from(err: PlayerInTournamentError) -> Self {
        match err {
            PlayerInTournamentError::PlayerNotInGame { player_id, game_id } => {
                PlayerError::PlayerNotInGame { player_id, game_id }
            }
            PlayerInTournamentError::GameAlreadyExists { game_id } => {
                PlayerError::GameAlreadyExists { game_id }
            }
            PlayerInTournamentError::ExceededGames { capacity } => {
                PlayerError::ExceededGames { capacity }
            }
            PlayerInTournamentError::ConflictingId { expected, found } => {
                PlayerError::ConflictingId { expected, found }
            }
            PlayerInTournamentError::NothingToPromote => PlayerError::NothingToPromote,
            PlayerInTournamentError::GameNotRecorded { game_id } => {
                PlayerError::GameNotRecorded { game_id }
            }
            PlayerInTournamentError::OutOfMemory => PlayerError::OutOfMemory,
        }
    }
}

/// Игрок и его суммарная статистика по всем турнирам.
///
/// Итоги (wins/draws/losses/total_time) – это сумма по всем записям
/// `PlayerInTournament`. Они обновляются инкрементально на каждом
/// `add_game` / `remove_tournament` / пересчёте после удаления соперника,
/// а с нуля пересчитываются только при глубоком копировании.
#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    tournaments: AssociativeStore<TournamentId, PlayerInTournament>,
    wins: u32,
    draws: u32,
    losses: u32,
    total_time: u64,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            tournaments: AssociativeStore::new(),
            wins: 0,
            draws: 0,
            losses: 0,
            total_time: 0,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
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

    /// Уровень игрока, 0 если партий нет.
    pub fn level(&self, scoring: &ScoringConfig) -> f64 {
        scoring.level(self.wins, self.draws, self.losses)
    }

    /// Среднее время партии, 0 если партий нет.
    pub fn average_time(&self) -> f64 {
        let games = self.total_games();
        if games == 0 {
            return 0.0;
        }
        self.total_time as f64 / f64::from(games)
    }

    pub fn plays_in(&self, tournament_id: TournamentId) -> bool {
        self.tournaments.contains(&tournament_id)
    }

    /// Запись игрока в конкретном турнире.
    pub fn record(&self, tournament_id: TournamentId) -> Option<&PlayerInTournament> {
        self.tournaments.get(&tournament_id)
    }

    /// Все записи, в порядке id турнира.
    pub fn records(&self) -> impl Iterator<Item = &PlayerInTournament> {
        self.tournaments.values()
    }

    /// Турниры, в которых игрок когда-либо играл (снимок ключей).
    pub fn tournament_ids(&self) -> Vec<TournamentId> {
        self.tournaments.keys_snapshot()
    }

    pub fn can_play_more_in(&self, tournament_id: TournamentId) -> bool {
        self.record(tournament_id)
            .map(PlayerInTournament::can_play_more)
            .unwrap_or(false)
    }

    pub fn wins_in(&self, tournament_id: TournamentId) -> u32 {
        self.record(tournament_id).map_or(0, PlayerInTournament::wins)
    }

    pub fn draws_in(&self, tournament_id: TournamentId) -> u32 {
        self.record(tournament_id).map_or(0, PlayerInTournament::draws)
    }

    pub fn losses_in(&self, tournament_id: TournamentId) -> u32 {
        self.record(tournament_id).map_or(0, PlayerInTournament::losses)
    }

    /// Партии игрока в турнире, в порядке записи. Пусто, если не играл.
    pub fn game_ids_in(&self, tournament_id: TournamentId) -> &[GameId] {
        self.record(tournament_id)
            .map(PlayerInTournament::game_ids)
            .unwrap_or(&[])
    }

    /// Завести запись для нового турнира.
    pub fn add_tournament(
        &mut self,
        tournament_id: TournamentId,
        capacity: u32,
    ) -> Result<(), PlayerError> {
        if self.tournaments.contains(&tournament_id) {
            return Err(PlayerError::TournamentAlreadyExists { tournament_id });
        }

        self.tournaments
            .put(
                tournament_id,
                PlayerInTournament::new(self.id, tournament_id, capacity),
            )
            .map_err(|_| PlayerError::OutOfMemory)
    }

    /// Записать партию в запись её турнира и обновить итоги на тот же шаг.
    ///
    /// Запись турнира должна уже существовать – её создаёт вызывающий
    /// (один раз, при первой партии игрока в турнире).
    pub fn add_game(&mut self, game: &Game) -> Result<GameResult, PlayerError> {
        let tournament_id = game.tournament_id();
        let record = self
            .tournaments
            .get_mut(&tournament_id)
            .ok_or(PlayerError::TournamentNotFound { tournament_id })?;

        let result = record.add_game(game)?;

        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::Loss => self.losses += 1,
        }
        self.total_time += u64::from(game.duration());

        Ok(result)
    }

    /// Откатить последнюю партию (обратная операция к `add_game`).
    pub fn remove_last_game(&mut self, game: &Game) -> Result<(), PlayerError> {
        let tournament_id = game.tournament_id();
        let record = self
            .tournaments
            .get_mut(&tournament_id)
            .ok_or(PlayerError::TournamentNotFound { tournament_id })?;

        match record.remove_last_game(game)? {
            GameResult::Win => self.wins -= 1,
            GameResult::Draw => self.draws -= 1,
            GameResult::Loss => self.losses -= 1,
        }
        self.total_time = self.total_time.saturating_sub(u64::from(game.duration()));

        Ok(())
    }

    /// Удалить запись турнира, вычтя его вклад из итогов.
    pub fn remove_tournament(&mut self, tournament_id: TournamentId) -> Result<(), PlayerError> {
        let record = self
            .tournaments
            .get(&tournament_id)
            .ok_or(PlayerError::TournamentNotFound { tournament_id })?;

        self.wins -= record.wins();
        self.draws -= record.draws();
        self.losses -= record.losses();
        self.total_time = self.total_time.saturating_sub(record.total_time());

        self.tournaments
            .remove(&tournament_id)
            .map_err(|_| PlayerError::TournamentNotFound { tournament_id })?;

        Ok(())
    }

    /// Соперник удалён из системы: ничья/поражение в турнире становится победой.
    pub fn promote_after_opponent_removal(
        &mut self,
        tournament_id: TournamentId,
        promotion: Promotion,
    ) -> Result<(), PlayerError> {
        let record = self
            .tournaments
            .get_mut(&tournament_id)
            .ok_or(PlayerError::TournamentNotFound { tournament_id })?;

        record.promote(promotion)?;

        match promotion {
            Promotion::DrawToWin => self.draws -= 1,
            Promotion::LossToWin => self.losses -= 1,
        }
        self.wins += 1;

        Ok(())
    }

    /// Глубокая копия игрока; итоги пересчитываются заново из записей.
    pub fn try_copy(&self) -> Result<Self, StoreError> {
        let mut copy = Self {
            id: self.id,
            tournaments: self.tournaments.try_copy()?,
            wins: 0,
            draws: 0,
            losses: 0,
            total_time: 0,
        };
        copy.recompute_totals();
        Ok(copy)
    }

    fn recompute_totals(&mut self) {
        let (mut wins, mut draws, mut losses, mut total_time) = (0, 0, 0, 0u64);
        for record in self.tournaments.values() {
            wins += record.wins();
            draws += record.draws();
            losses += record.losses();
            total_time += record.total_time();
        }
        self.wins = wins;
        self.draws = draws;
        self.losses = losses;
        self.total_time = total_time;
    }
}
