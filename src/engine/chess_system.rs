// src/engine/chess_system.rs

use tracing::{debug, info, warn};

use crate::domain::game::{Game, GameOutcome, GameWinner};
use crate::domain::player::Player;
use crate::domain::player_in_tournament::Promotion;
use crate::domain::scoring::{ScoringConfig, ScoringConfigError};
use crate::domain::tournament::{Tournament, TournamentConfig, TournamentStatistics};
use crate::domain::{GameId, PlayerId, TournamentId};
use crate::engine::errors::ChessError;
use crate::engine::standings::{pick_winner, sort_standings, Standing};
use crate::engine::validation::{prepare_add_game, AddGamePlan};
use crate::infra::store::AssociativeStore;

/// Уровень игрока для выгрузки.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerLevel {
    pub player_id: PlayerId,
    pub level: f64,
}

/// Что уже сделано при записи партии – чтобы откатить при ошибке.
#[derive(Debug, Default)]
struct AddGameUndo {
    created_players: Vec<PlayerId>,
    created_entries: Vec<PlayerId>,
    game: Option<(Game, u32)>,
    recorded_by: Vec<PlayerId>,
}

/// Вся шахматная система: турниры и игроки.
///
/// Единственный объект, который видит оба хранилища сразу,
/// поэтому все операции, затрагивающие несколько сущностей, живут здесь.
#[derive(Clone, Debug, Default)]
pub struct ChessSystem {
    tournaments: AssociativeStore<TournamentId, Tournament>,
    players: AssociativeStore<PlayerId, Player>,
    scoring: ScoringConfig,
}

impl ChessSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Система с нестандартными весами очков/уровня.
    pub fn with_config(scoring: ScoringConfig) -> Result<Self, ScoringConfigError> {
        scoring.validate()?;
        Ok(Self {
            tournaments: AssociativeStore::new(),
            players: AssociativeStore::new(),
            scoring,
        })
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    // ---------------------------------------------------------------------
    // Турниры
    // ---------------------------------------------------------------------

    /// Создать турнир.
    ///
    /// Сначала проверяется, что id свободен, потом место и лимит партий.
    pub fn add_tournament(
        &mut self,
        tournament_id: TournamentId,
        config: TournamentConfig,
    ) -> Result<(), ChessError> {
        if self.tournaments.contains(&tournament_id) {
            return Err(ChessError::TournamentAlreadyExists(tournament_id));
        }

        let tournament = Tournament::new(tournament_id, config)?;
        self.tournaments
            .put(tournament_id, tournament)
            .map_err(|_| ChessError::OutOfMemory)?;

        debug!(%tournament_id, "tournament added");
        Ok(())
    }

    /// Удалить турнир целиком вместе с его вкладом в статистику игроков.
    pub fn remove_tournament(&mut self, tournament_id: TournamentId) -> Result<(), ChessError> {
        self.tournaments
            .remove(&tournament_id)
            .map_err(|_| ChessError::TournamentNotFound(tournament_id))?;

        let mut affected = 0usize;
        let mut cursor = self.players.first();
        while let Some(player_id) = cursor {
            if let Some(player) = self.players.get_mut(&player_id) {
                if player.plays_in(tournament_id) {
                    player.remove_tournament(tournament_id)?;
                    affected += 1;
                }
            }
            cursor = self.players.next();
        }

        info!(%tournament_id, affected_players = affected, "tournament removed");
        Ok(())
    }

    /// Завершить турнир и выбрать победителя.
    pub fn end_tournament(&mut self, tournament_id: TournamentId) -> Result<PlayerId, ChessError> {
        let tournament = self
            .tournaments
            .get(&tournament_id)
            .ok_or(ChessError::TournamentNotFound(tournament_id))?;

        if tournament.is_ended() {
            return Err(ChessError::TournamentEnded(tournament_id));
        }

        if tournament.games_count() == 0 {
            return Err(ChessError::NoGames(tournament_id));
        }

        // Все участники могли быть удалены из системы: победителя нет.
        let winner = pick_winner(self.collect_standings(tournament_id))
            .ok_or(ChessError::NoGames(tournament_id))?;

        if let Some(tournament) = self.tournaments.get_mut(&tournament_id) {
            tournament.end(winner)?;
        }

        info!(%tournament_id, winner = %winner, "tournament ended");
        Ok(winner)
    }

    // ---------------------------------------------------------------------
    // Партии
    // ---------------------------------------------------------------------

    /// Записать партию.
    ///
    /// Две фазы: сначала все проверки без изменений, потом запись.
    /// Если запись ломается на полпути (память), всё сделанное откатывается.
    pub fn add_game(
        &mut self,
        tournament_id: TournamentId,
        first: PlayerId,
        second: PlayerId,
        outcome: GameOutcome,
        duration: i64,
    ) -> Result<GameId, ChessError> {
        let plan = prepare_add_game(
            &self.tournaments,
            &self.players,
            tournament_id,
            first,
            second,
            duration,
        )?;

        let mut undo = AddGameUndo::default();
        match self.commit_add_game(&plan, outcome, &mut undo) {
            Ok(game_id) => {
                debug!(
                    %tournament_id,
                    %game_id,
                    %first,
                    %second,
                    ?outcome,
                    duration,
                    "game added"
                );
                Ok(game_id)
            }
            Err(err) => {
                warn!(%tournament_id, %first, %second, error = %err, "add_game failed, rolling back");
                self.rollback_add_game(tournament_id, undo);
                Err(err)
            }
        }
    }

    fn commit_add_game(
        &mut self,
        plan: &AddGamePlan,
        outcome: GameOutcome,
        undo: &mut AddGameUndo,
    ) -> Result<GameId, ChessError> {
        let slots = [
            (plan.first, plan.create_first, plan.first_is_new),
            (plan.second, plan.create_second, plan.second_is_new),
        ];

        for (player_id, create, _) in slots {
            if create {
                self.players
                    .put(player_id, Player::new(player_id))
                    .map_err(|_| ChessError::OutOfMemory)?;
                undo.created_players.push(player_id);
            }
        }

        for (player_id, _, is_new) in slots {
            if is_new {
                self.player_mut(player_id)?
                    .add_tournament(plan.tournament_id, plan.capacity)?;
                undo.created_entries.push(player_id);
            }
        }

        let tournament = self
            .tournaments
            .get_mut(&plan.tournament_id)
            .ok_or(ChessError::TournamentNotFound(plan.tournament_id))?;
        let new_players = plan.new_players();
        let game_id = tournament.add_game(
            plan.first,
            plan.second,
            outcome,
            plan.duration,
            new_players,
        )?;
        let game = tournament
            .game(game_id)
            .cloned()
            .ok_or(ChessError::Internal("freshly added game is missing"))?;
        undo.game = Some((game.clone(), new_players));

        for player_id in [plan.first, plan.second] {
            self.player_mut(player_id)?.add_game(&game)?;
            undo.recorded_by.push(player_id);
        }

        Ok(game_id)
    }

    /// Откат в обратном порядке. Ошибки отката только логируются.
    fn rollback_add_game(&mut self, tournament_id: TournamentId, undo: AddGameUndo) {
        if let Some((game, new_players)) = &undo.game {
            for player_id in undo.recorded_by.iter().rev() {
                if let Some(player) = self.players.get_mut(player_id) {
                    if let Err(err) = player.remove_last_game(game) {
                        warn!(player_id = %player_id, error = %err, "rollback: remove_last_game failed");
                    }
                }
            }

            if let Some(tournament) = self.tournaments.get_mut(&tournament_id) {
                if let Err(err) = tournament.withdraw_last_game(game.id(), *new_players) {
                    warn!(%tournament_id, error = %err, "rollback: withdraw_last_game failed");
                }
            }
        }

        for player_id in undo.created_entries.iter().rev() {
            if let Some(player) = self.players.get_mut(player_id) {
                if let Err(err) = player.remove_tournament(tournament_id) {
                    warn!(player_id = %player_id, error = %err, "rollback: remove_tournament failed");
                }
            }
        }

        for player_id in undo.created_players.iter().rev() {
            if self.players.remove(player_id).is_err() {
                warn!(player_id = %player_id, "rollback: created player already gone");
            }
        }
    }

    // ---------------------------------------------------------------------
    // Игроки
    // ---------------------------------------------------------------------

    /// Удалить игрока из системы.
    ///
    /// В каждом незавершённом турнире его соперники получают победу
    /// за каждую партию, которую они не выиграли сами. Завершённые турниры
    /// не трогаем. Статистика самого игрока выбрасывается.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), ChessError> {
        let player = self
            .players
            .get(&player_id)
            .ok_or(ChessError::PlayerNotFound(player_id))?;

        let entries: Vec<(TournamentId, Vec<GameId>)> = player
            .records()
            .map(|record| (record.tournament_id(), record.game_ids().to_vec()))
            .collect();

        for (tournament_id, game_ids) in entries {
            let Some(tournament) = self.tournaments.get_mut(&tournament_id) else {
                continue;
            };
            if tournament.is_ended() {
                continue;
            }

            let promotions: Vec<(PlayerId, Promotion)> = game_ids
                .iter()
                .filter_map(|game_id| tournament.game(*game_id))
                .filter_map(|game| promotion_for_opponent(game, player_id))
                .collect();

            tournament.remove_player(player_id, &game_ids)?;

            for (opponent_id, promotion) in promotions {
                self.player_mut(opponent_id)?
                    .promote_after_opponent_removal(tournament_id, promotion)?;
                debug!(%tournament_id, opponent = %opponent_id, ?promotion, "opponent promoted");
            }
        }

        self.players
            .remove(&player_id)
            .map_err(|_| ChessError::PlayerNotFound(player_id))?;

        info!(%player_id, "player removed");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Запросы
    // ---------------------------------------------------------------------

    pub fn tournament(&self, tournament_id: TournamentId) -> Option<&Tournament> {
        self.tournaments.get(&tournament_id)
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.get(&player_id)
    }

    pub fn tournaments(&self) -> impl Iterator<Item = &Tournament> {
        self.tournaments.values()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Среднее время партии игрока по всем его турнирам.
    pub fn average_play_time(&self, player_id: PlayerId) -> Result<f64, ChessError> {
        self.players
            .get(&player_id)
            .map(Player::average_time)
            .ok_or(ChessError::PlayerNotFound(player_id))
    }

    pub fn player_level(&self, player_id: PlayerId) -> Result<f64, ChessError> {
        self.players
            .get(&player_id)
            .map(|p| p.level(&self.scoring))
            .ok_or(ChessError::PlayerNotFound(player_id))
    }

    /// Турнирная таблица, первый – текущий лидер.
    pub fn standings(&self, tournament_id: TournamentId) -> Result<Vec<Standing>, ChessError> {
        if !self.tournaments.contains(&tournament_id) {
            return Err(ChessError::TournamentNotFound(tournament_id));
        }

        let mut standings = self.collect_standings(tournament_id);
        sort_standings(&mut standings);
        Ok(standings)
    }

    /// Статистика всех завершённых турниров, по возрастанию id.
    pub fn tournament_statistics(&self) -> Vec<TournamentStatistics> {
        self.tournaments
            .values()
            .filter_map(Tournament::statistics)
            .collect()
    }

    /// Уровни игроков, у которых есть хотя бы одна партия.
    ///
    /// По возрастанию уровня, при равенстве – по возрастанию id.
    pub fn players_levels(&self) -> Vec<PlayerLevel> {
        let mut levels: Vec<PlayerLevel> = self
            .players
            .values()
            .filter(|p| p.total_games() > 0)
            .map(|p| PlayerLevel {
                player_id: p.id(),
                level: p.level(&self.scoring),
            })
            .collect();

        levels.sort_by(|a, b| {
            a.level
                .total_cmp(&b.level)
                .then_with(|| a.player_id.cmp(&b.player_id))
        });
        levels
    }

    // ---------------------------------------------------------------------
    // Внутреннее
    // ---------------------------------------------------------------------

    fn player_mut(&mut self, player_id: PlayerId) -> Result<&mut Player, ChessError> {
        self.players
            .get_mut(&player_id)
            .ok_or(ChessError::PlayerNotFound(player_id))
    }

    fn collect_standings(&self, tournament_id: TournamentId) -> Vec<Standing> {
        self.players
            .values()
            .filter_map(|p| p.record(tournament_id))
            .map(|record| Standing::from_record(record, &self.scoring))
            .collect()
    }
}

/// Что получает соперник удаляемого игрока за эту партию.
///
/// `None` – соперник уже выиграл или тоже удалён.
fn promotion_for_opponent(game: &Game, removed: PlayerId) -> Option<(PlayerId, Promotion)> {
    let opponent = game.opponent_of(removed)?;

    match game.winner() {
        GameWinner::Player(id) if id == opponent => None,
        GameWinner::Draw => Some((opponent, Promotion::DrawToWin)),
        _ => Some((opponent, Promotion::LossToWin)),
    }
}
