use crate::domain::player::Player;
use crate::domain::tournament::Tournament;
use crate::domain::{PlayerId, TournamentId};
use crate::engine::errors::ChessError;
use crate::infra::store::AssociativeStore;

/// Что нужно сделать, чтобы записать партию (результат фазы проверки).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddGamePlan {
    pub tournament_id: TournamentId,
    pub first: PlayerId,
    pub second: PlayerId,
    pub duration: i64,
    /// max_games_per_player турнира – ёмкость новых записей.
    pub capacity: u32,
    /// Игрока ещё нет в системе.
    pub create_first: bool,
    pub create_second: bool,
    /// Игрок ещё не играл в этом турнире.
    pub first_is_new: bool,
    pub second_is_new: bool,
}

impl AddGamePlan {
    /// Сколько игроков партия впервые приводит в турнир.
    pub fn new_players(&self) -> u32 {
        u32::from(self.first_is_new) + u32::from(self.second_is_new)
    }
}

/// Проверить, можно ли добавить партию, ничего не меняя.
///
/// Порядок проверок:
///   id → турнир существует → не завершён → партии между ними ещё не было →
///   время партии → лимит партий у обоих игроков.
pub fn prepare_add_game(
    tournaments: &AssociativeStore<TournamentId, Tournament>,
    players: &AssociativeStore<PlayerId, Player>,
    tournament_id: TournamentId,
    first: PlayerId,
    second: PlayerId,
    duration: i64,
) -> Result<AddGamePlan, ChessError> {
    if first == second {
        return Err(ChessError::InvalidId);
    }

    let tournament = tournaments
        .get(&tournament_id)
        .ok_or(ChessError::TournamentNotFound(tournament_id))?;

    if tournament.is_ended() {
        return Err(ChessError::TournamentEnded(tournament_id));
    }

    let first_player = players.get(&first);
    let second_player = players.get(&second);

    if let Some(player) = first_player {
        if has_played_against(tournament, player, second) {
            return Err(ChessError::GameAlreadyExists { first, second });
        }
    }

    if duration < 0 || u32::try_from(duration).is_err() {
        return Err(ChessError::InvalidPlayTime(duration));
    }

    for (player_id, player) in [(first, first_player), (second, second_player)] {
        if let Some(player) = player {
            if player.plays_in(tournament_id) && !player.can_play_more_in(tournament_id) {
                return Err(ChessError::ExceededGames {
                    player_id,
                    tournament_id,
                });
            }
        }
    }

    Ok(AddGamePlan {
        tournament_id,
        first,
        second,
        duration,
        capacity: tournament.max_games_per_player(),
        create_first: first_player.is_none(),
        create_second: second_player.is_none(),
        first_is_new: !first_player.is_some_and(|p| p.plays_in(tournament_id)),
        second_is_new: !second_player.is_some_and(|p| p.plays_in(tournament_id)),
    })
}

/// Была ли уже партия между `player` и `opponent` в этом турнире.
///
/// Смотрим только партии `player` – партия всегда записана у обоих.
pub fn has_played_against(tournament: &Tournament, player: &Player, opponent: PlayerId) -> bool {
    let Some(record) = player.record(tournament.id()) else {
        return false;
    };

    record
        .game_ids()
        .iter()
        .filter_map(|game_id| tournament.game(*game_id))
        .any(|game| game.has_player(opponent))
}
