//! Проверка "сырых" идентификаторов, пришедших снаружи (i64 из команд).
//!
//! Внутри системы id всегда типизированы и положительны,
//! поэтому всё, что <= 0 или не влезает в u32, отсекается здесь.

use crate::domain::{InvalidIdError, PlayerId, TournamentId};

#[inline]
pub fn player_id(raw: i64) -> Result<PlayerId, InvalidIdError> {
    PlayerId::try_from(raw)
}

#[inline]
pub fn tournament_id(raw: i64) -> Result<TournamentId, InvalidIdError> {
    TournamentId::try_from(raw)
}

/// Игроки партии: оба id корректны и различны.
pub fn game_players(first: i64, second: i64) -> Result<(PlayerId, PlayerId), InvalidIdError> {
    let first_id = player_id(first)?;
    let second_id = player_id(second)?;

    if first_id == second_id {
        return Err(InvalidIdError(second));
    }

    Ok((first_id, second_id))
}
