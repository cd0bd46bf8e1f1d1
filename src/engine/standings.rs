use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::player_in_tournament::PlayerInTournament;
use crate::domain::scoring::ScoringConfig;
use crate::domain::PlayerId;

/// Строка турнирной таблицы: один игрок в одном турнире.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Standing {
    pub player_id: PlayerId,
    pub score: i64,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl Standing {
    pub fn from_record(record: &PlayerInTournament, scoring: &ScoringConfig) -> Self {
        Self {
            player_id: record.player_id(),
            score: record.score(scoring),
            wins: record.wins(),
            draws: record.draws(),
            losses: record.losses(),
        }
    }
}

/// Кто выше в таблице. `Less` – `a` стоит выше `b`.
///
/// 1) больше очков;
/// 2) меньше поражений;
/// 3) больше побед;
/// 4) меньше id.
pub fn compare_standings(a: &Standing, b: &Standing) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.losses.cmp(&b.losses))
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| a.player_id.cmp(&b.player_id))
}

/// Победитель турнира. `None`, если участников нет.
pub fn pick_winner<I>(standings: I) -> Option<PlayerId>
where
    I: IntoIterator<Item = Standing>,
{
    standings
        .into_iter()
        .min_by(compare_standings)
        .map(|s| s.player_id)
}

/// Отсортировать таблицу: первый элемент – победитель.
pub fn sort_standings(standings: &mut [Standing]) {
    standings.sort_by(compare_standings);
}
