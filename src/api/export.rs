//! Текстовая выгрузка статистики.
//!
//! Турнир – шесть строк:
//!   победитель / самая длинная партия / среднее время (2 знака) /
//!   место / число партий / число игроков.
//! Уровни – по строке на игрока: "<id> <уровень с 2 знаками>".

use std::io::{self, Write};

use super::dto::{PlayerLevelDto, TournamentStatsDto};

pub fn write_tournament_statistics<W: Write>(
    out: &mut W,
    stats: &[TournamentStatsDto],
) -> io::Result<()> {
    for s in stats {
        writeln!(out, "{}", s.winner_id)?;
        writeln!(out, "{}", s.longest_game_time)?;
        writeln!(out, "{:.2}", s.average_game_time)?;
        writeln!(out, "{}", s.location)?;
        writeln!(out, "{}", s.total_games)?;
        writeln!(out, "{}", s.total_players)?;
    }
    out.flush()
}

pub fn write_players_levels<W: Write>(out: &mut W, levels: &[PlayerLevelDto]) -> io::Result<()> {
    for l in levels {
        writeln!(out, "{} {:.2}", l.player_id, l.level)?;
    }
    out.flush()
}
