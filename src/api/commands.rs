use serde::{Deserialize, Serialize};

/// Команда верхнего уровня – всё, что меняет состояние системы.
///
/// Аргументы "сырые" (i64, Option), как они приходят от клиента:
/// проверяет их `ChessApi` в том же порядке, в каком исходные коды ошибок
/// описаны для каждой операции.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    AddTournament(AddTournamentCommand),
    AddGame(AddGameCommand),
    RemoveTournament(RemoveTournamentCommand),
    RemovePlayer(RemovePlayerCommand),
    EndTournament(EndTournamentCommand),
}

/// Создать турнир.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddTournamentCommand {
    pub tournament_id: i64,
    pub max_games_per_player: i64,
    /// `None` – аргумент не передан (NullArgument).
    pub location: Option<String>,
}

/// Записать сыгранную партию.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddGameCommand {
    pub tournament_id: i64,
    pub first_player: i64,
    pub second_player: i64,
    pub winner: WinnerApi,
    /// Секунды. Отрицательное значение – InvalidPlayTime.
    pub play_time: i64,
}

/// Исход партии на уровне API.
///
/// В домене маппится в `domain::game::GameOutcome`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum WinnerApi {
    FirstPlayer,
    SecondPlayer,
    Draw,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoveTournamentCommand {
    pub tournament_id: i64,
}

/// Удалить игрока: его соперники в идущих турнирах получают победы.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemovePlayerCommand {
    pub player_id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EndTournamentCommand {
    pub tournament_id: i64,
}
