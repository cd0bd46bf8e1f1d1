// tests/chess_system_tests.rs
//
// Сценарии на уровне ChessSystem: партии, удаление игроков и турниров,
// выбор победителя, собственные веса очков.

use chess_tournament_engine::domain::game::{GameOutcome, GameWinner, PlayerSlot};
use chess_tournament_engine::domain::scoring::ScoringConfig;
use chess_tournament_engine::domain::tournament::TournamentConfig;
use chess_tournament_engine::domain::{GameId, PlayerId, TournamentId};
use chess_tournament_engine::engine::{ChessError, ChessSystem};

use GameOutcome::{Draw, FirstPlayer, SecondPlayer};

fn pid(raw: i64) -> PlayerId {
    PlayerId::new(raw).unwrap()
}

fn tid(raw: i64) -> TournamentId {
    TournamentId::new(raw).unwrap()
}

/// Утилита: система с одним турниром.
fn system_with_tournament(id: i64, max_games: u32, location: &str) -> ChessSystem {
    let mut sys = ChessSystem::new();
    sys.add_tournament(tid(id), TournamentConfig::new(max_games, location))
        .unwrap();
    sys
}

/// Турнир из трёх партий: 1 бьёт 2, 1 бьёт 3, 2–3 ничья.
fn paris_three_games() -> ChessSystem {
    let mut sys = system_with_tournament(1, 3, "Paris");
    sys.add_game(tid(1), pid(1), pid(2), FirstPlayer, 300).unwrap();
    sys.add_game(tid(1), pid(1), pid(3), FirstPlayer, 300).unwrap();
    sys.add_game(tid(1), pid(2), pid(3), Draw, 600).unwrap();
    sys
}

fn totals(sys: &ChessSystem, id: i64) -> (u32, u32, u32, u64) {
    let p = sys.player(pid(id)).unwrap();
    (p.wins(), p.draws(), p.losses(), p.total_time())
}

//
// TEST 1 — полный турнир: победитель и статистика
//
#[test]
fn full_tournament_statistics() {
    let mut sys = paris_three_games();

    assert_eq!(sys.end_tournament(tid(1)), Ok(pid(1)));

    let stats = sys.tournament_statistics();
    assert_eq!(stats.len(), 1);
    let s = &stats[0];
    assert_eq!(s.winner_id, pid(1));
    assert_eq!(s.longest_game, 600);
    assert_eq!(format!("{:.2}", s.average_game_time), "400.00");
    assert_eq!(s.location, "Paris");
    assert_eq!(s.games_count, 3);
    assert_eq!(s.player_count, 3);
}

//
// TEST 2 — удаление игрока до конца турнира: ничья соперника становится победой
//
#[test]
fn removing_player_promotes_opponents() {
    let mut sys = paris_three_games();

    sys.remove_player(pid(2)).unwrap();
    assert!(sys.player(pid(2)).is_none());

    // партия 1–2 и так выиграна первым
    let t = sys.tournament(tid(1)).unwrap();
    assert_eq!(t.game(GameId(0)).unwrap().winner(), GameWinner::Player(pid(1)));
    assert_eq!(t.game(GameId(0)).unwrap().second(), PlayerSlot::Deleted);
    // ничья 2–3 превратилась в победу 3
    assert_eq!(t.game(GameId(2)).unwrap().first(), PlayerSlot::Deleted);

    let p3 = sys.player(pid(3)).unwrap();
    assert_eq!((p3.wins(), p3.draws(), p3.losses()), (1, 0, 1));
    assert_eq!(totals(&sys, 1), (2, 0, 0, 600));

    // у 1 по-прежнему две победы (4 очка) против 2 очков у 3
    let standings = sys.standings(tid(1)).unwrap();
    assert_eq!(standings.len(), 2);
    assert_eq!((standings[0].player_id, standings[0].score), (pid(1), 4));
    assert_eq!((standings[1].player_id, standings[1].score), (pid(3), 2));

    assert_eq!(sys.end_tournament(tid(1)), Ok(pid(1)));
}

//
// TEST 3 — удаление лидера передаёт победу в турнире
//
#[test]
fn removing_leader_changes_winner() {
    let mut sys = paris_three_games();

    sys.remove_player(pid(1)).unwrap();

    // 2: поражение→победа + ничья = 3 очка, 3: то же = 3 очка;
    // при равенстве всего выигрывает меньший id
    assert_eq!(totals(&sys, 2), (1, 1, 0, 900));
    assert_eq!(totals(&sys, 3), (1, 1, 0, 900));
    assert_eq!(sys.end_tournament(tid(1)), Ok(pid(2)));
}

//
// TEST 4 — уровень отражает пересчёт сразу
//
#[test]
fn level_reflects_promotion_immediately() {
    let mut sys = system_with_tournament(1, 5, "London");
    sys.add_game(tid(1), pid(1), pid(2), FirstPlayer, 10).unwrap();

    assert_eq!(sys.player_level(pid(2)), Ok(-10.0));
    sys.remove_player(pid(1)).unwrap();
    assert_eq!(sys.player_level(pid(2)), Ok(6.0));
    assert_eq!(sys.player_level(pid(1)), Err(ChessError::PlayerNotFound(pid(1))));
}

//
// TEST 5 — завершённые турниры удаление игрока не трогает
//
#[test]
fn removing_player_skips_ended_tournaments() {
    let mut sys = paris_three_games();
    sys.end_tournament(tid(1)).unwrap();

    sys.remove_player(pid(1)).unwrap();

    let t = sys.tournament(tid(1)).unwrap();
    assert_eq!(t.winner(), Some(pid(1)));
    assert_eq!(t.game(GameId(0)).unwrap().first(), PlayerSlot::Active(pid(1)));
    assert_eq!(totals(&sys, 2), (0, 1, 1, 900));
}

//
// TEST 6 — повторная партия тех же соперников в любом порядке
//
#[test]
fn duplicate_pairing_rejected_in_either_order() {
    let mut sys = system_with_tournament(1, 5, "Paris");
    sys.add_game(tid(1), pid(1), pid(2), Draw, 10).unwrap();

    let dup = ChessError::GameAlreadyExists {
        first: pid(1),
        second: pid(2),
    };
    assert_eq!(sys.add_game(tid(1), pid(1), pid(2), FirstPlayer, 10), Err(dup));
    assert_eq!(
        sys.add_game(tid(1), pid(2), pid(1), FirstPlayer, 10),
        Err(ChessError::GameAlreadyExists {
            first: pid(2),
            second: pid(1)
        })
    );

    // в другом турнире – можно
    sys.add_tournament(tid(2), TournamentConfig::new(5, "Rome"))
        .unwrap();
    assert!(sys.add_game(tid(2), pid(2), pid(1), Draw, 10).is_ok());
}

//
// TEST 7 — партия с удалённым соперником не мешает новой паре
//
#[test]
fn deleted_opponent_does_not_block_pairing() {
    let mut sys = system_with_tournament(1, 5, "Paris");
    sys.add_game(tid(1), pid(1), pid(2), Draw, 10).unwrap();
    sys.remove_player(pid(2)).unwrap();

    // игрок 2 снова появляется как новый и считается новым участником
    assert!(sys.add_game(tid(1), pid(2), pid(1), Draw, 10).is_ok());
    assert_eq!(sys.tournament(tid(1)).unwrap().player_count(), 3);
    assert_eq!(sys.player(pid(2)).unwrap().total_games(), 1);
}

//
// TEST 8 — лимит партий: ошибка без изменений
//
#[test]
fn exceeded_games_leaves_counters_unchanged() {
    let mut sys = system_with_tournament(1, 1, "Paris");
    sys.add_game(tid(1), pid(1), pid(2), FirstPlayer, 100).unwrap();

    let before = totals(&sys, 1);
    let err = sys.add_game(tid(1), pid(3), pid(1), FirstPlayer, 100);

    assert_eq!(
        err,
        Err(ChessError::ExceededGames {
            player_id: pid(1),
            tournament_id: tid(1)
        })
    );
    assert_eq!(totals(&sys, 1), before);
    assert!(sys.player(pid(3)).is_none());
    assert_eq!(sys.tournament(tid(1)).unwrap().games_count(), 1);
}

//
// TEST 9 — порядок ошибок add_game
//
#[test]
fn add_game_error_order() {
    let mut sys = system_with_tournament(1, 1, "Paris");

    assert_eq!(
        sys.add_game(tid(9), pid(1), pid(1), Draw, -5),
        Err(ChessError::InvalidId)
    );
    assert_eq!(
        sys.add_game(tid(9), pid(1), pid(2), Draw, -5),
        Err(ChessError::TournamentNotFound(tid(9)))
    );
    assert_eq!(
        sys.add_game(tid(1), pid(1), pid(2), Draw, -5),
        Err(ChessError::InvalidPlayTime(-5))
    );

    sys.add_game(tid(1), pid(1), pid(2), Draw, 5).unwrap();
    // дубль раньше времени и лимита
    assert!(matches!(
        sys.add_game(tid(1), pid(1), pid(2), Draw, -5),
        Err(ChessError::GameAlreadyExists { .. })
    ));
    // время раньше лимита
    assert_eq!(
        sys.add_game(tid(1), pid(1), pid(3), Draw, -5),
        Err(ChessError::InvalidPlayTime(-5))
    );

    sys.end_tournament(tid(1)).unwrap();
    assert_eq!(
        sys.add_game(tid(1), pid(1), pid(2), Draw, -5),
        Err(ChessError::TournamentEnded(tid(1)))
    );
}

//
// TEST 10 — удаление турнира точно откатывает итоги игроков
//
#[test]
fn removing_tournament_restores_totals() {
    let mut sys = system_with_tournament(1, 5, "Paris");
    sys.add_tournament(tid(2), TournamentConfig::new(5, "Berlin"))
        .unwrap();

    sys.add_game(tid(1), pid(1), pid(2), FirstPlayer, 100).unwrap();
    let snapshot = totals(&sys, 1);

    sys.add_game(tid(2), pid(1), pid(2), SecondPlayer, 50).unwrap();
    sys.add_game(tid(2), pid(3), pid(1), Draw, 70).unwrap();
    assert_ne!(totals(&sys, 1), snapshot);

    sys.remove_tournament(tid(2)).unwrap();

    assert_eq!(totals(&sys, 1), snapshot);
    assert_eq!(totals(&sys, 3), (0, 0, 0, 0));
    assert_eq!(sys.average_play_time(pid(3)), Ok(0.0));
    assert!(!sys.player(pid(1)).unwrap().plays_in(tid(2)));
    assert!(sys.tournament(tid(2)).is_none());
    assert_eq!(
        sys.remove_tournament(tid(2)),
        Err(ChessError::TournamentNotFound(tid(2)))
    );
}

//
// TEST 11 — завершение: ошибки
//
#[test]
fn end_tournament_errors() {
    let mut sys = system_with_tournament(1, 3, "Paris");

    assert_eq!(
        sys.end_tournament(tid(2)),
        Err(ChessError::TournamentNotFound(tid(2)))
    );
    assert_eq!(sys.end_tournament(tid(1)), Err(ChessError::NoGames(tid(1))));

    sys.add_game(tid(1), pid(1), pid(2), Draw, 1).unwrap();
    sys.end_tournament(tid(1)).unwrap();
    assert_eq!(
        sys.end_tournament(tid(1)),
        Err(ChessError::TournamentEnded(tid(1)))
    );
}

//
// TEST 12 — все участники удалены: победителя нет
//
#[test]
fn end_tournament_without_participants() {
    let mut sys = system_with_tournament(1, 3, "Paris");
    sys.add_game(tid(1), pid(1), pid(2), Draw, 1).unwrap();
    sys.remove_player(pid(1)).unwrap();
    sys.remove_player(pid(2)).unwrap();

    assert_eq!(sys.end_tournament(tid(1)), Err(ChessError::NoGames(tid(1))));
    assert!(!sys.tournament(tid(1)).unwrap().is_ended());
}

//
// TEST 13 — тай-брейк: поражения, потом победы, потом id
//
#[test]
fn tie_break_rules() {
    // 4 очка у 1 (2 победы, 1 поражение) и у 2 (1 победа, 2 ничьи, 0 поражений)
    let mut sys = system_with_tournament(1, 4, "Madrid");
    sys.add_game(tid(1), pid(1), pid(3), FirstPlayer, 1).unwrap();
    sys.add_game(tid(1), pid(1), pid(4), FirstPlayer, 1).unwrap();
    sys.add_game(tid(1), pid(1), pid(5), SecondPlayer, 1).unwrap();
    sys.add_game(tid(1), pid(2), pid(3), FirstPlayer, 1).unwrap();
    sys.add_game(tid(1), pid(2), pid(4), Draw, 1).unwrap();
    sys.add_game(tid(1), pid(2), pid(6), Draw, 1).unwrap();

    let standings = sys.standings(tid(1)).unwrap();
    assert_eq!(standings[0].player_id, pid(2));
    assert_eq!(standings[1].player_id, pid(1));
    assert_eq!(sys.end_tournament(tid(1)), Ok(pid(2)));

    // равные очки и поражения: больше побед
    let mut sys = system_with_tournament(1, 4, "Madrid");
    sys.add_game(tid(1), pid(7), pid(3), FirstPlayer, 1).unwrap(); // 7: W
    sys.add_game(tid(1), pid(8), pid(4), Draw, 1).unwrap(); // 8: D
    sys.add_game(tid(1), pid(8), pid(5), Draw, 1).unwrap(); // 8: D D
    assert_eq!(sys.end_tournament(tid(1)), Ok(pid(7)));

    // полностью равны: меньший id
    let mut sys = system_with_tournament(1, 4, "Madrid");
    sys.add_game(tid(1), pid(9), pid(4), Draw, 1).unwrap();
    assert_eq!(sys.end_tournament(tid(1)), Ok(pid(4)));
}

//
// TEST 14 — посторонний игрок в выборе победителя не участвует
//
#[test]
fn unrelated_player_excluded_from_winner() {
    let mut sys = system_with_tournament(1, 3, "Paris");
    sys.add_tournament(tid(2), TournamentConfig::new(3, "Oslo"))
        .unwrap();
    sys.add_game(tid(2), pid(1), pid(2), FirstPlayer, 1).unwrap();
    sys.add_game(tid(1), pid(5), pid(6), SecondPlayer, 1).unwrap();

    assert_eq!(sys.end_tournament(tid(1)), Ok(pid(6)));
}

//
// TEST 15 — создание турниров
//
#[test]
fn add_tournament_errors() {
    let mut sys = system_with_tournament(1, 3, "Paris");

    // уже есть – раньше проверки места
    assert_eq!(
        sys.add_tournament(tid(1), TournamentConfig::new(0, "bad")),
        Err(ChessError::TournamentAlreadyExists(tid(1)))
    );
    assert_eq!(
        sys.add_tournament(tid(2), TournamentConfig::new(0, "bad")),
        Err(ChessError::InvalidLocation("bad".into()))
    );
    assert_eq!(
        sys.add_tournament(tid(2), TournamentConfig::new(0, "Good")),
        Err(ChessError::InvalidMaxGames)
    );
    assert!(sys.tournament(tid(2)).is_none());
}

//
// TEST 16 — уровни игроков: только с партиями, по возрастанию уровня
//
#[test]
fn players_levels_sorted() {
    let mut sys = system_with_tournament(1, 5, "Paris");
    sys.add_game(tid(1), pid(3), pid(1), FirstPlayer, 1).unwrap(); // 3: 6, 1: -10
    sys.add_game(tid(1), pid(2), pid(4), Draw, 1).unwrap(); // 2: 2, 4: 2
    sys.add_tournament(tid(2), TournamentConfig::new(5, "Rome"))
        .unwrap();
    sys.add_game(tid(2), pid(5), pid(6), Draw, 1).unwrap();
    sys.remove_tournament(tid(2)).unwrap(); // 5 и 6 без партий

    let levels: Vec<(PlayerId, f64)> = sys
        .players_levels()
        .iter()
        .map(|l| (l.player_id, l.level))
        .collect();

    assert_eq!(
        levels,
        vec![(pid(1), -10.0), (pid(2), 2.0), (pid(4), 2.0), (pid(3), 6.0)]
    );
}

//
// TEST 17 — свои веса очков меняют победителя
//
#[test]
fn custom_scoring_changes_winner() {
    let scoring = ScoringConfig {
        tournament_win_points: 3,
        tournament_draw_points: 2,
        ..ScoringConfig::default()
    };
    let mut sys = ChessSystem::with_config(scoring).unwrap();
    sys.add_tournament(tid(1), TournamentConfig::new(3, "Paris"))
        .unwrap();

    // 1: W L (3), 2: D D (4)
    sys.add_game(tid(1), pid(1), pid(3), FirstPlayer, 1).unwrap();
    sys.add_game(tid(1), pid(1), pid(4), SecondPlayer, 1).unwrap();
    sys.add_game(tid(1), pid(2), pid(5), Draw, 1).unwrap();
    sys.add_game(tid(1), pid(2), pid(6), Draw, 1).unwrap();

    assert_eq!(sys.end_tournament(tid(1)), Ok(pid(2)));

    let bad = ScoringConfig {
        tournament_win_points: 0,
        ..ScoringConfig::default()
    };
    assert!(ChessSystem::with_config(bad).is_err());
}

//
// TEST 18 — копия системы независима
//
#[test]
fn system_clone_is_independent() {
    let sys = paris_three_games();
    let mut copy = sys.clone();

    copy.remove_player(pid(1)).unwrap();
    copy.end_tournament(tid(1)).unwrap();

    assert!(sys.player(pid(1)).is_some());
    assert!(!sys.tournament(tid(1)).unwrap().is_ended());
    assert_eq!(totals(&sys, 2), (0, 1, 1, 900));
}
