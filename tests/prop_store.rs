// tests/prop_store.rs
//
// Property-тесты упорядоченного хранилища и записи игрока в турнире.
//
// Запуск: cargo test --release prop_

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use chess_tournament_engine::domain::game::{Game, GameOutcome};
use chess_tournament_engine::domain::player_in_tournament::{
    PlayerInTournament, PlayerInTournamentError,
};
use chess_tournament_engine::domain::{GameId, PlayerId, TournamentId};
use chess_tournament_engine::infra::store::AssociativeStore;

fn outcome_strategy() -> impl Strategy<Value = GameOutcome> {
    prop_oneof![
        Just(GameOutcome::FirstPlayer),
        Just(GameOutcome::SecondPlayer),
        Just(GameOutcome::Draw),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// first/next обходят ровно len() ключей, строго по возрастанию.
    #[test]
    fn prop_cursor_enumerates_all_keys(keys in prop::collection::vec(any::<i32>(), 0..200)) {
        let mut store = AssociativeStore::new();
        for k in &keys {
            store.put(*k, k.wrapping_mul(3)).unwrap();
        }

        let mut seen = Vec::new();
        let mut cursor = store.first();
        while let Some(k) = cursor {
            seen.push(k);
            cursor = store.next();
        }

        let mut expected = keys.clone();
        expected.sort_unstable();
        expected.dedup();

        prop_assert_eq!(seen.len(), store.len());
        prop_assert_eq!(seen, expected);
    }

    /// Изменения оригинала не видны в копии.
    #[test]
    fn prop_copy_is_independent(
        keys in prop::collection::vec(0u16..500, 1..100),
        removals in prop::collection::vec(0u16..500, 0..50),
    ) {
        let mut original: AssociativeStore<u16, String> = AssociativeStore::new();
        for k in &keys {
            original.put(*k, k.to_string()).unwrap();
        }

        let copy = original.try_copy().unwrap();
        let snapshot: Vec<(u16, String)> =
            copy.iter().map(|(k, v)| (*k, v.clone())).collect();

        for k in &removals {
            let _ = original.remove(k);
        }
        for v in original.values_mut() {
            v.push('x');
        }
        original.put(1000, "new".into()).unwrap();

        let after: Vec<(u16, String)> =
            copy.iter().map(|(k, v)| (*k, v.clone())).collect();
        prop_assert_eq!(after, snapshot);
    }

    /// wins+draws+losses не превышает лимит; лишняя партия отклоняется
    /// и не меняет счётчики.
    #[test]
    fn prop_ledger_respects_capacity(
        capacity in 1u32..8,
        games in prop::collection::vec((2i64..50, outcome_strategy(), 0u32..10_000), 0..20),
    ) {
        let me = PlayerId::new(1).unwrap();
        let tournament = TournamentId::new(1).unwrap();
        let mut rec = PlayerInTournament::new(me, tournament, capacity);

        for (i, (opponent, outcome, duration)) in games.into_iter().enumerate() {
            let game = Game::new(
                tournament,
                GameId(i as u32),
                me,
                PlayerId::new(opponent).unwrap(),
                outcome,
                duration,
            );

            let before = rec.clone();
            match rec.add_game(&game) {
                Ok(_) => {
                    prop_assert_eq!(rec.total_games(), before.total_games() + 1);
                }
                Err(err) => {
                    prop_assert_eq!(err, PlayerInTournamentError::ExceededGames { capacity });
                    prop_assert_eq!(&rec, &before);
                }
            }

            prop_assert!(rec.wins() + rec.draws() + rec.losses() <= capacity);
            prop_assert_eq!(rec.game_ids().len() as u32, rec.total_games());
        }
    }
}
