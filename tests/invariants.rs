//! Property tests over random input streams

use proptest::prelude::*;

use scroll_defender::audio::Silence;
use scroll_defender::sim::{GamePhase, GameState, PlayerHit, TickInput, tick};

fn arb_input() -> impl Strategy<Value = TickInput> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        prop::bool::weighted(0.05),
    )
        .prop_map(|(left, right, up, down, fire, restart)| TickInput {
            left,
            right,
            up,
            down,
            fire,
            restart,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn lives_stay_in_range(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..600)) {
        let mut state = GameState::new(seed);
        for input in &inputs {
            let outcome = tick(&mut state, input, &mut Silence);
            prop_assert!(state.player.lives <= 3);
            if state.player.lives == 0 {
                prop_assert_eq!(state.phase, GamePhase::GameOver);
            }
            if outcome.player_hit == PlayerHit::Fatal {
                prop_assert_eq!(state.phase, GamePhase::GameOver);
            }
        }
    }

    #[test]
    fn invincible_ship_is_never_hit(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..600)) {
        let mut state = GameState::new(seed);
        for input in &inputs {
            let shielded = state.player.invincible > 1;
            let outcome = tick(&mut state, input, &mut Silence);
            if shielded {
                prop_assert_eq!(outcome.player_hit, PlayerHit::None);
            }
        }
    }

    #[test]
    fn ship_stays_on_field(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..400)) {
        let mut state = GameState::new(seed);
        for input in &inputs {
            tick(&mut state, input, &mut Silence);
            prop_assert!((8..=248).contains(&state.player.x));
            prop_assert!((8..=140).contains(&state.player.y));
            prop_assert!(state.enemies.iter().all(|e| e.x > -8));
            prop_assert!(state.bullets.iter().all(|b| b.x < 264));
        }
    }

    #[test]
    fn score_counts_kills(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..600)) {
        let mut state = GameState::new(seed);
        let mut kills = 0u64;
        for input in &inputs {
            let outcome = tick(&mut state, input, &mut Silence);
            if outcome.restarted {
                kills = 0;
            }
            kills += u64::from(outcome.kills);
            prop_assert_eq!(state.score, kills * 100);
        }
    }
}
