//! Property tests for the simulation invariants that must hold for any
//! starting configuration, not just the hand-picked scenarios.

use invaders::entities::*;
use invaders::sim::*;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn arb_kind() -> impl Strategy<Value = InvaderKind> {
    prop_oneof![
        Just(InvaderKind::Normal),
        Just(InvaderKind::Shooting),
        Just(InvaderKind::Fast),
        Just(InvaderKind::Slow),
    ]
}

fn state_with(entities: Vec<Entity>) -> GameState {
    GameState {
        player: Player::new(FIELD_WIDTH / 2, FIELD_HEIGHT - 1, 3),
        entities,
        status: GameStatus::Playing,
        difficulty: Difficulty::Normal,
    }
}

proptest! {
    /// From any interior spawn cell, the reversal policy keeps an invader
    /// inside `[0, FIELD_WIDTH - 1]` forever: on reaching either edge its
    /// direction inverts and it walks back in.
    #[test]
    fn invader_never_escapes_the_field(
        kind in arb_kind(),
        x in 1..FIELD_WIDTH - 1,
        dir in prop_oneof![Just(1i32), Just(-1i32)],
    ) {
        let mut inv = Invader::new(kind, x, 1);
        inv.direction = dir;
        let mut state = state_with(vec![Entity::Invader(inv)]);

        for _ in 0..200 {
            state = advance_entities(&state);
            let Entity::Invader(inv) = &state.entities[0] else { unreachable!() };
            prop_assert!(inv.x >= 0 && inv.x <= FIELD_WIDTH - 1);
            prop_assert!(inv.direction == 1 || inv.direction == -1);
        }
    }

    /// A Fast invader descends monotonically, and within any window of
    /// three successful steps it takes exactly one extra drop.
    #[test]
    fn fast_invader_drop_cadence(steps in 1usize..60) {
        let mut state = state_with(vec![Entity::Invader(Invader::new(
            InvaderKind::Fast,
            FIELD_WIDTH / 2,
            1,
        ))]);

        let mut reversals = 0;
        let mut prev_dir = 1;
        for _ in 0..steps {
            state = advance_entities(&state);
            let Entity::Invader(inv) = &state.entities[0] else { unreachable!() };
            if inv.direction != prev_dir {
                reversals += 1;
                prev_dir = inv.direction;
            }
        }

        let Entity::Invader(inv) = &state.entities[0] else { unreachable!() };
        // Rows gained = one per three steps (the extra drops) plus one per
        // edge reversal.
        let expected_y = 1 + (steps / 3) as i32 + reversals;
        prop_assert_eq!(inv.y, expected_y);
    }

    /// Lives are monotonically non-increasing over a run and never wrap
    /// below zero, whatever happens on the field.
    #[test]
    fn lives_never_increase(seed in any::<u64>(), lives in 0u32..6) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = init_state(Difficulty::Normal, &mut rng);
        state.player.lives = lives;
        state.player.max_lives = lives.max(1);

        let mut prev = state.player.lives;
        for _ in 0..60 {
            state = tick(&state, &mut rng);
            prop_assert!(state.player.lives <= prev);
            prev = state.player.lives;
        }
    }

    /// Cleaning up twice is the same as cleaning up once, and whatever
    /// survives is inside the vertical bounds.
    #[test]
    fn cleanup_is_idempotent_for_any_bullets(
        ys in prop::collection::vec(-5..FIELD_HEIGHT + 5, 0..30),
    ) {
        let entities = ys
            .iter()
            .map(|&y| Entity::Bullet(Bullet { x: 5, y, owner: BulletOwner::Enemy }))
            .collect();
        let state = state_with(entities);

        let once = cleanup_bullets(&state);
        let twice = cleanup_bullets(&once);

        prop_assert_eq!(once.entities.len(), twice.entities.len());
        for e in &once.entities {
            prop_assert!(e.y() >= 0 && e.y() < FIELD_HEIGHT);
        }
    }

    /// The collision resolver never invents score out of nothing: points
    /// move only in `KILL_POINTS` increments per destroyed invader.
    #[test]
    fn score_tracks_kills(hits in 0usize..6, misses in 0usize..6) {
        let mut entities = Vec::new();
        for i in 0..hits {
            let x = (i * 3) as i32;
            entities.push(Entity::Bullet(Bullet { x, y: 3, owner: BulletOwner::Player }));
            entities.push(Entity::Invader(Invader::new(InvaderKind::Normal, x, 3)));
        }
        for i in 0..misses {
            entities.push(Entity::Invader(Invader::new(InvaderKind::Normal, (i * 3) as i32, 8)));
        }
        let state = state_with(entities);

        let resolved = resolve_collisions(&state);
        prop_assert_eq!(resolved.player.score, hits as u32 * KILL_POINTS);
        prop_assert_eq!(
            resolved.entities.iter().filter(|e| e.is_invader()).count(),
            misses
        );
    }
}
