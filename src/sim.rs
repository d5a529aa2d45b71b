/// Pure simulation logic.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG, so tests can
/// drive the whole pipeline with a seeded generator.
///
/// A full frame runs the passes in a fixed order: advance → collide →
/// invader fire → cleanup → outcome.  Each pass is exposed on its own so the
/// pieces can be exercised in isolation.

use rand::Rng;

use crate::entities::{
    Bullet, BulletOwner, Difficulty, Entity, GameState, GameStatus, InputCommand, Invader,
    InvaderKind, Player, FIELD_HEIGHT, FIELD_WIDTH, KILL_POINTS,
};

/// Chance per frame that a Shooting invader fires.
const SHOOT_PROBABILITY: f64 = 0.05;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: player centred on the bottom row and the
/// opening wave laid out in four rows, one invader every fourth column,
/// each with a uniformly random kind.
pub fn init_state(difficulty: Difficulty, rng: &mut impl Rng) -> GameState {
    let player = Player::new(
        FIELD_WIDTH / 2,
        FIELD_HEIGHT - 1,
        difficulty.starting_lives(),
    );

    let mut entities = Vec::new();
    for y in 1..5 {
        for x in (2..FIELD_WIDTH - 2).step_by(4) {
            let kind = match rng.gen_range(0..4) {
                0 => InvaderKind::Normal,
                1 => InvaderKind::Shooting,
                2 => InvaderKind::Slow,
                _ => InvaderKind::Fast,
            };
            entities.push(Entity::Invader(Invader::new(kind, x, y)));
        }
    }

    GameState {
        player,
        entities,
        status: GameStatus::Playing,
        difficulty,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Apply this frame's input command.  Movement keeps the player inside
/// `[0, FIELD_WIDTH - 1]`; `Shoot` spawns a player bullet one row above;
/// `Quit` is the frame loop's concern and a no-op here, as is `None` (which
/// is also what any unrecognized key maps to).
pub fn apply_input(state: &GameState, cmd: InputCommand) -> GameState {
    let mut player = state.player.clone();
    let mut entities = state.entities.clone();

    match cmd {
        InputCommand::Left => {
            if player.x > 0 {
                player.x -= 1;
            }
        }
        InputCommand::Right => {
            if player.x < FIELD_WIDTH - 1 {
                player.x += 1;
            }
        }
        InputCommand::Shoot => {
            entities.push(Entity::Bullet(Bullet {
                x: player.x,
                y: player.y - 1,
                owner: BulletOwner::Player,
            }));
        }
        InputCommand::None | InputCommand::Quit => {}
    }

    GameState {
        player,
        entities,
        ..state.clone()
    }
}

// ── Pass 1: advance every entity one tick ────────────────────────────────────

/// Move each entity according to its own rules.  Entities do not interact
/// during this pass; only positions and counters change.  The player has no
/// autonomous motion and is untouched.
pub fn advance_entities(state: &GameState) -> GameState {
    let entities = state
        .entities
        .iter()
        .map(|e| match e {
            Entity::Bullet(b) => Entity::Bullet(Bullet {
                y: b.y + b.velocity(),
                ..b.clone()
            }),
            Entity::Invader(inv) => Entity::Invader(step_invader(inv)),
        })
        .collect();

    GameState {
        entities,
        ..state.clone()
    }
}

/// One tick of the invader movement state machine.
///
/// The move counter gates horizontal stepping: nothing happens until it
/// reaches `speed`.  On a successful step the invader moves one cell in its
/// travel direction, runs its kind-specific extra behavior, and finally
/// reverses-and-descends if it reached either edge.
///
/// The edge test is `x >= FIELD_WIDTH - 1 || x <= 0` — reversal fires on
/// reaching the edge column, not only past it.  Each invader evaluates this
/// independently, so rows reverse at different times rather than as one
/// synchronized swarm.
fn step_invader(inv: &Invader) -> Invader {
    let mut next = inv.clone();

    next.move_counter += 1;
    if next.move_counter < next.speed() {
        return next;
    }
    next.move_counter = 0;
    next.x += next.direction;

    let reverse = next.x >= FIELD_WIDTH - 1 || next.x <= 0;

    // Kind-specific extra movement, counted per successful step. A Fast
    // invader descends one extra row every third step, on its own counter.
    if next.kind == InvaderKind::Fast {
        next.drop_counter += 1;
        if next.drop_counter >= 3 {
            next.y += 1;
            next.drop_counter = 0;
        }
    }

    if reverse {
        next.direction = -next.direction;
        next.y += 1;
    }

    next
}

// ── Pass 2: collision resolution ─────────────────────────────────────────────

/// Resolve all collisions for the frame.
///
/// Two passes over a snapshot of the collection, with removals deferred to a
/// single rebuild at the end so neither pass invalidates the other:
///
/// * Pass A — each player bullet kills at most one invader sharing its exact
///   cell (first match in collection order), worth `KILL_POINTS`; each enemy
///   bullet on the player's cell costs one life.
/// * Pass B — any invader on the bottom row costs one life regardless of
///   column; any invader on the player's cell costs one life.  Either way
///   the invader is removed.
///
/// Death spawns (a Slow invader leaves a Fast one at its cell, whatever
/// killed it) are collected as requests and appended after the rebuild.
pub fn resolve_collisions(state: &GameState) -> GameState {
    let mut player = state.player.clone();
    let mut removed: Vec<usize> = Vec::new();
    let mut spawned: Vec<Entity> = Vec::new();

    // Pass A — bullets against their targets.
    for (bi, entity) in state.entities.iter().enumerate() {
        let Entity::Bullet(bullet) = entity else {
            continue;
        };
        match bullet.owner {
            BulletOwner::Player => {
                for (ti, target) in state.entities.iter().enumerate() {
                    if ti == bi || removed.contains(&ti) {
                        continue;
                    }
                    let Entity::Invader(invader) = target else {
                        continue;
                    };
                    if bullet.x == invader.x && bullet.y == invader.y {
                        player.score += KILL_POINTS;
                        removed.push(bi);
                        removed.push(ti);
                        spawned.extend(death_spawn(invader));
                        break; // at most one kill per bullet per frame
                    }
                }
            }
            BulletOwner::Enemy => {
                if bullet.x == player.x && bullet.y == player.y {
                    lose_life(&mut player);
                    removed.push(bi);
                }
            }
        }
    }

    // Pass B — invaders against the bottom boundary and the player.
    for (i, entity) in state.entities.iter().enumerate() {
        let Entity::Invader(invader) = entity else {
            continue;
        };
        if removed.contains(&i) {
            continue;
        }
        if invader.y >= FIELD_HEIGHT - 1 {
            lose_life(&mut player);
            removed.push(i);
            spawned.extend(death_spawn(invader));
            continue;
        }
        if invader.x == player.x && invader.y == player.y {
            lose_life(&mut player);
            removed.push(i);
            spawned.extend(death_spawn(invader));
        }
    }

    // Apply the deferred removals, then the death spawns.
    let mut entities: Vec<Entity> = state
        .entities
        .iter()
        .enumerate()
        .filter(|(i, _)| !removed.contains(i))
        .map(|(_, e)| e.clone())
        .collect();
    entities.extend(spawned);

    GameState {
        player,
        entities,
        ..state.clone()
    }
}

/// What a dying invader leaves behind: a Slow invader spawns one Fast
/// invader at its last cell; every other kind spawns nothing.
fn death_spawn(invader: &Invader) -> Option<Entity> {
    match invader.kind {
        InvaderKind::Slow => Some(Entity::Invader(Invader::new(
            InvaderKind::Fast,
            invader.x,
            invader.y,
        ))),
        _ => None,
    }
}

fn lose_life(player: &mut Player) {
    player.lives = player.lives.saturating_sub(1);
}

// ── Pass 3: invader fire ─────────────────────────────────────────────────────

/// Every surviving invader gets a chance to fire.  Only Shooting invaders
/// ever do, each an independent 5% Bernoulli trial per frame; a hit appends
/// an enemy bullet one row below the invader.
pub fn resolve_invader_fire(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut entities = state.entities.clone();

    for entity in &state.entities {
        let Entity::Invader(invader) = entity else {
            continue;
        };
        if invader.kind == InvaderKind::Shooting && rng.gen_bool(SHOOT_PROBABILITY) {
            entities.push(Entity::Bullet(Bullet {
                x: invader.x,
                y: invader.y + 1,
                owner: BulletOwner::Enemy,
            }));
        }
    }

    GameState {
        entities,
        ..state.clone()
    }
}

// ── Pass 4: cleanup ──────────────────────────────────────────────────────────

/// Drop bullets that have left the vertical play area.  Invaders are never
/// removed here — the bottom-boundary rule in the collision pass handles
/// them.  Running this twice in a row is a no-op the second time.
pub fn cleanup_bullets(state: &GameState) -> GameState {
    let entities = state
        .entities
        .iter()
        .filter(|e| match e {
            Entity::Bullet(b) => b.y >= 0 && b.y < FIELD_HEIGHT,
            Entity::Invader(_) => true,
        })
        .cloned()
        .collect();

    GameState {
        entities,
        ..state.clone()
    }
}

// ── Pass 5: termination ──────────────────────────────────────────────────────

/// Decide whether the run is over: defeat once the player is out of lives,
/// victory once no invader remains.
pub fn evaluate_outcome(state: &GameState) -> GameState {
    let status = if state.player.lives == 0 {
        GameStatus::GameOver
    } else if !state.entities.iter().any(Entity::is_invader) {
        GameStatus::Victory
    } else {
        GameStatus::Playing
    };

    GameState {
        status,
        ..state.clone()
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame: all five passes in their fixed
/// order.  Input is applied separately (see `apply_input`) before this runs.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let state = advance_entities(state);
    let state = resolve_collisions(&state);
    let state = resolve_invader_fire(&state, rng);
    let state = cleanup_bullets(&state);
    evaluate_outcome(&state)
}
