use invaders::entities::*;

#[test]
fn entity_enums_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(InvaderKind::Normal, InvaderKind::Normal);
    assert_ne!(InvaderKind::Normal, InvaderKind::Fast);
    assert_eq!(Difficulty::Easy, Difficulty::Easy);
    assert_ne!(Difficulty::Easy, Difficulty::Hard);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_ne!(GameStatus::Victory, GameStatus::GameOver);
    assert_eq!(BulletOwner::Player, BulletOwner::Player);
    assert_ne!(BulletOwner::Player, BulletOwner::Enemy);

    // Clone must produce an equal value
    let kind = InvaderKind::Slow;
    assert_eq!(kind.clone(), InvaderKind::Slow);
}

#[test]
fn difficulty_tables() {
    assert_eq!(Difficulty::Easy.starting_lives(), 5);
    assert_eq!(Difficulty::Normal.starting_lives(), 3);
    assert_eq!(Difficulty::Hard.starting_lives(), 2);

    assert_eq!(Difficulty::Easy.frame_time_ms(), 250);
    assert_eq!(Difficulty::Normal.frame_time_ms(), 200);
    assert_eq!(Difficulty::Hard.frame_time_ms(), 100);
}

#[test]
fn bullet_velocity_and_symbol_follow_owner() {
    let player_bullet = Bullet { x: 5, y: 5, owner: BulletOwner::Player };
    let enemy_bullet = Bullet { x: 5, y: 5, owner: BulletOwner::Enemy };

    assert_eq!(player_bullet.velocity(), -1);
    assert_eq!(enemy_bullet.velocity(), 1);
    assert_eq!(player_bullet.symbol(), '|');
    assert_eq!(enemy_bullet.symbol(), '*');
}

#[test]
fn invader_construction_defaults() {
    let inv = Invader::new(InvaderKind::Fast, 7, 3);
    assert_eq!(inv.x, 7);
    assert_eq!(inv.y, 3);
    assert_eq!(inv.direction, 1);
    assert_eq!(inv.move_counter, 0);
    assert_eq!(inv.drop_counter, 0);
}

#[test]
fn invader_speed_and_symbol_by_kind() {
    // Slow steps every other frame; everyone else every frame
    assert_eq!(Invader::new(InvaderKind::Normal, 0, 0).speed(), 1);
    assert_eq!(Invader::new(InvaderKind::Shooting, 0, 0).speed(), 1);
    assert_eq!(Invader::new(InvaderKind::Fast, 0, 0).speed(), 1);
    assert_eq!(Invader::new(InvaderKind::Slow, 0, 0).speed(), 2);

    assert_eq!(Invader::new(InvaderKind::Normal, 0, 0).symbol(), 'V');
    assert_eq!(Invader::new(InvaderKind::Shooting, 0, 0).symbol(), 'O');
    assert_eq!(Invader::new(InvaderKind::Fast, 0, 0).symbol(), 'W');
    assert_eq!(Invader::new(InvaderKind::Slow, 0, 0).symbol(), 'M');
}

#[test]
fn player_new_sets_max_lives() {
    let p = Player::new(20, 19, 5);
    assert_eq!(p.lives, 5);
    assert_eq!(p.max_lives, 5);
    assert_eq!(p.score, 0);
    assert_eq!(p.symbol(), 'A');
}

#[test]
fn entity_accessors_dispatch_to_variant() {
    let b = Entity::Bullet(Bullet { x: 3, y: 4, owner: BulletOwner::Player });
    let i = Entity::Invader(Invader::new(InvaderKind::Normal, 8, 2));

    assert_eq!((b.x(), b.y(), b.symbol()), (3, 4, '|'));
    assert_eq!((i.x(), i.y(), i.symbol()), (8, 2, 'V'));
    assert!(!b.is_invader());
    assert!(i.is_invader());
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player::new(20, 19, 3),
        entities: Vec::new(),
        status: GameStatus::Playing,
        difficulty: Difficulty::Normal,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99;
    cloned.player.score = 999;
    cloned
        .entities
        .push(Entity::Invader(Invader::new(InvaderKind::Normal, 5, 5)));

    assert_eq!(original.player.x, 20);
    assert_eq!(original.player.score, 0);
    assert!(original.entities.is_empty());
}
