/// All game entity types — pure data, no logic.

/// Playfield dimensions in cells.  Shared by the simulation's boundary
/// checks, bullet cleanup and the renderer — they must agree.
pub const FIELD_WIDTH: i32 = 40;
pub const FIELD_HEIGHT: i32 = 20;

/// Points awarded for destroying any invader.
pub const KILL_POINTS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Lives the player starts with.
    pub fn starting_lives(self) -> u32 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Normal => 3,
            Difficulty::Hard => 2,
        }
    }

    /// Target frame duration in milliseconds for the frame-pacing loop.
    pub fn frame_time_ms(self) -> u64 {
        match self {
            Difficulty::Easy => 250,
            Difficulty::Normal => 200,
            Difficulty::Hard => 100,
        }
    }
}

/// One command per frame from the input layer.  Anything the terminal
/// produces that doesn't map to one of these is treated as `None`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputCommand {
    None,
    Left,
    Right,
    Shoot,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    Victory,
    GameOver,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
    /// Fixed at construction; decides travel direction and valid targets.
    pub owner: BulletOwner,
}

impl Bullet {
    /// Rows moved per tick: player bullets climb, enemy bullets fall.
    pub fn velocity(&self) -> i32 {
        match self.owner {
            BulletOwner::Player => -1,
            BulletOwner::Enemy => 1,
        }
    }

    pub fn symbol(&self) -> char {
        match self.owner {
            BulletOwner::Player => '|',
            BulletOwner::Enemy => '*',
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub lives: u32,
    pub max_lives: u32,
    pub score: u32,
}

impl Player {
    pub fn new(x: i32, y: i32, lives: u32) -> Self {
        Player {
            x,
            y,
            lives,
            max_lives: lives,
            score: 0,
        }
    }

    pub fn symbol(&self) -> char {
        'A'
    }
}

// ── Invaders ──────────────────────────────────────────────────────────────────

/// The four invader behaviors, closed over at compile time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InvaderKind {
    Normal,
    /// May fire an enemy bullet each frame (5% chance).
    Shooting,
    /// Drops one extra row every 3rd successful horizontal step.
    Fast,
    /// Moves at half rate; on death spawns a Fast invader in its place.
    Slow,
}

#[derive(Clone, Debug)]
pub struct Invader {
    pub x: i32,
    pub y: i32,
    pub kind: InvaderKind,
    /// Horizontal travel direction, +1 or −1.
    pub direction: i32,
    /// Ticks accumulated toward the next horizontal step.
    pub move_counter: u32,
    /// Successful horizontal steps since the last extra drop (Fast only;
    /// stays 0 for the other kinds).
    pub drop_counter: u32,
}

impl Invader {
    pub fn new(kind: InvaderKind, x: i32, y: i32) -> Self {
        Invader {
            x,
            y,
            kind,
            direction: 1,
            move_counter: 0,
            drop_counter: 0,
        }
    }

    /// Frames required per horizontal step — smaller is faster.
    pub fn speed(&self) -> u32 {
        match self.kind {
            InvaderKind::Slow => 2,
            _ => 1,
        }
    }

    pub fn symbol(&self) -> char {
        match self.kind {
            InvaderKind::Normal => 'V',
            InvaderKind::Shooting => 'O',
            InvaderKind::Fast => 'W',
            InvaderKind::Slow => 'M',
        }
    }
}

// ── Shared collection ─────────────────────────────────────────────────────────

/// Anything that lives in the shared entity collection.  The player is
/// deliberately not a variant: it is owned by `GameState` directly, so the
/// collision passes never need to discriminate it away.
#[derive(Clone, Debug)]
pub enum Entity {
    Bullet(Bullet),
    Invader(Invader),
}

impl Entity {
    pub fn x(&self) -> i32 {
        match self {
            Entity::Bullet(b) => b.x,
            Entity::Invader(i) => i.x,
        }
    }

    pub fn y(&self) -> i32 {
        match self {
            Entity::Bullet(b) => b.y,
            Entity::Invader(i) => i.y,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Entity::Bullet(b) => b.symbol(),
            Entity::Invader(i) => i.symbol(),
        }
    }

    pub fn is_invader(&self) -> bool {
        matches!(self, Entity::Invader(_))
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Bullets and invaders, unordered except that collision pass A
    /// resolves ties by position in this list.
    pub entities: Vec<Entity>,
    pub status: GameStatus,
    pub difficulty: Difficulty,
}
