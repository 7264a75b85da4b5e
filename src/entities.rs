//! Entity kinds, the shared entity record and the session state.

use glam::Vec2;

use crate::arena::{Arena, Handle};
use crate::config::GameConfig;
use crate::objectives::Objectives;
use crate::pilot::Pilot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaserKind {
    Normal,
    Rapid,
    Heavy,
}

impl LaserKind {
    pub fn base_power(&self) -> i32 {
        match self {
            LaserKind::Normal => 10,
            LaserKind::Rapid => 5,
            LaserKind::Heavy => 20,
        }
    }

    /// Vertical travel per tick (negative = upward).
    pub fn speed(&self) -> f32 {
        match self {
            LaserKind::Normal => -10.0,
            LaserKind::Rapid => -15.0,
            LaserKind::Heavy => -8.0,
        }
    }

    pub fn size(&self) -> Vec2 {
        match self {
            LaserKind::Normal | LaserKind::Rapid => Vec2::new(4.0, 20.0),
            LaserKind::Heavy => Vec2::new(8.0, 30.0),
        }
    }

    /// Next weapon tier granted by a weapon power-up.
    pub fn upgraded(&self) -> LaserKind {
        match self {
            LaserKind::Normal => LaserKind::Rapid,
            LaserKind::Rapid | LaserKind::Heavy => LaserKind::Heavy,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Restores 50 shield, up to the ship's maximum.
    Shield,
    /// Adds 1 to the ship's base speed.
    Speed,
    /// Moves the laser up one tier.
    Weapon,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Shield, PowerUpKind::Speed, PowerUpKind::Weapon];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossPhase {
    /// Sliding in from above the playfield.
    Descending,
    /// Swaying side to side and firing.
    Fighting,
}

/// Fieldless discriminant of [`Kind`], used to build per-kind groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KindTag {
    Player,
    Laser,
    BossShot,
    Hostile,
    Boss,
    PowerUp,
    Asteroid,
    Hazard,
    Star,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    Player,
    /// Player projectile.
    Laser { kind: LaserKind, power: i32 },
    /// Boss projectile, falls toward the player.
    BossShot,
    Hostile { stage: u32, health: i32 },
    Boss { health: i32, phase: BossPhase, last_shot_ms: u64 },
    PowerUp(PowerUpKind),
    /// Floating rock the player can mine for resources.
    Asteroid { resources: u32 },
    /// Damaging zone that burns out after `ticks_left` ticks.
    Hazard { ticks_left: u32 },
    /// Background decoration.
    Star,
}

impl Kind {
    pub fn tag(&self) -> KindTag {
        match self {
            Kind::Player => KindTag::Player,
            Kind::Laser { .. } => KindTag::Laser,
            Kind::BossShot => KindTag::BossShot,
            Kind::Hostile { .. } => KindTag::Hostile,
            Kind::Boss { .. } => KindTag::Boss,
            Kind::PowerUp(_) => KindTag::PowerUp,
            Kind::Asteroid { .. } => KindTag::Asteroid,
            Kind::Hazard { .. } => KindTag::Hazard,
            Kind::Star => KindTag::Star,
        }
    }
}

// ── Entity ────────────────────────────────────────────────────────────────────

/// Anything that moves and gets drawn.  `pos` is the top-left corner of the
/// bounding box, in world units.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub pos: Vec2,
    pub size: Vec2,
    /// Displacement per tick.
    pub vel: Vec2,
    /// Cleared when the entity is consumed; the arena sweeps it at tick end.
    pub alive: bool,
    pub kind: Kind,
}

impl Entity {
    pub fn new(kind: Kind, pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            size,
            vel,
            alive: true,
            kind,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Axis-aligned overlap; boxes that merely share an edge do not touch.
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire state of one play session.  Cloneable so pure update
/// functions can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct Session {
    pub config: GameConfig,
    pub arena: Arena,
    /// Handle of the player's ship inside `arena`.
    pub player: Handle,
    pub pilot: Pilot,
    /// Fractional because of the combo multiplier.
    pub score: f64,
    /// Collected from asteroids.
    pub resources: u32,
    pub stage: u32,
    /// At most one boss is ever alive.
    pub boss: Option<Handle>,
    pub objectives: Objectives,
    pub status: GameStatus,
    pub frame: u64,
    /// Clock reading of the latest tick, in ms since the session began.
    pub now_ms: u64,
}

impl Session {
    pub fn player_entity(&self) -> Option<&Entity> {
        self.arena.get(self.player)
    }

    pub fn boss_entity(&self) -> Option<&Entity> {
        self.boss.and_then(|h| self.arena.get(h))
    }
}
