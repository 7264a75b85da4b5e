//! Per-kind motion rules.
//!
//! Every kind maps to one step function `(entity, environment) -> entity`.
//! The functions never look at other entities; interactions between
//! entities belong to [`crate::collision`].

use glam::Vec2;
use rand::{Rng, RngCore};

use crate::entities::{BossPhase, Entity, Kind, KindTag};

/// Boss descent per tick while sliding in.
const BOSS_DESCENT: f32 = 2.0;

/// The boss stops descending once its top edge reaches this row.
const BOSS_STATION_Y: f32 = 50.0;

/// Snapshot of the world every step function may read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Environment {
    pub width: f32,
    pub height: f32,
    pub now_ms: u64,
}

/// Movement keys held during this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Steer {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

pub type StepFn = fn(&Entity, &Environment, &mut dyn RngCore) -> Entity;

/// The step function for a kind.
pub fn rule(tag: KindTag) -> StepFn {
    match tag {
        KindTag::Player => hold,
        KindTag::Laser | KindTag::BossShot | KindTag::PowerUp => travel,
        KindTag::Hostile => hostile_fall,
        KindTag::Boss => boss_patrol,
        KindTag::Asteroid => asteroid_fall,
        KindTag::Star => star_fall,
        KindTag::Hazard => burn_down,
    }
}

/// Advance one entity by one tick.
pub fn step(entity: &Entity, env: &Environment, rng: &mut dyn RngCore) -> Entity {
    rule(entity.kind.tag())(entity, env, rng)
}

/// Random spawn point just above the playfield for a box `width_of` wide.
pub fn entry_point<R: Rng + ?Sized>(field_width: f32, width_of: f32, rng: &mut R) -> Vec2 {
    let max_x = (field_width - width_of).max(0.0);
    Vec2::new(rng.gen_range(0.0..=max_x), rng.gen_range(-100.0..=-40.0))
}

/// Move the player's ship by `speed` along each held direction, keeping the
/// whole ship inside the playfield.
pub fn steer_ship(ship: &Entity, steer: Steer, speed: f32, env: &Environment) -> Entity {
    let mut delta = Vec2::ZERO;
    if steer.left {
        delta.x -= speed;
    }
    if steer.right {
        delta.x += speed;
    }
    if steer.up {
        delta.y -= speed;
    }
    if steer.down {
        delta.y += speed;
    }
    let max = Vec2::new(env.width - ship.size.x, env.height - ship.size.y).max(Vec2::ZERO);
    Entity {
        pos: (ship.pos + delta).clamp(Vec2::ZERO, max),
        ..ship.clone()
    }
}

// ── Rules ─────────────────────────────────────────────────────────────────────

fn hold(entity: &Entity, _env: &Environment, _rng: &mut dyn RngCore) -> Entity {
    entity.clone()
}

/// Straight-line movement; the entity is destroyed once fully outside.
fn travel(entity: &Entity, env: &Environment, _rng: &mut dyn RngCore) -> Entity {
    let mut next = entity.clone();
    next.pos += next.vel;
    if next.bottom() < 0.0
        || next.top() > env.height
        || next.right() < 0.0
        || next.left() > env.width
    {
        next.alive = false;
    }
    next
}

/// Falls while drifting sideways, bouncing off the side walls.  Re-enters
/// from the top with a fresh speed after leaving the bottom.
fn hostile_fall(entity: &Entity, env: &Environment, rng: &mut dyn RngCore) -> Entity {
    let mut next = entity.clone();
    next.pos += next.vel;
    if next.left() < 0.0 || next.right() > env.width {
        next.vel.x = -next.vel.x;
    }
    if next.top() > env.height {
        let stage = match next.kind {
            Kind::Hostile { stage, .. } => stage,
            _ => 1,
        };
        next.pos = entry_point(env.width, next.size.x, rng);
        next.vel.y = rng.gen_range(1..=3 + stage) as f32;
    }
    next
}

fn asteroid_fall(entity: &Entity, env: &Environment, rng: &mut dyn RngCore) -> Entity {
    let mut next = entity.clone();
    next.pos += next.vel;
    if next.top() > env.height {
        next.pos = entry_point(env.width, next.size.x, rng);
        next.vel.y = rng.gen_range(1..=3) as f32;
    }
    next
}

fn star_fall(entity: &Entity, env: &Environment, rng: &mut dyn RngCore) -> Entity {
    let mut next = entity.clone();
    next.pos += next.vel;
    if next.top() > env.height {
        next.pos = Vec2::new(rng.gen_range(0.0..=env.width), 0.0);
    }
    next
}

fn burn_down(entity: &Entity, _env: &Environment, _rng: &mut dyn RngCore) -> Entity {
    let mut next = entity.clone();
    if let Kind::Hazard { ticks_left } = &mut next.kind {
        *ticks_left = ticks_left.saturating_sub(1);
        if *ticks_left == 0 {
            next.alive = false;
        }
    }
    next
}

/// Slides in from above, then sways with a sine of the clock.
fn boss_patrol(entity: &Entity, env: &Environment, _rng: &mut dyn RngCore) -> Entity {
    let mut next = entity.clone();
    let Kind::Boss { phase, .. } = &mut next.kind else {
        return next;
    };
    match phase {
        BossPhase::Descending => {
            next.pos.y += BOSS_DESCENT;
            if next.pos.y >= BOSS_STATION_Y {
                *phase = BossPhase::Fighting;
            }
        }
        BossPhase::Fighting => {
            let sway = (env.now_ms as f64 * 0.005).sin() as f32 * 5.0;
            let max_x = (env.width - next.size.x).max(0.0);
            next.pos.x = (next.pos.x + sway).clamp(0.0, max_x);
        }
    }
    next
}
