//! Entity constructors and the per-tick spawn roll.

use glam::Vec2;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::arena::Arena;
use crate::config::{GameConfig, SpawnRule};
use crate::entities::{BossPhase, Entity, Kind, KindTag, LaserKind, PowerUpKind};
use crate::motion::entry_point;

const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 50.0);
const BOSS_SIZE: Vec2 = Vec2::new(100.0, 100.0);
const POWER_UP_SIZE: f32 = 20.0;
const ASTEROID_SIZE: f32 = 30.0;
const HAZARD_SIZE: f32 = 100.0;
const BOSS_SHOT_SIZE: Vec2 = Vec2::new(6.0, 12.0);

/// Hazard zones burn for 5 seconds.
pub const HAZARD_TICKS: u32 = 300;

/// Minimum time between two boss volleys.
pub const BOSS_FIRE_INTERVAL_MS: u64 = 1000;

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Hostiles grow with the stage they spawn in.
pub fn hostile_size(stage: u32) -> f32 {
    match stage {
        0 | 1 => 30.0,
        2 => 40.0,
        _ => 50.0,
    }
}

pub fn hostile_health(stage: u32) -> i32 {
    10 * stage as i32
}

pub fn boss_health(stage: u32) -> i32 {
    100 * stage as i32
}

/// Hostile population cap for a stage.
pub fn hostile_cap(config: &GameConfig, stage: u32) -> usize {
    config.hostile.cap + stage as usize
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// The player's ship, centred horizontally just above the bottom edge.
pub fn new_player(width: f32, height: f32) -> Entity {
    let pos = Vec2::new(width / 2.0 - PLAYER_SIZE.x / 2.0, height - 10.0 - PLAYER_SIZE.y);
    Entity::new(Kind::Player, pos, PLAYER_SIZE, Vec2::ZERO)
}

/// A laser leaving the nose of `ship`.
pub fn new_laser(kind: LaserKind, power: i32, ship: &Entity) -> Entity {
    let size = kind.size();
    let pos = Vec2::new(ship.center().x - size.x / 2.0, ship.top() - size.y);
    Entity::new(
        Kind::Laser { kind, power },
        pos,
        size,
        Vec2::new(0.0, kind.speed()),
    )
}

pub fn new_hostile<R: Rng + ?Sized>(stage: u32, width: f32, rng: &mut R) -> Entity {
    let side = hostile_size(stage);
    let pos = entry_point(width, side, rng);
    let speed = rng.gen_range(1..=3 + stage) as f32;
    let drift = if rng.gen_bool(0.5) { -2.0 } else { 2.0 };
    Entity::new(
        Kind::Hostile {
            stage,
            health: hostile_health(stage),
        },
        pos,
        Vec2::splat(side),
        Vec2::new(drift, speed),
    )
}

pub fn new_power_up<R: Rng + ?Sized>(width: f32, rng: &mut R) -> Entity {
    let kind = *PowerUpKind::ALL
        .choose(rng)
        .unwrap_or(&PowerUpKind::Shield);
    let x = rng.gen_range(0.0..=(width - POWER_UP_SIZE).max(0.0));
    Entity::new(
        Kind::PowerUp(kind),
        Vec2::new(x, -POWER_UP_SIZE),
        Vec2::splat(POWER_UP_SIZE),
        Vec2::new(0.0, 2.0),
    )
}

pub fn new_asteroid<R: Rng + ?Sized>(width: f32, rng: &mut R) -> Entity {
    let pos = entry_point(width, ASTEROID_SIZE, rng);
    let speed = rng.gen_range(1..=3) as f32;
    Entity::new(
        Kind::Asteroid {
            resources: rng.gen_range(10..=50),
        },
        pos,
        Vec2::splat(ASTEROID_SIZE),
        Vec2::new(0.0, speed),
    )
}

pub fn new_hazard<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> Entity {
    let x = rng.gen_range(0.0..=(width - HAZARD_SIZE).max(0.0));
    let y = rng.gen_range(0.0..=(height - HAZARD_SIZE).max(0.0));
    Entity::new(
        Kind::Hazard {
            ticks_left: HAZARD_TICKS,
        },
        Vec2::new(x, y),
        Vec2::splat(HAZARD_SIZE),
        Vec2::ZERO,
    )
}

pub fn new_star<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> Entity {
    let pos = Vec2::new(rng.gen_range(0.0..=width), rng.gen_range(0.0..=height));
    let speed = rng.gen_range(1..=3) as f32;
    Entity::new(Kind::Star, pos, Vec2::splat(2.0), Vec2::new(0.0, speed))
}

/// The stage boss, waiting just above the playfield.
pub fn new_boss(stage: u32, width: f32) -> Entity {
    let pos = Vec2::new(width / 2.0 - BOSS_SIZE.x / 2.0, -BOSS_SIZE.y);
    Entity::new(
        Kind::Boss {
            health: boss_health(stage),
            phase: BossPhase::Descending,
            last_shot_ms: 0,
        },
        pos,
        BOSS_SIZE,
        Vec2::ZERO,
    )
}

/// Three-way spread fired from under the boss, once per
/// [`BOSS_FIRE_INTERVAL_MS`] while it is fighting.  Updates the boss's
/// last-shot time when it fires.
pub fn boss_volley(boss: &mut Entity, now_ms: u64) -> Vec<Entity> {
    let origin = Vec2::new(boss.center().x - BOSS_SHOT_SIZE.x / 2.0, boss.bottom());
    match &mut boss.kind {
        Kind::Boss {
            phase: BossPhase::Fighting,
            last_shot_ms,
            ..
        } if now_ms.saturating_sub(*last_shot_ms) > BOSS_FIRE_INTERVAL_MS => {
            *last_shot_ms = now_ms;
            [-2.0, 0.0, 2.0]
                .into_iter()
                .map(|dx| Entity::new(Kind::BossShot, origin, BOSS_SHOT_SIZE, Vec2::new(dx, 6.0)))
                .collect()
        }
        _ => Vec::new(),
    }
}

// ── Per-tick roll ────────────────────────────────────────────────────────────

/// Draws one sample per spawnable kind and adds an entity when the sample
/// falls under the kind's chance and the population is below its cap.
/// Returns the kinds that spawned.
pub fn roll_spawns<R: Rng + ?Sized>(
    arena: &mut Arena,
    config: &GameConfig,
    stage: u32,
    rng: &mut R,
) -> Vec<KindTag> {
    let mut spawned = Vec::new();
    let hostile = SpawnRule {
        cap: hostile_cap(config, stage),
        ..config.hostile
    };
    let table = [
        (KindTag::Hostile, hostile),
        (KindTag::PowerUp, config.power_up),
        (KindTag::Asteroid, config.asteroid),
        (KindTag::Hazard, config.hazard),
    ];
    for (tag, rule) in table {
        let roll: f64 = rng.gen();
        if roll >= rule.chance || arena.count(tag) >= rule.cap {
            continue;
        }
        let entity = match tag {
            KindTag::Hostile => new_hostile(stage, config.width, rng),
            KindTag::PowerUp => new_power_up(config.width, rng),
            KindTag::Asteroid => new_asteroid(config.width, rng),
            _ => new_hazard(config.width, config.height, rng),
        };
        debug!("spawned {tag:?}");
        arena.insert(entity);
        spawned.push(tag);
    }
    spawned
}
