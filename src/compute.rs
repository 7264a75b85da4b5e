//! Session construction and the per-tick driver.
//!
//! Public entry points borrow a [`Session`] and hand back an updated copy;
//! the caller decides when to replace its own.  Randomness always arrives
//! through an injected RNG.

use log::{debug, info};
use rand::{Rng, RngCore};

use crate::arena::Arena;
use crate::collision::{self, credit_kill};
use crate::config::GameConfig;
use crate::entities::{GameStatus, Kind, KindTag, Session};
use crate::motion::{self, Environment, Steer};
use crate::objectives::Objectives;
use crate::pilot::{Loadout, Pilot, BLAST_COOLDOWN, SHIELD_COOLDOWN};
use crate::spawner;

/// Everything the player asked for during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub steer: Steer,
    pub fire: bool,
    /// Shield ability (refill to max, long cooldown).
    pub shield: bool,
    /// Blast ability (destroy every hostile, longer cooldown).
    pub blast: bool,
    /// Monotonic clock in ms since the session began.
    pub now_ms: u64,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial session: the player's ship plus the star field.
pub fn init_state<R: Rng + ?Sized>(config: &GameConfig, loadout: Loadout, rng: &mut R) -> Session {
    let mut arena = Arena::new();
    let player = arena.insert(spawner::new_player(config.width, config.height));
    for _ in 0..config.star_count {
        arena.insert(spawner::new_star(config.width, config.height, rng));
    }
    info!(
        "session started: {} ship, upgrades {:?}",
        loadout.class.name(),
        loadout.upgrades
    );
    Session {
        config: config.clone(),
        arena,
        player,
        pilot: Pilot::new(loadout, config.starting_shield),
        score: 0.0,
        resources: 0,
        stage: 1,
        boss: None,
        objectives: Objectives::standard(),
        status: GameStatus::Playing,
        frame: 0,
        now_ms: 0,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player(state: &Session, steer: Steer) -> Session {
    let mut next = state.clone();
    steer_player(&mut next, steer);
    next
}

/// Fire one laser of the pilot's current kind from the ship's nose.
pub fn player_shoot(state: &Session) -> Session {
    let mut next = state.clone();
    fire_laser(&mut next);
    next
}

/// Refill the shield to its maximum if the ability is ready.
pub fn use_shield(state: &Session) -> Session {
    let mut next = state.clone();
    raise_shield(&mut next);
    next
}

/// Destroy every hostile, with kill credit, if the ability is ready.
pub fn use_blast(state: &Session) -> Session {
    let mut next = state.clone();
    detonate(&mut next);
    next
}

fn environment(s: &Session) -> Environment {
    Environment {
        width: s.config.width,
        height: s.config.height,
        now_ms: s.now_ms,
    }
}

fn steer_player(s: &mut Session, steer: Steer) {
    let env = environment(s);
    let speed = s.pilot.move_speed();
    if let Some(ship) = s.arena.get_mut(s.player) {
        *ship = motion::steer_ship(ship, steer, speed, &env);
    }
}

fn fire_laser(s: &mut Session) {
    let Some(ship) = s.arena.get(s.player) else {
        return;
    };
    let laser = spawner::new_laser(s.pilot.laser, s.pilot.laser_power(), ship);
    s.arena.insert(laser);
}

fn raise_shield(s: &mut Session) {
    if s.pilot.shield_cooldown == 0 {
        s.pilot.shield = s.pilot.max_shield();
        s.pilot.shield_cooldown = SHIELD_COOLDOWN;
        debug!("shield ability used");
    }
}

fn detonate(s: &mut Session) {
    if s.pilot.blast_cooldown != 0 {
        return;
    }
    s.pilot.blast_cooldown = BLAST_COOLDOWN;
    let hostiles = s.arena.handles(KindTag::Hostile);
    debug!("blast destroys {} hostiles", hostiles.len());
    for h in hostiles {
        let stage = match s.arena.get_mut(h) {
            Some(e) => {
                e.alive = false;
                match e.kind {
                    Kind::Hostile { stage, .. } => stage,
                    _ => continue,
                }
            }
            None => continue,
        };
        credit_kill(s, stage);
    }
}

// ── Per-frame tick (RNG injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Order: input, spawn, motion, collisions, then bookkeeping (objectives,
/// boss arrival, defeat).
pub fn tick<R: RngCore>(state: &Session, input: &TickInput, rng: &mut R) -> Session {
    let mut s = state.clone();
    if s.status != GameStatus::Playing {
        return s;
    }
    s.frame += 1;
    s.now_ms = input.now_ms;

    // ── 1. Player actions ───────────────────────────────────────────────────
    if input.shield {
        raise_shield(&mut s);
    }
    if input.blast {
        detonate(&mut s);
    }
    if input.fire {
        fire_laser(&mut s);
    }

    // ── 2. Spawn ────────────────────────────────────────────────────────────
    spawner::roll_spawns(&mut s.arena, &s.config, s.stage, rng);

    // ── 3. Motion ───────────────────────────────────────────────────────────
    steer_player(&mut s, input.steer);
    s.pilot.cool_down();
    advance_entities(&mut s, rng);

    // ── 4. Collisions ───────────────────────────────────────────────────────
    collision::resolve(&mut s);
    s.arena.sweep();

    // ── 5. Objectives, boss, defeat ─────────────────────────────────────────
    s.objectives.set_survived((s.now_ms / 1000) as u32);
    if let Some(reward) = s.objectives.settle(rng) {
        s.score += f64::from(reward);
    }

    if s.boss.is_none() && s.score >= f64::from(s.stage) * s.config.boss_score_per_stage {
        let boss = spawner::new_boss(s.stage, s.config.width);
        s.boss = Some(s.arena.insert(boss));
        info!("boss incoming at stage {}", s.stage);
    }

    if s.pilot.is_defeated() {
        s.status = GameStatus::GameOver;
        info!(
            "game over: score {:.0}, stage {}, resources {}",
            s.score, s.stage, s.resources
        );
    }

    s
}

/// Step every non-player entity by its motion rule, then let the boss fire.
fn advance_entities<R: RngCore>(s: &mut Session, rng: &mut R) {
    let env = environment(s);
    let handles: Vec<_> = s.arena.iter().map(|(h, _)| h).collect();
    for h in handles {
        if h == s.player {
            continue;
        }
        if let Some(entity) = s.arena.get_mut(h) {
            *entity = motion::step(entity, &env, rng);
        }
    }

    if let Some(boss) = s.boss.and_then(|bh| s.arena.get_mut(bh)) {
        let shots = spawner::boss_volley(boss, env.now_ms);
        for shot in shots {
            s.arena.insert(shot);
        }
    }
}
