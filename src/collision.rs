//! Collision resolution between entity groups.
//!
//! Runs once per tick after motion, always in the same order.  An entity
//! consumed by an earlier pairing is dead for every later one, so a laser
//! that kills a hostile can no longer reach the boss in the same tick.

use log::{debug, info};

use crate::arena::Handle;
use crate::entities::{Entity, Kind, KindTag, PowerUpKind, Session};
use crate::objectives::ObjectiveKind;
use crate::pilot::SHIELD_PICKUP;

/// Resolve every pairing for this tick.
pub fn resolve(s: &mut Session) {
    lasers_vs_hostiles(s);
    ship_vs_hostiles(s);
    ship_vs_power_ups(s);
    ship_vs_asteroids(s);
    ship_vs_hazards(s);
    lasers_vs_boss(s);
    ship_vs_boss(s);
    ship_vs_boss_shots(s);
}

/// Score, experience, combo and objective bookkeeping for one destroyed
/// hostile.  The score uses the combo as it stood before this kill.
pub fn credit_kill(s: &mut Session, stage: u32) {
    let base = 10.0 * f64::from(stage);
    s.score += base * s.pilot.multiplier();
    if s.pilot.gain_xp(5 * stage) {
        info!("pilot reached level {}", s.pilot.level);
    }
    s.pilot.register_kill(s.now_ms, s.config.combo_window_ms);
    s.objectives.record(ObjectiveKind::Destroy);
}

fn live_copy(s: &Session, handle: Handle) -> Option<Entity> {
    s.arena.get(handle).filter(|e| e.alive).cloned()
}

/// Live entities of `tag` overlapping `with`.
fn touching(s: &Session, tag: KindTag, with: &Entity) -> Vec<Handle> {
    s.arena
        .handles(tag)
        .into_iter()
        .filter(|&h| s.arena.get(h).is_some_and(|e| e.alive && e.overlaps(with)))
        .collect()
}

fn kill(s: &mut Session, handle: Handle) {
    if let Some(e) = s.arena.get_mut(handle) {
        e.alive = false;
    }
}

// ── Pairings, in resolution order ────────────────────────────────────────────

fn lasers_vs_hostiles(s: &mut Session) {
    for lh in s.arena.handles(KindTag::Laser) {
        let Some(laser) = live_copy(s, lh) else {
            continue;
        };
        let Kind::Laser { power, .. } = laser.kind else {
            continue;
        };
        // Every hostile under the laser takes the full shot
        let hits = touching(s, KindTag::Hostile, &laser);
        if hits.is_empty() {
            continue;
        }
        kill(s, lh);

        for target in hits {
            let destroyed_stage = match s.arena.get_mut(target) {
                Some(Entity {
                    kind: Kind::Hostile { stage, health },
                    alive,
                    ..
                }) => {
                    *health -= power;
                    if *health <= 0 {
                        *alive = false;
                        Some(*stage)
                    } else {
                        None
                    }
                }
                _ => None,
            };
            if let Some(stage) = destroyed_stage {
                credit_kill(s, stage);
            }
        }
    }
}

fn ship_vs_hostiles(s: &mut Session) {
    let Some(ship) = live_copy(s, s.player) else {
        return;
    };
    for hh in touching(s, KindTag::Hostile, &ship) {
        kill(s, hh);
        s.pilot.shield -= s.config.hostile_contact_damage;
        debug!("rammed by hostile, shield {:.1}", s.pilot.shield);
    }
}

fn ship_vs_power_ups(s: &mut Session) {
    let Some(ship) = live_copy(s, s.player) else {
        return;
    };
    for ph in touching(s, KindTag::PowerUp, &ship) {
        let Some(Kind::PowerUp(kind)) = s.arena.get(ph).map(|e| e.kind.clone()) else {
            continue;
        };
        kill(s, ph);
        match kind {
            PowerUpKind::Shield => s.pilot.restore_shield(SHIELD_PICKUP),
            PowerUpKind::Speed => s.pilot.speed += 1.0,
            PowerUpKind::Weapon => s.pilot.laser = s.pilot.laser.upgraded(),
        }
        debug!("picked up {kind:?}");
        s.objectives.record(ObjectiveKind::Collect);
    }
}

fn ship_vs_asteroids(s: &mut Session) {
    let Some(ship) = live_copy(s, s.player) else {
        return;
    };
    for ah in touching(s, KindTag::Asteroid, &ship) {
        if let Some(Kind::Asteroid { resources }) = s.arena.get(ah).map(|e| e.kind.clone()) {
            s.resources += resources;
        }
        kill(s, ah);
    }
}

/// Zones are never consumed; standing in one or several drains the same.
fn ship_vs_hazards(s: &mut Session) {
    let Some(ship) = live_copy(s, s.player) else {
        return;
    };
    if !touching(s, KindTag::Hazard, &ship).is_empty() {
        s.pilot.shield -= s.config.hazard_drain;
    }
}

fn lasers_vs_boss(s: &mut Session) {
    let Some(bh) = s.boss else {
        return;
    };
    let Some(boss) = live_copy(s, bh) else {
        s.boss = None;
        return;
    };
    for lh in touching(s, KindTag::Laser, &boss) {
        let Some(Kind::Laser { power, .. }) = s.arena.get(lh).map(|e| e.kind.clone()) else {
            continue;
        };
        kill(s, lh);

        let defeated = match s.arena.get_mut(bh) {
            Some(Entity {
                kind: Kind::Boss { health, .. },
                alive,
                ..
            }) => {
                *health -= power;
                if *health <= 0 {
                    *alive = false;
                }
                !*alive
            }
            _ => false,
        };
        if defeated {
            s.score += 1000.0 * f64::from(s.stage);
            info!("boss defeated at stage {}, score {:.0}", s.stage, s.score);
            s.stage += 1;
            s.boss = None;
            return;
        }
    }
}

fn ship_vs_boss(s: &mut Session) {
    let Some(boss) = s.boss.and_then(|bh| live_copy(s, bh)) else {
        return;
    };
    let Some(ship) = live_copy(s, s.player) else {
        return;
    };
    if ship.overlaps(&boss) {
        s.pilot.shield -= s.config.boss_contact_drain;
    }
}

fn ship_vs_boss_shots(s: &mut Session) {
    let Some(ship) = live_copy(s, s.player) else {
        return;
    };
    for sh in touching(s, KindTag::BossShot, &ship) {
        kill(s, sh);
        s.pilot.shield -= s.config.boss_shot_damage;
    }
}
