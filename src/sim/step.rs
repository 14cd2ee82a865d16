/// The step function: advances a level by one frame.
///
/// A frame's time is split into equal sub-steps no longer than `max_step` so
/// fast actors cannot tunnel through a tile in one go. The split is capped at
/// `MAX_SUBSTEPS`; past that the sub-steps grow longer than `max_step`. A
/// `max_step` that is not a positive finite number disables splitting and
/// the whole frame runs as one sub-step. Frames with a negative or
/// non-finite time are ignored.
///
/// Per sub-step:
///   1. Grace countdown (only if the outcome was already decided)
///   2. Actor updates, in actor-list order
///   3. Player vs static obstacles
///   4. Player vs other actors (first hit in list order)
///   5. Outcome events
///
/// Collision resolution always runs after every actor has moved, against
/// the now-current positions.

use crate::domain::actor::{ActorKind, ActorType, ObstaclePolicy};
use super::event::GameEvent;
use super::level::{Level, TouchKind};
use super::status::Status;

/// Most sub-steps a single frame is split into.
pub const MAX_SUBSTEPS: u32 = 64;

pub fn step(level: &mut Level, time: f64, max_step: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if !time.is_finite() || time < 0.0 {
        log::warn!("ignoring frame of {time} s");
        return events;
    }

    let substeps = substep_count(time, max_step);
    let dt = time / f64::from(substeps.max(1));
    for _ in 0..substeps {
        tick(level, dt, &mut events);
    }

    events
}

/// Number of sub-steps for a frame of `time` seconds (`time` finite, >= 0).
fn substep_count(time: f64, max_step: f64) -> u32 {
    if time == 0.0 {
        return 0;
    }
    if !max_step.is_finite() || max_step <= 0.0 {
        return 1;
    }
    // float-to-int casts saturate, so huge ratios land on the cap
    ((time / max_step).ceil() as u32).clamp(1, MAX_SUBSTEPS)
}

/// One sub-step of `dt` seconds.
pub fn tick(level: &mut Level, dt: f64, events: &mut Vec<GameEvent>) {
    let before = level.status();
    if before.is_some() {
        level.advance_finish_delay(dt);
    }

    resolve_actors(level, dt, events);
    resolve_player_obstacle(level, events);
    resolve_player_actors(level, events);
    resolve_outcome(level, before, events);
}

// ══════════════════════════════════════════════════════════════
// Actors
// ══════════════════════════════════════════════════════════════

fn resolve_actors(level: &mut Level, dt: f64, events: &mut Vec<GameEvent>) {
    for (actor, obstacle) in level.act_actors(dt) {
        match actor.kind {
            ActorKind::Fireball { policy: ObstaclePolicy::Reflect, .. } => {
                log::debug!("fireball {:?} bounced off {}", actor.id(), obstacle.as_str());
                events.push(GameEvent::FireballBounced { id: actor.id(), obstacle });
            }
            ActorKind::Fireball { policy: ObstaclePolicy::ResetToSpawn, .. } => {
                events.push(GameEvent::FireRainReset { id: actor.id() });
            }
            _ => {}
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Player collisions
// ══════════════════════════════════════════════════════════════

fn resolve_player_obstacle(level: &mut Level, events: &mut Vec<GameEvent>) {
    let Some(player) = level.player().copied() else { return };
    let Some(obstacle) = level.obstacle_at(player.pos, player.size) else { return };

    if obstacle.is_lethal() && level.status().is_none() {
        events.push(GameEvent::PlayerTouched { cause: TouchKind::from(obstacle) });
    }
    level.player_touched(obstacle, None);
}

fn resolve_player_actors(level: &mut Level, events: &mut Vec<GameEvent>) {
    let Some(player) = level.player().copied() else { return };
    let Some(other) = level.actor_at(&player).copied() else { return };

    let running = level.status().is_none();
    log::debug!("player touched {} {:?}", other.actor_type().as_str(), other.id());
    level.player_touched(other.actor_type(), Some(other.id()));
    if !running {
        return;
    }

    match other.actor_type() {
        ActorType::Coin => {
            log::debug!("coin {:?} collected", other.id());
            events.push(GameEvent::CoinCollected { id: other.id() });
        }
        ActorType::Fireball => {
            events.push(GameEvent::PlayerTouched { cause: TouchKind::Fireball });
        }
        ActorType::Actor | ActorType::Player => {}
    }
}

fn resolve_outcome(level: &Level, before: Option<Status>, events: &mut Vec<GameEvent>) {
    if before.is_some() {
        return;
    }
    match level.status() {
        Some(Status::Won) => {
            log::info!("level won");
            events.push(GameEvent::LevelWon);
        }
        Some(Status::Lost) => {
            log::info!("level lost");
            events.push(GameEvent::LevelLost);
        }
        None => {}
    }
}
