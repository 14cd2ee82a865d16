/// Level: the static grid plus the live actor list and the outcome state.
///
/// ## Ownership
///   - `grid`  : built at parse time, never mutated.
///   - `actors`: mutated in place every tick; coins are removed when taken.
///   - `player`: id of the first `Player` actor, looked up once at
///     construction. Not owned separately; resolved against `actors`.
///
/// ## Touch events
///
/// `player_touched` is the collision-resolution callback the driver fires
/// when the player overlaps an obstacle or another actor:
///
/// | Kind              | Effect (only while Running)              |
/// |-------------------|------------------------------------------|
/// | Lava, Fireball    | Lost                                     |
/// | Coin              | remove coin; Won if it was the last one  |
/// | anything else     | ignored                                  |

use serde::Serialize;

use crate::domain::actor::{Actor, ActorId, ActorType};
use crate::domain::physics::{Grid, ObstacleMap};
use crate::domain::tile::Obstacle;
use crate::domain::vector::Vector;
use super::status::{LevelState, Status};

/// What the player touched: a grid obstacle or an actor's type.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchKind {
    Wall,
    Lava,
    Actor,
    Player,
    Coin,
    Fireball,
}

impl From<Obstacle> for TouchKind {
    fn from(obstacle: Obstacle) -> Self {
        match obstacle {
            Obstacle::Wall => TouchKind::Wall,
            Obstacle::Lava => TouchKind::Lava,
        }
    }
}

impl From<ActorType> for TouchKind {
    fn from(ty: ActorType) -> Self {
        match ty {
            ActorType::Actor => TouchKind::Actor,
            ActorType::Player => TouchKind::Player,
            ActorType::Coin => TouchKind::Coin,
            ActorType::Fireball => TouchKind::Fireball,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Level {
    grid: Grid,
    actors: Vec<Actor>,
    player: Option<ActorId>,
    state: LevelState,
}

impl Level {
    pub fn new(grid: Vec<Vec<Option<Obstacle>>>, actors: Vec<Actor>) -> Self {
        let player = actors
            .iter()
            .find(|a| a.actor_type() == ActorType::Player)
            .map(Actor::id);
        Level {
            grid: Grid::new(grid),
            actors,
            player,
            state: LevelState::Running,
        }
    }

    // ── Accessors ──

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id() == id)
    }

    pub fn player(&self) -> Option<&Actor> {
        self.player.and_then(|id| self.actor(id))
    }

    /// `None` while running, otherwise the decided outcome.
    pub fn status(&self) -> Option<Status> {
        self.state.status()
    }

    pub fn finish_delay(&self) -> f64 {
        self.state.finish_delay()
    }

    /// Outcome decided AND grace period elapsed.
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    // ── Queries ──

    /// First actor (list order) intersecting `obj`.
    pub fn actor_at(&self, obj: &Actor) -> Option<&Actor> {
        self.actors.iter().find(|a| a.is_intersect(obj))
    }

    /// Static-grid obstacle covering the rectangle. Actors are not consulted.
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        self.grid.obstacle_at(pos, size)
    }

    pub fn no_more_actors(&self, ty: ActorType) -> bool {
        !self.actors.iter().any(|a| a.actor_type() == ty)
    }

    // ── Mutation ──

    /// Remove the actor with this identity. No-op if absent.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let idx = self.actors.iter().position(|a| a.id() == id)?;
        Some(self.actors.remove(idx))
    }

    /// Collision-resolution callback. Ignored once the outcome is decided.
    pub fn player_touched(&mut self, kind: impl Into<TouchKind>, obj: Option<ActorId>) {
        if self.state.is_terminal() {
            return;
        }
        match kind.into() {
            TouchKind::Lava | TouchKind::Fireball => {
                self.state.finish(Status::Lost);
            }
            TouchKind::Coin => {
                if let Some(id) = obj {
                    self.remove_actor(id);
                }
                if self.no_more_actors(ActorType::Coin) {
                    self.state.finish(Status::Won);
                }
            }
            TouchKind::Wall | TouchKind::Actor | TouchKind::Player => {}
        }
    }

    /// Count the finish delay down by `dt`. Driver-owned contract: the core
    /// never calls this itself. No effect while running.
    pub fn advance_finish_delay(&mut self, dt: f64) {
        self.state.advance_delay(dt);
    }

    /// Run every actor's `act` in list order against the current level.
    /// Each actor sees the positions already committed this pass.
    /// Returns the actors (post-update) that were blocked, with the obstacle.
    pub fn act_actors(&mut self, time: f64) -> Vec<(Actor, Obstacle)> {
        let mut blocked = vec![];
        for i in 0..self.actors.len() {
            let mut actor = self.actors[i];
            if let Some(obstacle) = actor.act(time, &*self) {
                blocked.push((actor, obstacle));
            }
            self.actors[i] = actor;
        }
        blocked
    }
}

impl ObstacleMap for Level {
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        self.grid.obstacle_at(pos, size)
    }
}
