/// Actors: positioned, sized, optionally moving rectangles.
///
/// The variant set is closed (`ActorKind`) and every per-tick rule is
/// dispatched from a single `act()`. Fireballs share one probe-and-react
/// algorithm; only the reaction differs, selected by `ObstaclePolicy`.

use std::f64::consts::TAU;
use std::sync::atomic::{AtomicU32, Ordering};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::physics::{self, ObstacleMap};
use super::tile::Obstacle;
use super::vector::Vector;

pub const PLAYER_SIZE: Vector = Vector::new(0.8, 1.5);
/// The player sprite is taller than a tile; spawn it half a tile higher.
pub const PLAYER_SPAWN_OFFSET: Vector = Vector::new(0.0, -0.5);

pub const COIN_SIZE: Vector = Vector::new(0.6, 0.6);
/// Centers the coin inside its tile.
pub const COIN_SPAWN_OFFSET: Vector = Vector::new(0.2, 0.1);
pub const COIN_SPRING_SPEED: f64 = 8.0;
pub const COIN_SPRING_DIST: f64 = 0.07;

pub const FIREBALL_SIZE: Vector = Vector::new(1.0, 1.0);
pub const HORIZONTAL_FIREBALL_SPEED: Vector = Vector::new(2.0, 0.0);
pub const VERTICAL_FIREBALL_SPEED: Vector = Vector::new(0.0, 2.0);
pub const FIRE_RAIN_SPEED: Vector = Vector::new(0.0, 3.0);

/// Identity of an actor. Two actors are "the same" iff their ids match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        ActorId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Type tag, fixed per variant.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    Actor,
    Player,
    Coin,
    Fireball,
}

impl ActorType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActorType::Actor => "actor",
            ActorType::Player => "player",
            ActorType::Coin => "coin",
            ActorType::Fireball => "fireball",
        }
    }
}

/// What a fireball does when its next position is blocked.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ObstaclePolicy {
    /// Reverse speed, stay put this tick.
    Reflect,
    /// Teleport back to the spawn position (looping rain).
    ResetToSpawn,
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum ActorKind {
    Base,
    Player,
    Coin { spring: f64, start_pos: Vector },
    Fireball { policy: ObstaclePolicy, start_pos: Vector },
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    pub pos: Vector,
    pub size: Vector,
    pub speed: Vector,
    pub kind: ActorKind,
}

impl Actor {
    /// Plain actor with no per-tick behavior.
    pub fn new(pos: Vector, size: Vector, speed: Vector) -> Self {
        Self::with_kind(pos, size, speed, ActorKind::Base)
    }

    fn with_kind(pos: Vector, size: Vector, speed: Vector, kind: ActorKind) -> Self {
        Actor { id: ActorId::next(), pos, size, speed, kind }
    }

    pub fn player(pos: Vector) -> Self {
        Self::with_kind(pos + PLAYER_SPAWN_OFFSET, PLAYER_SIZE, Vector::ZERO, ActorKind::Player)
    }

    /// Coin with a random initial spring phase in [0, 2π).
    pub fn coin<R: Rng + ?Sized>(pos: Vector, rng: &mut R) -> Self {
        Self::coin_with_phase(pos, rng.random_range(0.0..TAU))
    }

    pub fn coin_with_phase(pos: Vector, spring: f64) -> Self {
        let start_pos = pos + COIN_SPAWN_OFFSET;
        Self::with_kind(start_pos, COIN_SIZE, Vector::ZERO, ActorKind::Coin { spring, start_pos })
    }

    pub fn fireball(pos: Vector, speed: Vector, policy: ObstaclePolicy) -> Self {
        Self::with_kind(pos, FIREBALL_SIZE, speed, ActorKind::Fireball { policy, start_pos: pos })
    }

    pub fn horizontal_fireball(pos: Vector) -> Self {
        Self::fireball(pos, HORIZONTAL_FIREBALL_SPEED, ObstaclePolicy::Reflect)
    }

    pub fn vertical_fireball(pos: Vector) -> Self {
        Self::fireball(pos, VERTICAL_FIREBALL_SPEED, ObstaclePolicy::Reflect)
    }

    pub fn fire_rain(pos: Vector) -> Self {
        Self::fireball(pos, FIRE_RAIN_SPEED, ObstaclePolicy::ResetToSpawn)
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn actor_type(&self) -> ActorType {
        match self.kind {
            ActorKind::Base => ActorType::Actor,
            ActorKind::Player => ActorType::Player,
            ActorKind::Coin { .. } => ActorType::Coin,
            ActorKind::Fireball { .. } => ActorType::Fireball,
        }
    }

    // ── Bounds ──

    pub fn left(&self) -> f64 {
        self.pos.x
    }

    pub fn top(&self) -> f64 {
        self.pos.y
    }

    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }

    /// Does `other` overlap this actor?
    /// Never true for the same actor or for an `other` with negative size.
    pub fn is_intersect(&self, other: &Actor) -> bool {
        if other.id == self.id || other.size.x < 0.0 || other.size.y < 0.0 {
            return false;
        }
        physics::overlaps(self.pos, self.size, other.pos, other.size)
    }

    /// Where the actor would be after `time`, without committing.
    /// Coins follow their spring; everything else moves by speed.
    pub fn next_position(&self, time: f64) -> Vector {
        match self.kind {
            ActorKind::Coin { spring, start_pos } => {
                start_pos + spring_vector(spring + COIN_SPRING_SPEED * time)
            }
            _ => self.pos + self.speed * time,
        }
    }

    /// Advance one tick. Returns the obstacle that blocked a fireball, if any.
    pub fn act<M: ObstacleMap + ?Sized>(&mut self, time: f64, level: &M) -> Option<Obstacle> {
        match self.kind {
            ActorKind::Base | ActorKind::Player => None,
            ActorKind::Coin { spring, start_pos } => {
                let spring = spring + COIN_SPRING_SPEED * time;
                self.kind = ActorKind::Coin { spring, start_pos };
                self.pos = start_pos + spring_vector(spring);
                None
            }
            ActorKind::Fireball { policy, start_pos } => {
                let next = self.next_position(time);
                match level.obstacle_at(next, self.size) {
                    Some(obstacle) => {
                        self.handle_obstacle(policy, start_pos);
                        Some(obstacle)
                    }
                    None => {
                        self.pos = next;
                        None
                    }
                }
            }
        }
    }

    fn handle_obstacle(&mut self, policy: ObstaclePolicy, start_pos: Vector) {
        match policy {
            ObstaclePolicy::Reflect => self.speed = self.speed * -1.0,
            ObstaclePolicy::ResetToSpawn => self.pos = start_pos,
        }
    }
}

/// Vertical bob offset for a coin at spring phase `spring`.
pub fn spring_vector(spring: f64) -> Vector {
    Vector::new(0.0, spring.sin() * COIN_SPRING_DIST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::physics::Grid;

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    fn unit(x: f64, y: f64) -> Actor {
        Actor::new(v(x, y), v(1.0, 1.0), Vector::ZERO)
    }

    fn open_grid(w: usize, h: usize) -> Grid {
        Grid::new(vec![vec![None; w]; h])
    }

    fn walled_grid(rows: &[&str]) -> Grid {
        Grid::new(
            rows.iter()
                .map(|r| r.chars().map(Obstacle::from_symbol).collect())
                .collect(),
        )
    }

    fn close(a: Vector, b: Vector) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    // ── bounds / tags ──

    #[test]
    fn bounds_follow_pos_and_size() {
        let a = Actor::new(v(1.0, 2.0), v(3.0, 4.0), Vector::ZERO);
        assert_eq!(a.left(), 1.0);
        assert_eq!(a.top(), 2.0);
        assert_eq!(a.right(), 4.0);
        assert_eq!(a.bottom(), 6.0);
    }

    #[test]
    fn type_tags() {
        let mut rng = rand::rng();
        assert_eq!(unit(0.0, 0.0).actor_type(), ActorType::Actor);
        assert_eq!(Actor::player(Vector::ZERO).actor_type(), ActorType::Player);
        assert_eq!(Actor::coin(Vector::ZERO, &mut rng).actor_type(), ActorType::Coin);
        assert_eq!(Actor::horizontal_fireball(Vector::ZERO).actor_type(), ActorType::Fireball);
        assert_eq!(Actor::vertical_fireball(Vector::ZERO).actor_type(), ActorType::Fireball);
        assert_eq!(Actor::fire_rain(Vector::ZERO).actor_type(), ActorType::Fireball);
        assert_eq!(ActorType::Actor.as_str(), "actor");
        assert_eq!(ActorType::Fireball.as_str(), "fireball");
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(unit(0.0, 0.0).id(), unit(0.0, 0.0).id());
    }

    // ── intersection ──

    #[test]
    fn never_intersects_itself() {
        let a = unit(0.0, 0.0);
        assert!(!a.is_intersect(&a));
    }

    #[test]
    fn edge_adjacent_is_not_intersect() {
        assert!(!unit(0.0, 0.0).is_intersect(&unit(1.0, 0.0)));
        assert!(!unit(0.0, 0.0).is_intersect(&unit(0.0, 1.0)));
    }

    #[test]
    fn overlapping_is_intersect() {
        assert!(unit(0.0, 0.0).is_intersect(&unit(0.5, 0.0)));
        assert!(unit(0.0, 0.0).is_intersect(&unit(0.0, 0.0)));
    }

    #[test]
    fn contained_is_intersect() {
        let big = Actor::new(v(0.0, 0.0), v(10.0, 10.0), Vector::ZERO);
        let small = Actor::new(v(4.0, 4.0), v(1.0, 1.0), Vector::ZERO);
        assert!(big.is_intersect(&small));
        assert!(small.is_intersect(&big));
    }

    #[test]
    fn negative_size_never_intersects() {
        let a = unit(0.0, 0.0);
        let b = Actor::new(v(0.5, 0.5), v(-1.0, 1.0), Vector::ZERO);
        assert!(!a.is_intersect(&b));
    }

    // ── player ──

    #[test]
    fn player_spawns_half_a_tile_up_and_stays() {
        let mut p = Actor::player(v(3.0, 5.0));
        assert_eq!(p.pos, v(3.0, 4.5));
        assert_eq!(p.size, PLAYER_SIZE);
        assert_eq!(p.act(1.0, &open_grid(10, 10)), None);
        assert_eq!(p.pos, v(3.0, 4.5));
    }

    // ── coin ──

    #[test]
    fn coin_is_centered_in_tile() {
        let c = Actor::coin_with_phase(v(2.0, 3.0), 0.0);
        assert!(close(c.pos, v(2.2, 3.1)));
        assert_eq!(c.size, COIN_SIZE);
    }

    #[test]
    fn coin_random_phase_in_range() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            match Actor::coin(Vector::ZERO, &mut rng).kind {
                ActorKind::Coin { spring, .. } => assert!((0.0..TAU).contains(&spring)),
                other => panic!("expected coin, got {other:?}"),
            }
        }
    }

    #[test]
    fn coin_bobs_around_start() {
        let mut c = Actor::coin_with_phase(v(0.0, 0.0), 0.0);
        let grid = open_grid(5, 5);
        c.act(0.1, &grid);
        // phase 0.8
        let expected = v(0.2, 0.1 + (0.8f64).sin() * COIN_SPRING_DIST);
        assert!(close(c.pos, expected));
        match c.kind {
            ActorKind::Coin { spring, start_pos } => {
                assert!((spring - 0.8).abs() < 1e-9);
                assert!(close(start_pos, v(0.2, 0.1)));
            }
            other => panic!("expected coin, got {other:?}"),
        }
    }

    #[test]
    fn coin_ignores_obstacles() {
        let mut c = Actor::coin_with_phase(v(0.0, 0.0), 1.0);
        let grid = walled_grid(&["x"]);
        assert_eq!(c.act(0.5, &grid), None);
    }

    #[test]
    fn coin_next_position_does_not_commit() {
        let c = Actor::coin_with_phase(v(0.0, 0.0), 0.0);
        let before = c.pos;
        let _ = c.next_position(1.0);
        assert_eq!(c.pos, before);
    }

    // ── fireballs ──

    #[test]
    fn fireball_moves_by_speed_times_time() {
        let mut f = Actor::horizontal_fireball(v(0.0, 0.0));
        assert_eq!(f.act(0.5, &open_grid(5, 1)), None);
        assert!(close(f.pos, v(1.0, 0.0)));
    }

    #[test]
    fn horizontal_fireball_reflects_and_stays() {
        let grid = walled_grid(&["   x"]);
        let mut f = Actor::horizontal_fireball(v(2.0, 0.0));
        assert_eq!(f.act(0.5, &grid), Some(Obstacle::Wall));
        assert_eq!(f.pos, v(2.0, 0.0));
        assert_eq!(f.speed, v(-2.0, 0.0));

        // next tick moves back from the unblocked position
        assert_eq!(f.act(0.5, &grid), None);
        assert!(close(f.pos, v(1.0, 0.0)));
    }

    #[test]
    fn vertical_fireball_reflects_off_lava() {
        let grid = walled_grid(&[" ", " ", "!"]);
        let mut f = Actor::vertical_fireball(v(0.0, 1.0));
        assert_eq!(f.act(0.5, &grid), Some(Obstacle::Lava));
        assert_eq!(f.pos, v(0.0, 1.0));
        assert_eq!(f.speed, v(0.0, -2.0));
    }

    #[test]
    fn fireball_reflects_at_grid_edge() {
        let mut f = Actor::horizontal_fireball(v(0.0, 0.0));
        f.speed = v(-2.0, 0.0);
        assert_eq!(f.act(0.1, &open_grid(3, 1)), Some(Obstacle::Wall));
        assert_eq!(f.speed, v(2.0, 0.0));
    }

    #[test]
    fn fire_rain_resets_to_spawn() {
        let grid = open_grid(1, 3);
        let mut f = Actor::fire_rain(v(0.0, 0.0));
        assert_eq!(f.act(0.5, &grid), None);
        assert!(close(f.pos, v(0.0, 1.5)));

        // falling past the bottom is blocked (lava) and loops back
        assert_eq!(f.act(0.5, &grid), Some(Obstacle::Lava));
        assert_eq!(f.pos, v(0.0, 0.0));
        assert_eq!(f.speed, FIRE_RAIN_SPEED);
    }

    #[test]
    fn base_actor_does_nothing() {
        let mut a = Actor::new(v(1.0, 1.0), v(1.0, 1.0), v(5.0, 5.0));
        assert_eq!(a.act(1.0, &open_grid(2, 2)), None);
        assert_eq!(a.pos, v(1.0, 1.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn intersection_is_symmetric(
                ax in -10f64..10.0, ay in -10f64..10.0,
                aw in 0f64..5.0, ah in 0f64..5.0,
                bx in -10f64..10.0, by in -10f64..10.0,
                bw in 0f64..5.0, bh in 0f64..5.0,
            ) {
                let a = Actor::new(v(ax, ay), v(aw, ah), Vector::ZERO);
                let b = Actor::new(v(bx, by), v(bw, bh), Vector::ZERO);
                prop_assert_eq!(a.is_intersect(&b), b.is_intersect(&a));
            }

            #[test]
            fn intersection_is_irreflexive(
                x in -10f64..10.0, y in -10f64..10.0,
                w in 0f64..5.0, h in 0f64..5.0,
            ) {
                let a = Actor::new(v(x, y), v(w, h), Vector::ZERO);
                prop_assert!(!a.is_intersect(&a));
            }
        }
    }
}
