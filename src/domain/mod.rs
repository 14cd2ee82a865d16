//! Pure game-world types: vectors, tiles, actors and the collision rules
//! between them. Nothing here knows about levels as a whole except through
//! the `ObstacleMap` trait.

pub mod actor;
pub mod physics;
pub mod tile;
pub mod vector;

pub use actor::{Actor, ActorId, ActorKind, ActorType, ObstaclePolicy};
pub use physics::{overlaps, Grid, ObstacleMap};
pub use tile::Obstacle;
pub use vector::Vector;
