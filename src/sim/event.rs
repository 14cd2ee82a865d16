/// Events emitted during a simulation step.
/// The presentation layer consumes these for animation/sound.

use serde::Serialize;

use crate::domain::actor::ActorId;
use crate::domain::tile::Obstacle;
use super::level::TouchKind;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum GameEvent {
    CoinCollected { id: ActorId },
    PlayerTouched { cause: TouchKind },
    FireballBounced { id: ActorId, obstacle: Obstacle },
    FireRainReset { id: ActorId },
    LevelWon,
    LevelLost,
}
