/// Level outcome state machine.
///
/// ```text
///   Running ──touch lava/fireball──▶ Lost { delay }
///      │
///      └──────last coin taken──────▶ Won  { delay }
/// ```
///
/// Terminal states are sticky: once Won/Lost, no touch event changes the
/// outcome. The delay is a grace period (for a final animation) that the
/// driver counts down; the level reports finished once it drops below 0.

use serde::Serialize;

pub const FINISH_DELAY: f64 = 1.0;

/// Final outcome reported to the driver's caller.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Won,
    Lost,
}

#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize)]
pub enum LevelState {
    #[default]
    Running,
    Won { delay: f64 },
    Lost { delay: f64 },
}

impl LevelState {
    pub fn status(self) -> Option<Status> {
        match self {
            LevelState::Running => None,
            LevelState::Won { .. } => Some(Status::Won),
            LevelState::Lost { .. } => Some(Status::Lost),
        }
    }

    pub fn is_terminal(self) -> bool {
        self.status().is_some()
    }

    /// Remaining grace period. Stays at its initial value while running.
    pub fn finish_delay(self) -> f64 {
        match self {
            LevelState::Running => FINISH_DELAY,
            LevelState::Won { delay } | LevelState::Lost { delay } => delay,
        }
    }

    pub fn is_finished(self) -> bool {
        self.is_terminal() && self.finish_delay() < 0.0
    }

    /// Enter a terminal state. Returns false (and changes nothing) if the
    /// outcome was already decided.
    pub fn finish(&mut self, outcome: Status) -> bool {
        if self.is_terminal() {
            return false;
        }
        *self = match outcome {
            Status::Won => LevelState::Won { delay: FINISH_DELAY },
            Status::Lost => LevelState::Lost { delay: FINISH_DELAY },
        };
        true
    }

    /// Count the grace period down. No effect while running.
    pub fn advance_delay(&mut self, dt: f64) {
        match self {
            LevelState::Running => {}
            LevelState::Won { delay } | LevelState::Lost { delay } => *delay -= dt,
        }
    }
}
