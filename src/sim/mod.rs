//! Level simulation: parsing plans, stepping a level, and driving a run of
//! levels to completion.
//!
//! Given the same plans, seed and frame times, a run is fully deterministic.

pub mod event;
pub mod game;
pub mod level;
pub mod levels;
pub mod parser;
pub mod status;
pub mod step;

pub use event::GameEvent;
pub use game::{run_game, run_level, AttemptOutcome, AttemptReport, GameReport, LevelReport};
pub use level::{Level, TouchKind};
pub use levels::{embedded_levels, LevelDef};
pub use parser::{standard_dictionary, DictEntry, Dictionary, LevelParser};
pub use status::{LevelState, Status, FINISH_DELAY};
pub use step::{step, tick, MAX_SUBSTEPS};
