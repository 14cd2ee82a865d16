use std::fmt;

/// Failures of the game driver. Level content problems that the core
/// tolerates (unknown symbols, jagged rows) never show up here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    NoLevels,
    EmptyLevel { level: usize },
    MissingPlayer { level: usize },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLevels => write!(f, "no levels to play"),
            Self::EmptyLevel { level } => write!(f, "level {level} has no rows"),
            Self::MissingPlayer { level } => {
                write!(f, "level {level} has no player spawn ('@')")
            }
        }
    }
}

impl std::error::Error for GameError {}
