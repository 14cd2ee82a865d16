/// Static obstacle kinds stored in the level grid.
/// An empty cell is `None` in the grid; only blocking/lethal cells get a value.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Obstacle {
    Wall, // blocks movement
    Lava, // lethal on touch
}

impl Obstacle {
    /// Map a schema character to an obstacle. Fixed legend, not configurable.
    pub fn from_symbol(symbol: char) -> Option<Obstacle> {
        match symbol {
            'x' => Some(Obstacle::Wall),
            '!' => Some(Obstacle::Lava),
            _ => None,
        }
    }

    /// Is this obstacle fatal to the player?
    pub fn is_lethal(self) -> bool {
        matches!(self, Obstacle::Lava)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Obstacle::Wall => "wall",
            Obstacle::Lava => "lava",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_lowercase() {
        assert_eq!(Obstacle::Wall.as_str(), "wall");
        assert_eq!(Obstacle::Lava.as_str(), "lava");
    }

    #[test]
    fn legend() {
        assert_eq!(Obstacle::from_symbol('x'), Some(Obstacle::Wall));
        assert_eq!(Obstacle::from_symbol('!'), Some(Obstacle::Lava));
        assert_eq!(Obstacle::from_symbol('.'), None);
        assert_eq!(Obstacle::from_symbol('@'), None);
    }

    #[test]
    fn only_lava_is_lethal() {
        assert!(Obstacle::Lava.is_lethal());
        assert!(!Obstacle::Wall.is_lethal());
    }
}
