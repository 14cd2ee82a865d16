/// Static-terrain physics: the single source of truth for obstacle queries.
///
/// ## Architecture
///
/// Two distinct concepts:
///   1. TERRAIN:   what the grid cells ARE (wall / lava / empty)
///   2. OCCUPANCY: which actors overlap a rectangle
///
/// This module answers terrain questions only. Occupancy lives on
/// `Actor::is_intersect` / `Level::actor_at`.
///
/// ## Obstacle query
///
/// A candidate rectangle covers the integer tile span
///   [floor(left), ceil(right)) × [floor(top), ceil(bottom))
///
/// | Condition (priority order)              | Result          |
/// |-----------------------------------------|-----------------|
/// | span left < 0, right > width, top < 0   | Wall            |
/// | span bottom > height                    | Lava            |
/// | first non-empty cell, row-major         | that cell       |
/// | otherwise                               | None            |
///
/// Falling off the bottom is lethal, not blocking.

use serde::Serialize;

use super::tile::Obstacle;
use super::vector::Vector;

/// Anything that can answer "is there an obstacle in this rectangle?".
/// Implemented by the raw `Grid` and by `Level`.
pub trait ObstacleMap {
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle>;
}

/// Integer tile span covered by a rectangle. Right/bottom are exclusive.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TileSpan {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

impl TileSpan {
    pub fn covering(pos: Vector, size: Vector) -> Self {
        TileSpan {
            left: pos.x.floor() as i64,
            right: (pos.x + size.x).ceil() as i64,
            top: pos.y.floor() as i64,
            bottom: (pos.y + size.y).ceil() as i64,
        }
    }
}

/// Static obstacle grid. Rows may be jagged; `width` is the longest row.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Grid {
    rows: Vec<Vec<Option<Obstacle>>>,
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Option<Obstacle>>>) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        Grid { rows, width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at (x, y). Outside the grid or past the end of a short row = empty.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> Option<Obstacle> {
        self.rows.get(y).and_then(|row| row.get(x)).copied().flatten()
    }
}

impl ObstacleMap for Grid {
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        let span = TileSpan::covering(pos, size);

        if span.left < 0 || span.right > self.width as i64 || span.top < 0 {
            return Some(Obstacle::Wall);
        }
        if span.bottom > self.height as i64 {
            return Some(Obstacle::Lava);
        }

        // All bounds are now inside [0, width] × [0, height].
        for y in span.top..span.bottom {
            for x in span.left..span.right {
                if let Some(tile) = self.cell(x as usize, y as usize) {
                    return Some(tile);
                }
            }
        }
        None
    }
}

/// Strict axis-aligned overlap: touching edges do not overlap.
#[inline]
pub fn overlaps(a_pos: Vector, a_size: Vector, b_pos: Vector, b_size: Vector) -> bool {
    b_pos.x < a_pos.x + a_size.x
        && b_pos.x + b_size.x > a_pos.x
        && b_pos.y < a_pos.y + a_size.y
        && b_pos.y + b_size.y > a_pos.y
}
