/// Level schema parser.
///
/// A schema is a list of text rows. Every character is read twice:
///   - as a static obstacle (fixed legend, see `Obstacle::from_symbol`)
///   - as an actor spawn point (looked up in the dictionary)
///
/// ## Standard legend:
///   'x' = Wall                   '!' = Lava
///   '@' = Player                 'o' = Coin
///   '=' = Horizontal fireball    '|' = Vertical fireball
///   'v' = Fire rain              anything else = empty
///
/// Rows may differ in length; the level width is the longest row.

use std::collections::HashMap;
use std::fmt;

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::domain::actor::Actor;
use crate::domain::tile::Obstacle;
use crate::domain::vector::Vector;
use super::level::Level;

/// Builds the actor for a spawn symbol at a tile position.
/// Returning `None` marks a symbol that does not produce an actor.
pub type SpawnFn = fn(Vector, &mut dyn RngCore) -> Option<Actor>;

#[derive(Clone, Copy)]
pub enum DictEntry {
    Spawn(SpawnFn),
    /// Known symbol with no actor behind it (e.g. a decoration marker).
    Marker,
}

impl fmt::Debug for DictEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictEntry::Spawn(_) => write!(f, "Spawn(..)"),
            DictEntry::Marker => write!(f, "Marker"),
        }
    }
}

pub type Dictionary = HashMap<char, DictEntry>;

#[derive(Clone, Debug, Default)]
pub struct LevelParser {
    dictionary: Dictionary,
    seed: Option<u64>,
}

impl LevelParser {
    pub fn new(dictionary: Dictionary) -> Self {
        LevelParser { dictionary, seed: None }
    }

    /// Seed the coin phase RNG so repeated parses give identical levels.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn actor_from_symbol(&self, symbol: Option<char>) -> Option<DictEntry> {
        symbol.and_then(|s| self.dictionary.get(&s).copied())
    }

    pub fn obstacle_from_symbol(&self, symbol: char) -> Option<Obstacle> {
        Obstacle::from_symbol(symbol)
    }

    pub fn create_grid<S: AsRef<str>>(&self, rows: &[S]) -> Vec<Vec<Option<Obstacle>>> {
        rows.iter()
            .map(|row| row.as_ref().chars().map(|ch| self.obstacle_from_symbol(ch)).collect())
            .collect()
    }

    pub fn create_actors<S: AsRef<str>>(&self, rows: &[S]) -> Vec<Actor> {
        let mut rng = self.rng();
        let mut actors = vec![];

        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.as_ref().chars().enumerate() {
                let spawn = match self.actor_from_symbol(Some(ch)) {
                    Some(DictEntry::Spawn(spawn)) => spawn,
                    Some(DictEntry::Marker) | None => continue,
                };
                if let Some(actor) = spawn(Vector::new(x as f64, y as f64), rng.as_mut()) {
                    actors.push(actor);
                }
            }
        }

        log::debug!("parsed {} actors from {} rows", actors.len(), rows.len());
        actors
    }

    pub fn parse<S: AsRef<str>>(&self, rows: &[S]) -> Level {
        Level::new(self.create_grid(rows), self.create_actors(rows))
    }

    fn rng(&self) -> Box<dyn RngCore> {
        match self.seed {
            Some(seed) => Box::new(Pcg32::seed_from_u64(seed)),
            None => Box::new(rand::rng()),
        }
    }
}

// ── Standard spawners ──

fn spawn_player(pos: Vector, _rng: &mut dyn RngCore) -> Option<Actor> {
    Some(Actor::player(pos))
}

fn spawn_coin(pos: Vector, rng: &mut dyn RngCore) -> Option<Actor> {
    Some(Actor::coin(pos, rng))
}

fn spawn_horizontal_fireball(pos: Vector, _rng: &mut dyn RngCore) -> Option<Actor> {
    Some(Actor::horizontal_fireball(pos))
}

fn spawn_vertical_fireball(pos: Vector, _rng: &mut dyn RngCore) -> Option<Actor> {
    Some(Actor::vertical_fireball(pos))
}

fn spawn_fire_rain(pos: Vector, _rng: &mut dyn RngCore) -> Option<Actor> {
    Some(Actor::fire_rain(pos))
}

/// The game's own symbol table.
pub fn standard_dictionary() -> Dictionary {
    HashMap::from([
        ('@', DictEntry::Spawn(spawn_player as SpawnFn)),
        ('v', DictEntry::Spawn(spawn_fire_rain as SpawnFn)),
        ('=', DictEntry::Spawn(spawn_horizontal_fireball as SpawnFn)),
        ('|', DictEntry::Spawn(spawn_vertical_fireball as SpawnFn)),
        ('o', DictEntry::Spawn(spawn_coin as SpawnFn)),
    ])
}
