/// Built-in level schemas.
///
/// ## Tile legend:
///   'x' = Wall                   '!' = Lava
///   '@' = Player spawn           'o' = Coin
///   '=' = Horizontal fireball    '|' = Vertical fireball
///   'v' = Fire rain              ' ' = Empty
///
/// The player has no movement of its own, so every built-in level places a
/// coin where the player spawns into it and keeps the fireballs on paths
/// that miss the player.

/// Runtime level data (owned strings).
#[derive(Clone, Debug, PartialEq)]
pub struct LevelDef {
    pub name: String,
    pub rows: Vec<String>,
}

impl LevelDef {
    pub fn new<S: AsRef<str>>(name: &str, rows: &[S]) -> Self {
        LevelDef {
            name: name.to_string(),
            rows: rows.iter().map(|r| r.as_ref().to_string()).collect(),
        }
    }
}

pub fn embedded_levels() -> Vec<LevelDef> {
    vec![
        LevelDef::new("Warm-up", &[
            "          ",
            "    o     ",
            "    @     ",
            "xxxxxxxxxx",
        ]),
        LevelDef::new("Fire Walk", &[
            "x        x",
            "x =      x",
            "x     o  x",
            "x     @ |x",
            "xxxxxxxxxx",
        ]),
        LevelDef::new("Lava Rain", &[
            "   v    v ",
            "          ",
            "  o       ",
            "  @       ",
            "xxx!!!xxxx",
        ]),
    ]
}
