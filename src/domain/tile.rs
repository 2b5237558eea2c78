/// Tile types and their properties.
/// The character table lives here so every consumer (parser, difficulty
/// ramp, renderer) agrees on what a grid cell means.

/// Edge length of one grid cell in world pixels.
pub const TILE: i32 = 16;

pub const LAVA_CHAR: char = '~';

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Empty,
    Ground,           // Solid
    Platform,         // Solid
    HubDoor,          // Door back to the hub
    LevelDoor(u8),    // Door into level n (hub only)
    ExitDoor,         // Door to the win screen if enough was collected
    Spawn,            // Body spawn marker
    StalactiteAnchor, // Ceiling spike, falls when walked under
    StalagmiteBase,   // Ground spike, static
    Lava,             // Stuns, then resets the scene
    Collectible,      // Pickup tile
}

impl Tile {
    pub fn from_char(ch: char) -> Tile {
        match ch {
            '#' => Tile::Ground,
            '=' => Tile::Platform,
            'D' => Tile::HubDoor,
            '1'..='9' => Tile::LevelDoor(ch as u8 - b'0'),
            'E' => Tile::ExitDoor,
            'P' => Tile::Spawn,
            '^' => Tile::StalactiteAnchor,
            'v' => Tile::StalagmiteBase,
            LAVA_CHAR => Tile::Lava,
            '*' => Tile::Collectible,
            _ => Tile::Empty,
        }
    }

    pub fn is_solid(self) -> bool {
        matches!(self, Tile::Ground | Tile::Platform)
    }

    pub fn is_door(self) -> bool {
        matches!(self, Tile::HubDoor | Tile::LevelDoor(_) | Tile::ExitDoor)
    }

    pub fn is_empty(self) -> bool {
        self == Tile::Empty
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_table() {
        assert_eq!(Tile::from_char('#'), Tile::Ground);
        assert_eq!(Tile::from_char('='), Tile::Platform);
        assert_eq!(Tile::from_char('3'), Tile::LevelDoor(3));
        assert_eq!(Tile::from_char('~'), Tile::Lava);
        assert_eq!(Tile::from_char('.'), Tile::Empty);
        assert_eq!(Tile::from_char('0'), Tile::Empty);
        assert_eq!(Tile::from_char('?'), Tile::Empty);
    }

    #[test]
    fn door_and_solid_predicates() {
        assert!(Tile::Ground.is_solid());
        assert!(!Tile::Lava.is_solid());
        assert!(Tile::ExitDoor.is_door());
        assert!(Tile::LevelDoor(1).is_door());
        assert!(!Tile::Spawn.is_door());
    }
}
