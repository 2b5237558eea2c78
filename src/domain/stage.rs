/// Stage identifiers and door destinations.

use std::fmt;

/// Which playable map a scene was built from.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum StageId {
    Hub,
    Level(u8),
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageId::Hub => write!(f, "Hub"),
            StageId::Level(n) => write!(f, "Level {n}"),
        }
    }
}

/// Where a door leads. Tagged at parse time from the door character.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DoorTarget {
    Hub,
    Level(u8),
    /// Leads to the win screen once enough groups are collected,
    /// otherwise back to the hub.
    Exit,
}
