/// Events emitted during a simulation step.
/// The presentation layer consumes these for sound; nothing it does with
/// them can feed back into the simulation.

use crate::domain::collectible::GroupKey;
use crate::domain::stage::StageId;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    CollectiblePicked { key: GroupKey, total: usize },
    StalactiteTriggered { index: usize },
    StalactiteRested { index: usize },
    LavaStun,
    PlayerKilled,
    SceneChanged { to: SceneKind },
    /// The current stage was rebuilt from scratch after a death or stun.
    SceneReset { scene: SceneKind },
    Won,
}

/// Which kind of scene the slot now holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneKind {
    Hub,
    Level(u8),
    Win,
}

impl From<StageId> for SceneKind {
    fn from(stage: StageId) -> Self {
        match stage {
            StageId::Hub => SceneKind::Hub,
            StageId::Level(n) => SceneKind::Level(n),
        }
    }
}
