/// Scenes: one playable map (hub or level) or the win screen.
///
/// ## Frame pipeline (PlayScene, status Running)
///
///   1. Lava contact        → LavaStun, nothing else this frame
///   2. Safe-zone test      (fresh every frame)
///   3. Stalactite update   (skipped inside the safe zone)
///   4. Body physics        → PendingReset on lethal contact
///   5. Collectible pickup
///   6. Door interaction    → outcome for the session
///   7. Cancel              → back to the hub (levels only)
///
/// While not Running only the countdown advances; intent is ignored.
///
/// A scene never replaces itself. It reports a `SceneOutcome` and the
/// session decides what to build next.

use crate::config::SimConfig;
use crate::domain::collectible::{Collectibles, ProgressLedger};
use crate::domain::entity::{Body, Intent};
use crate::domain::geometry::LevelGeometry;
use crate::domain::grid::Grid;
use crate::domain::hazard::{in_safe_zone, HazardField, StalactiteState};
use crate::domain::physics;
use crate::domain::stage::{DoorTarget, StageId};
use super::event::{GameEvent, SceneKind};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum SceneStatus {
    Running,
    /// Frozen in lava. Expiry schedules an immediate reset.
    LavaStun { remaining: f32 },
    /// Waiting to rebuild the scene from scratch.
    PendingReset { remaining: f32 },
}

/// What the session should do after this frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SceneOutcome {
    Stay,
    /// Rebuild the same stage.
    Reset,
    /// Leave through a door (or cancel back to the hub).
    Enter(DoorTarget),
    /// Win screen dismissed.
    Acknowledge,
}

pub struct PlayScene {
    pub stage: StageId,
    pub grid: Grid,
    pub geometry: LevelGeometry,
    pub body: Body,
    pub hazards: HazardField,
    pub collectibles: Collectibles,
    pub status: SceneStatus,
    /// Safe-zone result of the last running frame. Display only.
    pub safe: bool,
}

impl PlayScene {
    pub fn new(stage: StageId, grid: Grid, ledger: &ProgressLedger, cfg: &SimConfig) -> Self {
        let geometry = LevelGeometry::parse(&grid);
        let hazards = HazardField::from_geometry(&geometry, &cfg.hazards);
        let collectibles = Collectibles::build(stage, &geometry.collectibles, ledger);
        let body = Body::new(geometry.spawn);
        PlayScene {
            stage,
            grid,
            geometry,
            body,
            hazards,
            collectibles,
            status: SceneStatus::Running,
            safe: false,
        }
    }

    pub fn update(
        &mut self,
        dt: f32,
        intent: &Intent,
        ledger: &mut ProgressLedger,
        cfg: &SimConfig,
        events: &mut Vec<GameEvent>,
    ) -> SceneOutcome {
        match self.status {
            SceneStatus::Running => self.run_frame(intent, ledger, cfg, events),
            SceneStatus::LavaStun { remaining } => {
                let remaining = remaining - dt;
                self.status = if remaining <= 0.0 {
                    SceneStatus::PendingReset { remaining: 0.0 }
                } else {
                    SceneStatus::LavaStun { remaining }
                };
                SceneOutcome::Stay
            }
            SceneStatus::PendingReset { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    return SceneOutcome::Reset;
                }
                self.status = SceneStatus::PendingReset { remaining };
                SceneOutcome::Stay
            }
        }
    }

    fn run_frame(
        &mut self,
        intent: &Intent,
        ledger: &mut ProgressLedger,
        cfg: &SimConfig,
        events: &mut Vec<GameEvent>,
    ) -> SceneOutcome {
        // ── Lava ──
        if self.geometry.lava.iter().any(|l| l.overlaps(&self.body.rect)) {
            tracing::debug!(stage = %self.stage, "lava contact");
            self.body.stop();
            self.status = SceneStatus::LavaStun { remaining: cfg.timing.lava_stun_s };
            events.push(GameEvent::LavaStun);
            return SceneOutcome::Stay;
        }

        // ── Hazards ──
        self.safe = in_safe_zone(&self.body.rect, &self.geometry.doors, &cfg.hazards);
        if !self.safe {
            let changes = self.hazards.update(&self.geometry.solids, &self.body.rect, &cfg.hazards);
            for (index, _, after) in changes {
                match after {
                    StalactiteState::Falling => {
                        tracing::debug!(stage = %self.stage, index, "stalactite triggered");
                        events.push(GameEvent::StalactiteTriggered { index });
                    }
                    StalactiteState::Rested => events.push(GameEvent::StalactiteRested { index }),
                    StalactiteState::Pinned => {}
                }
            }
        }

        // ── Physics ──
        let solids = self.hazards.active_solids(&self.geometry.solids, self.safe);
        let lethal = self.hazards.active_lethal(self.safe);
        let killed = physics::step_body(
            &mut self.body,
            intent,
            &solids,
            &lethal,
            self.geometry.world_w,
            &cfg.physics,
        );
        if killed {
            tracing::debug!(stage = %self.stage, x = self.body.rect.x, y = self.body.rect.y, "player killed");
            self.status = SceneStatus::PendingReset { remaining: cfg.timing.death_cooldown_s };
            events.push(GameEvent::PlayerKilled);
            return SceneOutcome::Stay;
        }

        // ── Collectibles ──
        for key in self.collectibles.collect(&self.body.rect, ledger) {
            tracing::debug!(stage = %key.stage(), total = ledger.count(), "egg group picked");
            events.push(GameEvent::CollectiblePicked { key, total: ledger.count() });
        }

        // ── Doors ──
        if intent.interact {
            if let Some(door) = self.geometry.doors.iter().find(|d| d.rect.overlaps(&self.body.rect)) {
                return SceneOutcome::Enter(door.target);
            }
        }

        if intent.cancel && self.stage != StageId::Hub {
            return SceneOutcome::Enter(DoorTarget::Hub);
        }

        SceneOutcome::Stay
    }
}

/// End screen. Holds nothing but what it displays.
#[derive(Clone, Debug)]
pub struct WinScene {
    pub collected: usize,
}

impl WinScene {
    pub fn update(&mut self, intent: &Intent) -> SceneOutcome {
        if intent.interact || intent.cancel {
            SceneOutcome::Acknowledge
        } else {
            SceneOutcome::Stay
        }
    }
}

/// The single active scene slot.
pub enum Scene {
    Hub(PlayScene),
    Level(PlayScene),
    Win(WinScene),
}

impl Scene {
    pub fn play(stage: StageId, scene: PlayScene) -> Self {
        match stage {
            StageId::Hub => Scene::Hub(scene),
            StageId::Level(_) => Scene::Level(scene),
        }
    }

    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Hub(_) => SceneKind::Hub,
            Scene::Level(p) => SceneKind::from(p.stage),
            Scene::Win(_) => SceneKind::Win,
        }
    }

    pub fn as_play(&self) -> Option<&PlayScene> {
        match self {
            Scene::Hub(p) | Scene::Level(p) => Some(p),
            Scene::Win(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::collectible::GroupKey;
    use crate::domain::entity::BODY_SIZE;
    use crate::domain::rect::Rect;
    use crate::domain::tile::TILE;

    const DT: f32 = 1.0 / 60.0;

    fn scene(stage: StageId, rows: &[&str]) -> PlayScene {
        PlayScene::new(stage, Grid::new(rows).unwrap(), &ProgressLedger::new(), &SimConfig::default())
    }

    fn run(
        s: &mut PlayScene,
        intent: Intent,
        frames: usize,
        ledger: &mut ProgressLedger,
    ) -> (Vec<GameEvent>, SceneOutcome) {
        let cfg = SimConfig::default();
        let mut events = vec![];
        let mut outcome = SceneOutcome::Stay;
        for _ in 0..frames {
            outcome = s.update(DT, &intent, ledger, &cfg, &mut events);
            if outcome != SceneOutcome::Stay {
                break;
            }
        }
        (events, outcome)
    }

    #[test]
    fn body_starts_at_spawn() {
        let s = scene(StageId::Hub, &[
            "........",
            "...P....",
            "........",
            "########",
        ]);
        assert_eq!(s.body.rect, Rect::new(3 * TILE, TILE, BODY_SIZE, BODY_SIZE));
        assert_eq!(s.status, SceneStatus::Running);
    }

    #[test]
    fn lava_stuns_then_resets() {
        let mut s = scene(StageId::Level(1), &[
            ".P......",
            "........",
            "~~~~~~~~",
            "########",
        ]);
        let mut ledger = ProgressLedger::new();
        let (events, outcome) = run(&mut s, Intent::default(), 10, &mut ledger);
        assert_eq!(outcome, SceneOutcome::Stay);
        assert_eq!(events, vec![GameEvent::LavaStun]);
        assert!(matches!(s.status, SceneStatus::LavaStun { .. }));
        let frozen = s.body.rect;

        // Held input does nothing while stunned.
        let right = Intent { right: true, ..Intent::default() };
        let (_, outcome) = run(&mut s, right, 200, &mut ledger);
        assert_eq!(outcome, SceneOutcome::Reset);
        assert_eq!(s.body.rect, frozen);
    }

    #[test]
    fn stun_expiry_resets_on_the_following_frame() {
        let mut s = scene(StageId::Hub, &["P.", "..", "##"]);
        s.status = SceneStatus::LavaStun { remaining: 0.01 };
        let cfg = SimConfig::default();
        let mut ledger = ProgressLedger::new();
        let mut events = vec![];
        let i = Intent::default();
        assert_eq!(s.update(DT, &i, &mut ledger, &cfg, &mut events), SceneOutcome::Stay);
        assert_eq!(s.status, SceneStatus::PendingReset { remaining: 0.0 });
        assert_eq!(s.update(DT, &i, &mut ledger, &cfg, &mut events), SceneOutcome::Reset);
    }

    #[test]
    fn tip_contact_schedules_reset_after_cooldown() {
        let mut s = scene(StageId::Level(1), &[
            ".P........",
            "..........",
            "..v.......",
            "##########",
        ]);
        let mut ledger = ProgressLedger::new();
        let (events, outcome) = run(&mut s, Intent::default(), 1, &mut ledger);
        assert_eq!(outcome, SceneOutcome::Stay);
        assert_eq!(events, vec![GameEvent::PlayerKilled]);
        let cooldown = SimConfig::default().timing.death_cooldown_s;
        assert_eq!(s.status, SceneStatus::PendingReset { remaining: cooldown });

        // About half a second later the reset comes due.
        let (_, outcome) = run(&mut s, Intent::default(), 40, &mut ledger);
        assert_eq!(outcome, SceneOutcome::Reset);
    }

    #[test]
    fn pickup_emits_running_total() {
        let mut s = scene(StageId::Level(1), &[
            "..........",
            ".P*.......",
            "..........",
            "##########",
        ]);
        let mut ledger = ProgressLedger::new();
        ledger.record(GroupKey::new(StageId::Level(3), vec![(0, 0)]));
        let (events, _) = run(&mut s, Intent::default(), 1, &mut ledger);
        assert_eq!(events, vec![GameEvent::CollectiblePicked {
            key: GroupKey::new(StageId::Level(1), vec![(2, 1)]),
            total: 2,
        }]);
        assert!(s.collectibles.is_empty());
    }

    #[test]
    fn interact_on_door_reports_target() {
        let mut s = scene(StageId::Hub, &[
            "..........",
            ".P........",
            "..3.......",
            "##########",
        ]);
        let mut ledger = ProgressLedger::new();
        let (_, outcome) = run(&mut s, Intent::default(), 3, &mut ledger);
        assert_eq!(outcome, SceneOutcome::Stay);
        let interact = Intent { interact: true, ..Intent::default() };
        let (_, outcome) = run(&mut s, interact, 1, &mut ledger);
        assert_eq!(outcome, SceneOutcome::Enter(DoorTarget::Level(3)));
    }

    #[test]
    fn interact_away_from_doors_does_nothing() {
        let mut s = scene(StageId::Hub, &[
            "..........",
            ".P........",
            "........1.",
            "##########",
        ]);
        let mut ledger = ProgressLedger::new();
        let interact = Intent { interact: true, ..Intent::default() };
        let (_, outcome) = run(&mut s, interact, 5, &mut ledger);
        assert_eq!(outcome, SceneOutcome::Stay);
    }

    #[test]
    fn cancel_leaves_levels_but_not_the_hub() {
        let rows = &["..........", ".P........", "..........", "##########"];
        let cancel = Intent { cancel: true, ..Intent::default() };
        let mut ledger = ProgressLedger::new();

        let mut level = scene(StageId::Level(2), rows);
        assert_eq!(run(&mut level, cancel, 1, &mut ledger).1, SceneOutcome::Enter(DoorTarget::Hub));

        let mut hub = scene(StageId::Hub, rows);
        assert_eq!(run(&mut hub, cancel, 1, &mut ledger).1, SceneOutcome::Stay);
    }

    #[test]
    fn stalactite_triggers_and_rests() {
        let mut s = scene(StageId::Level(1), &[
            "############",
            "....^^......",
            "............",
            "............",
            "............",
            "............",
            "............",
            "............",
            "............",
            "############",
        ]);
        // Stand off to the side so the falling spike misses.
        s.body.rect = Rect::new(8 * TILE, 7 * TILE, BODY_SIZE, BODY_SIZE);
        s.body.on_ground = true;
        s.hazards.stalactites[0].state = StalactiteState::Falling;
        let mut ledger = ProgressLedger::new();
        let (events, _) = run(&mut s, Intent::default(), 120, &mut ledger);
        assert!(events.contains(&GameEvent::StalactiteRested { index: 0 }));
        assert_eq!(s.hazards.stalactites[0].rect().bottom(), 9 * TILE);
        assert_eq!(s.status, SceneStatus::Running);
    }

    const SPIKE_ROOM: &[&str] = &[
        "##########",
        "....^^....",
        "..........",
        "..........",
        "..........",
        "....P.....",
        "..........",
        "##########",
    ];

    #[test]
    fn falling_tip_kills_body_underneath() {
        let mut s = scene(StageId::Level(1), SPIKE_ROOM);
        let mut ledger = ProgressLedger::new();
        let (events, outcome) = run(&mut s, Intent::default(), 20, &mut ledger);
        assert_eq!(outcome, SceneOutcome::Stay);
        assert_eq!(events, vec![
            GameEvent::StalactiteTriggered { index: 0 },
            GameEvent::PlayerKilled,
        ]);
        assert_eq!(s.hazards.stalactites[0].state, StalactiteState::Falling);
        assert!(matches!(s.status, SceneStatus::PendingReset { .. }));
    }

    #[test]
    fn rested_tip_is_still_lethal() {
        let mut s = scene(StageId::Level(1), SPIKE_ROOM);
        // Landed on the floor, right where the body stands.
        let st = &mut s.hazards.stalactites[0];
        st.state = StalactiteState::Rested;
        st.y = (7 * TILE - st.h) as f32;
        assert!(st.tip_hitboxes().iter().all(|t| t.overlaps(&s.body.rect)));

        let mut ledger = ProgressLedger::new();
        let (events, _) = run(&mut s, Intent::default(), 1, &mut ledger);
        assert_eq!(events, vec![GameEvent::PlayerKilled]);
        assert_eq!(s.hazards.stalactites[0].state, StalactiteState::Rested);
    }

    #[test]
    fn safe_zone_freezes_stalactites() {
        let mut s = scene(StageId::Level(1), &[
            "############",
            "..^.........",
            "............",
            "............",
            "............",
            "............",
            "..D.........",
            "............",
            "############",
        ]);
        // Standing on the floor right under the spike, inside the door's radius.
        s.body.rect = Rect::new(TILE + TILE / 2, 6 * TILE, BODY_SIZE, BODY_SIZE);
        let mut ledger = ProgressLedger::new();
        let (events, _) = run(&mut s, Intent::default(), 30, &mut ledger);
        assert!(s.safe);
        assert!(events.is_empty());
        assert_eq!(s.hazards.stalactites[0].state, StalactiteState::Pinned);
    }

    #[test]
    fn win_scene_waits_for_acknowledgement() {
        let mut w = WinScene { collected: 6 };
        assert_eq!(w.update(&Intent::default()), SceneOutcome::Stay);
        assert_eq!(w.update(&Intent { left: true, jump: true, ..Intent::default() }), SceneOutcome::Stay);
        assert_eq!(w.update(&Intent { interact: true, ..Intent::default() }), SceneOutcome::Acknowledge);
        assert_eq!(w.update(&Intent { cancel: true, ..Intent::default() }), SceneOutcome::Acknowledge);
    }
}
