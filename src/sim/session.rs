/// Session: owns the scene slot and everything that outlives a scene.
///
/// Only two things cross scene boundaries: the progress ledger and the
/// difficulty counter. Both live here and are handed to the active scene
/// by reference.
///
/// ## Transitions
///
/// ```text
///   Hub ──door n──▶ Level(n) ──door D / cancel──▶ Hub
///                       │
///                       └──exit E──▶ Win   (enough groups)
///                                ──▶ Hub   (otherwise)
///   Win ──interact / cancel──▶ Hub   (ledger cleared)
///   any ──cancel twice within the window──▶ Hub
/// ```
///
/// A reset rebuilds the same stage. Resetting the hub clears the ledger;
/// resetting the hard level bumps the difficulty counter first.

use crate::config::SimConfig;
use crate::domain::collectible::ProgressLedger;
use crate::domain::entity::Intent;
use crate::domain::stage::{DoorTarget, StageId};
use super::event::{GameEvent, SceneKind};
use super::level::LevelSet;
use super::scene::{PlayScene, Scene, SceneOutcome, WinScene};

pub struct Session {
    cfg: SimConfig,
    levels: LevelSet,
    ledger: ProgressLedger,
    difficulty: u32,
    scene: Scene,
    /// Latest intent. Edge flags accumulate until the next update.
    intent: Intent,
    /// Seconds since the session started.
    clock: f64,
    last_cancel: Option<f64>,
}

impl Session {
    /// Start in the hub.
    pub fn new(levels: LevelSet, cfg: SimConfig) -> Self {
        let ledger = ProgressLedger::new();
        let scene = Scene::Hub(PlayScene::new(StageId::Hub, levels.hub().clone(), &ledger, &cfg));
        Session {
            cfg,
            levels,
            ledger,
            difficulty: 0,
            scene,
            intent: Intent::default(),
            clock: 0.0,
            last_cancel: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn ledger(&self) -> &ProgressLedger {
        &self.ledger
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    /// Feed this frame's input. Held flags replace the previous ones;
    /// `interact` and `cancel` are kept until the next `update`.
    pub fn handle_intent(&mut self, intent: Intent) {
        let interact = self.intent.interact || intent.interact;
        let cancel = self.intent.cancel || intent.cancel;
        self.intent = Intent { interact, cancel, ..intent };
    }

    /// Advance one frame.
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        self.clock += f64::from(dt);
        let intent = self.intent;
        self.intent.interact = false;
        self.intent.cancel = false;

        let mut events = vec![];

        if intent.cancel && self.double_cancel() {
            tracing::info!("double cancel, returning to hub");
            self.enter(StageId::Hub, &mut events);
            return events;
        }

        let outcome = match &mut self.scene {
            Scene::Hub(play) | Scene::Level(play) => {
                play.update(dt, &intent, &mut self.ledger, &self.cfg, &mut events)
            }
            Scene::Win(win) => win.update(&intent),
        };
        self.apply(outcome, &mut events);
        events
    }

    /// Record a cancel press. True if it completes a double press.
    fn double_cancel(&mut self) -> bool {
        let window = self.cfg.timing.cancel_window_ms as f64 / 1000.0;
        match self.last_cancel {
            Some(t) if self.clock - t <= window => {
                self.last_cancel = None;
                true
            }
            _ => {
                self.last_cancel = Some(self.clock);
                false
            }
        }
    }

    fn apply(&mut self, outcome: SceneOutcome, events: &mut Vec<GameEvent>) {
        match outcome {
            SceneOutcome::Stay => {}
            SceneOutcome::Reset => self.reset(events),
            SceneOutcome::Enter(DoorTarget::Hub) => self.enter(StageId::Hub, events),
            SceneOutcome::Enter(DoorTarget::Level(n)) => {
                if self.levels.has_level(n) {
                    self.enter(StageId::Level(n), events);
                } else {
                    tracing::warn!(level = n, "door leads to a level that is not loaded");
                }
            }
            SceneOutcome::Enter(DoorTarget::Exit) => {
                let count = self.ledger.count();
                if count >= self.cfg.progress.required_collectibles {
                    tracing::info!(count, "exit reached, game won");
                    self.scene = Scene::Win(WinScene { collected: count });
                    events.push(GameEvent::Won);
                    events.push(GameEvent::SceneChanged { to: SceneKind::Win });
                } else {
                    tracing::info!(
                        count,
                        required = self.cfg.progress.required_collectibles,
                        "exit reached early, back to hub"
                    );
                    self.enter(StageId::Hub, events);
                }
            }
            SceneOutcome::Acknowledge => {
                self.ledger.clear();
                self.enter(StageId::Hub, events);
            }
        }
    }

    fn reset(&mut self, events: &mut Vec<GameEvent>) {
        let Some(stage) = self.scene.as_play().map(|p| p.stage) else {
            return;
        };
        match stage {
            StageId::Hub => {
                tracing::info!("hub reset, progress cleared");
                self.ledger.clear();
            }
            StageId::Level(n) if n == self.cfg.progress.hard_level => {
                self.difficulty += 1;
                tracing::info!(level = n, difficulty = self.difficulty, "difficulty raised");
            }
            StageId::Level(_) => {}
        }
        if let Some(scene) = build_play(stage, &self.levels, self.difficulty, &self.ledger, &self.cfg) {
            self.scene = scene;
            events.push(GameEvent::SceneReset { scene: SceneKind::from(stage) });
        }
        tracing::debug!(%stage, "scene reset");
    }

    fn enter(&mut self, stage: StageId, events: &mut Vec<GameEvent>) {
        match build_play(stage, &self.levels, self.difficulty, &self.ledger, &self.cfg) {
            Some(scene) => {
                tracing::info!(%stage, collected = self.ledger.count(), "entering");
                self.scene = scene;
                events.push(GameEvent::SceneChanged { to: SceneKind::from(stage) });
            }
            None => tracing::warn!(%stage, "no grid for stage"),
        }
    }
}

fn build_play(
    stage: StageId,
    levels: &LevelSet,
    difficulty: u32,
    ledger: &ProgressLedger,
    cfg: &SimConfig,
) -> Option<Scene> {
    let grid = levels.grid_for(stage, difficulty, &cfg.progress)?;
    Some(Scene::play(stage, PlayScene::new(stage, grid, ledger, cfg)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::BODY_SIZE;
    use crate::domain::grid::Grid;
    use crate::domain::rect::Rect;
    use crate::domain::tile::TILE;
    use crate::sim::scene::SceneStatus;

    const DT: f32 = 1.0 / 60.0;

    fn grid(rows: &[&str]) -> Grid {
        Grid::new(rows).unwrap()
    }

    /// Hub whose spawn overlaps a door to level `n`.
    fn hub_with_door(n: char) -> Grid {
        let row = format!("..{n}.......");
        grid(&["..........", ".P........", row.as_str(), "##########"])
    }

    fn session(hub: Grid, levels: Vec<(u8, Grid)>, cfg: SimConfig) -> Session {
        Session::new(LevelSet::new(hub, levels), cfg)
    }

    fn press(s: &mut Session, intent: Intent) -> Vec<GameEvent> {
        s.handle_intent(intent);
        s.update(DT)
    }

    fn interact() -> Intent {
        Intent { interact: true, ..Intent::default() }
    }

    fn cancel() -> Intent {
        Intent { cancel: true, ..Intent::default() }
    }

    fn play(s: &Session) -> &PlayScene {
        s.scene().as_play().unwrap()
    }

    #[test]
    fn starts_in_hub_at_spawn() {
        let s = session(grid(&["........", "...P....", "........", "########"]), vec![], SimConfig::default());
        assert_eq!(s.scene().kind(), SceneKind::Hub);
        assert_eq!(play(&s).body.rect, Rect::new(3 * TILE, TILE, BODY_SIZE, BODY_SIZE));
        assert_eq!(s.ledger().count(), 0);
        assert_eq!(s.difficulty(), 0);
    }

    #[test]
    fn hub_lava_reset_clears_ledger() {
        let hub = grid(&[
            "..........",
            ".P*.......",
            "..........",
            "~~~~~~~~~~",
            "##########",
        ]);
        let mut s = session(hub, vec![], SimConfig::default());

        let events = s.update(DT);
        assert!(matches!(events[..], [GameEvent::CollectiblePicked { total: 1, .. }]));
        assert_eq!(s.ledger().count(), 1);

        let mut stunned = false;
        let mut rebuilt = false;
        for _ in 0..200 {
            let events = s.update(DT);
            if events.contains(&GameEvent::LavaStun) {
                stunned = true;
            }
            if s.ledger().count() == 0 {
                rebuilt = events.contains(&GameEvent::SceneReset { scene: SceneKind::Hub });
                break;
            }
        }
        assert!(stunned);
        assert!(rebuilt);
        assert_eq!(s.ledger().count(), 0);
        // Fresh hub: back at spawn, running, collectible on offer again.
        let p = play(&s);
        assert_eq!(s.scene().kind(), SceneKind::Hub);
        assert_eq!(p.status, SceneStatus::Running);
        assert_eq!(p.body.rect, Rect::new(TILE, TILE, BODY_SIZE, BODY_SIZE));
        assert_eq!(p.collectibles.groups.len(), 1);
    }

    #[test]
    fn hard_level_death_raises_difficulty() {
        let level = grid(&[
            "..........",
            ".P........",
            "..........",
            "~~~~......",
            "..........",
            "##########",
        ]);
        let mut s = session(hub_with_door('2'), vec![(2, level)], SimConfig::default());
        let events = press(&mut s, interact());
        assert_eq!(events, vec![GameEvent::SceneChanged { to: SceneKind::Level(2) }]);
        let base_lava = play(&s).geometry.lava.len();

        for _ in 0..300 {
            s.update(DT);
            if s.difficulty() > 0 {
                break;
            }
        }
        assert_eq!(s.difficulty(), 1);
        assert_eq!(s.scene().kind(), SceneKind::Level(2));
        // Rows h-2 and h-3 gained `ramp_step` lava tiles each.
        assert_eq!(play(&s).geometry.lava.len(), base_lava + 4);
    }

    #[test]
    fn easy_level_death_keeps_difficulty() {
        // Spawn sits on a ground spike: every fresh scene dies on its first frame.
        let level = grid(&[
            ".P........",
            "..........",
            "..v.......",
            "##########",
        ]);
        let mut s = session(hub_with_door('1'), vec![(1, level)], SimConfig::default());
        press(&mut s, interact());
        assert_eq!(s.scene().kind(), SceneKind::Level(1));

        let mut kills = 0;
        let mut resets = 0;
        for _ in 0..61 {
            let events = s.update(DT);
            kills += events.iter().filter(|e| **e == GameEvent::PlayerKilled).count();
            resets += events.iter().filter(|e| **e == GameEvent::SceneReset { scene: SceneKind::Level(1) }).count();
        }
        assert!(kills >= 2, "scene was not rebuilt after the first death");
        assert!(resets >= 1);
        assert_eq!(s.difficulty(), 0);
        assert_eq!(s.scene().kind(), SceneKind::Level(1));
    }

    fn exit_level() -> Grid {
        grid(&[
            "..........",
            ".P*.......",
            "..E.......",
            "##########",
        ])
    }

    #[test]
    fn exit_with_all_groups_wins() {
        let mut cfg = SimConfig::default();
        cfg.progress.required_collectibles = 1;
        let mut s = session(hub_with_door('1'), vec![(1, exit_level())], cfg);
        press(&mut s, interact());

        // Pickup happens before the door check in the same frame.
        let events = press(&mut s, interact());
        assert!(events.contains(&GameEvent::Won));
        assert!(events.contains(&GameEvent::SceneChanged { to: SceneKind::Win }));
        assert!(matches!(s.scene(), Scene::Win(WinScene { collected: 1 })));

        // Nothing but acknowledgement moves on.
        s.handle_intent(Intent { left: true, ..Intent::default() });
        s.update(DT);
        assert_eq!(s.scene().kind(), SceneKind::Win);
        press(&mut s, interact());
        assert_eq!(s.scene().kind(), SceneKind::Hub);
        assert_eq!(s.ledger().count(), 0);
    }

    #[test]
    fn exit_short_of_groups_goes_to_hub() {
        let mut cfg = SimConfig::default();
        cfg.progress.required_collectibles = 2;
        let mut s = session(hub_with_door('1'), vec![(1, exit_level())], cfg);
        press(&mut s, interact());
        let events = press(&mut s, interact());
        assert!(!events.contains(&GameEvent::Won));
        assert_eq!(s.scene().kind(), SceneKind::Hub);
        assert_eq!(s.ledger().count(), 1);

        // Back in, the collected group is not offered again.
        press(&mut s, interact());
        assert!(play(&s).collectibles.is_empty());
    }

    #[test]
    fn door_to_missing_level_is_ignored() {
        let mut s = session(hub_with_door('7'), vec![], SimConfig::default());
        let events = press(&mut s, interact());
        assert!(events.is_empty());
        assert_eq!(s.scene().kind(), SceneKind::Hub);
    }

    #[test]
    fn single_cancel_leaves_a_level() {
        let level = grid(&["..........", ".P........", "..........", "##########"]);
        let mut s = session(hub_with_door('1'), vec![(1, level)], SimConfig::default());
        press(&mut s, interact());
        assert_eq!(s.scene().kind(), SceneKind::Level(1));
        let events = press(&mut s, cancel());
        assert_eq!(events, vec![GameEvent::SceneChanged { to: SceneKind::Hub }]);
    }

    fn walked_hub() -> Session {
        let hub = grid(&[".P..................", "....................", "####################"]);
        let mut s = session(hub, vec![], SimConfig::default());
        let right = Intent { right: true, ..Intent::default() };
        for _ in 0..20 {
            press(&mut s, right);
        }
        press(&mut s, Intent::default());
        assert!(play(&s).body.rect.x > TILE);
        s
    }

    #[test]
    fn double_cancel_forces_hub() {
        let mut s = walked_hub();
        press(&mut s, cancel());
        press(&mut s, Intent::default());
        let events = press(&mut s, cancel());
        assert_eq!(events, vec![GameEvent::SceneChanged { to: SceneKind::Hub }]);
        assert_eq!(play(&s).body.rect.x, TILE);
    }

    #[test]
    fn slow_cancels_do_nothing_in_hub() {
        let mut s = walked_hub();
        let x = play(&s).body.rect.x;
        press(&mut s, cancel());
        for _ in 0..60 {
            press(&mut s, Intent::default());
        }
        let events = press(&mut s, cancel());
        assert!(events.is_empty());
        assert_eq!(play(&s).body.rect.x, x);
    }

    #[test]
    fn edge_flags_survive_until_update() {
        let mut s = session(hub_with_door('1'), vec![(1, exit_level())], SimConfig::default());
        s.handle_intent(interact());
        s.handle_intent(Intent::default());
        s.update(DT);
        assert_eq!(s.scene().kind(), SceneKind::Level(1));
    }
}
