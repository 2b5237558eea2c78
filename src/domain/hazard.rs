/// Hazard engine: ceiling and ground spikes.
///
/// Both kinds are built from contiguous runs of anchor/base tiles, so a
/// multi-tile spike acts as one rigid body. Each covered column carries
/// its own narrow tip hitbox; the rest of the spike is plain solid.
///
/// ## Stalactite lifecycle
///
/// ```text
///   Pinned ──(body walks underneath)──▶ Falling ──(static solid)──▶ Rested
/// ```
///
/// `Rested` is terminal for the life of the scene. A rested stalactite is
/// still solid and its tips still kill.
///
/// ## Safe zone
///
/// A body overlapping any door rect inflated by `safe_zone_tiles` sees no
/// hazard solids and no hazard hitboxes at all, and stalactites are not
/// stepped while it stays there.

use crate::config::HazardConfig;

use super::geometry::{contiguous_runs, Door, LevelGeometry, Run};
use super::rect::Rect;
use super::tile::TILE;

pub const TIP_W: i32 = if TILE / 3 > 4 { TILE / 3 } else { 4 };
pub const TIP_H: i32 = TILE;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StalactiteState {
    Pinned,
    Falling,
    Rested,
}

#[derive(Clone, Debug)]
pub struct Stalactite {
    pub x: i32,
    pub w_tiles: i32,
    pub h: i32,
    pub anchor_y: i32,
    pub y: f32,
    pub vy: f32,
    pub state: StalactiteState,
}

impl Stalactite {
    pub fn new(run: &Run, cfg: &HazardConfig) -> Self {
        let anchor_y = run.row as i32 * TILE;
        Stalactite {
            x: run.x0 as i32 * TILE,
            w_tiles: run.len() as i32,
            h: cfg.stalactite_len_tiles * TILE,
            anchor_y,
            y: anchor_y as f32,
            vy: 0.0,
            state: StalactiteState::Pinned,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y as i32, self.w_tiles * TILE, self.h)
    }

    /// One tip per column, along the bottom edge.
    pub fn tip_hitboxes(&self) -> Vec<Rect> {
        let base_y = self.y as i32 + self.h - TIP_H;
        column_tips(self.x, self.w_tiles, base_y)
    }

    /// Body center inside the span (less the pad) and body top below the
    /// first tile under the anchor.
    pub fn should_trigger(&self, body: &Rect, cfg: &HazardConfig) -> bool {
        let cx = body.center_x();
        let w = self.w_tiles * TILE;
        if cx < self.x + cfg.trigger_pad || cx > self.x + w - cfg.trigger_pad {
            return false;
        }
        body.top() > self.anchor_y + TILE
    }

    /// Advance one frame against static solids only.
    pub fn update(&mut self, static_solids: &[Rect], body: &Rect, cfg: &HazardConfig) {
        match self.state {
            StalactiteState::Rested => return,
            StalactiteState::Pinned => {
                if !self.should_trigger(body, cfg) {
                    return;
                }
                self.state = StalactiteState::Falling;
            }
            StalactiteState::Falling => {}
        }

        self.vy = (self.vy + cfg.stalactite_fall_accel).min(cfg.stalactite_max_fall);
        let steps = (self.vy.round() as i32).max(1);
        for _ in 0..steps {
            self.y += 1.0;
            let r = self.rect();
            if let Some(s) = static_solids.iter().find(|s| r.overlaps(s)) {
                self.y = (s.top() - self.h) as f32;
                self.vy = 0.0;
                self.state = StalactiteState::Rested;
                return;
            }
        }
    }
}

/// Static ground spike. Its tile row is the base; it rises upward.
#[derive(Clone, Debug)]
pub struct Stalagmite {
    pub x: i32,
    pub y: i32,
    pub w_tiles: i32,
    pub h: i32,
}

impl Stalagmite {
    pub fn new(run: &Run, cfg: &HazardConfig) -> Self {
        let h = cfg.stalagmite_len_tiles * TILE;
        let base_y = run.row as i32 * TILE;
        Stalagmite {
            x: run.x0 as i32 * TILE,
            y: base_y - h + TILE,
            w_tiles: run.len() as i32,
            h,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w_tiles * TILE, self.h)
    }

    /// One tip per column, along the top edge.
    pub fn tip_hitboxes(&self) -> Vec<Rect> {
        column_tips(self.x, self.w_tiles, self.y)
    }
}

fn column_tips(x: i32, w_tiles: i32, y: i32) -> Vec<Rect> {
    (0..w_tiles)
        .map(|i| Rect::new(x + i * TILE + (TILE - TIP_W) / 2, y, TIP_W, TIP_H))
        .collect()
}

/// Every hazard of one scene. Rebuilt fresh per scene.
#[derive(Clone, Debug, Default)]
pub struct HazardField {
    pub stalactites: Vec<Stalactite>,
    pub stalagmites: Vec<Stalagmite>,
}

impl HazardField {
    pub fn from_geometry(geo: &LevelGeometry, cfg: &HazardConfig) -> Self {
        HazardField {
            stalactites: contiguous_runs(&geo.stalactite_anchors)
                .iter()
                .map(|r| Stalactite::new(r, cfg))
                .collect(),
            stalagmites: contiguous_runs(&geo.stalagmite_bases)
                .iter()
                .map(|r| Stalagmite::new(r, cfg))
                .collect(),
        }
    }

    /// Step every stalactite. Returns `(index, old, new)` for each one
    /// whose state changed this frame.
    pub fn update(
        &mut self,
        static_solids: &[Rect],
        body: &Rect,
        cfg: &HazardConfig,
    ) -> Vec<(usize, StalactiteState, StalactiteState)> {
        let mut changes = vec![];
        for (i, st) in self.stalactites.iter_mut().enumerate() {
            let before = st.state;
            st.update(static_solids, body, cfg);
            if st.state != before {
                changes.push((i, before, st.state));
            }
        }
        changes
    }

    /// Static solids plus hazard solids, unless suppressed.
    pub fn active_solids(&self, static_solids: &[Rect], safe: bool) -> Vec<Rect> {
        let mut solids = static_solids.to_vec();
        if safe {
            return solids;
        }
        solids.extend(self.stalactites.iter().map(Stalactite::rect));
        solids.extend(self.stalagmites.iter().map(Stalagmite::rect));
        solids
    }

    /// All tip hitboxes, unless suppressed.
    pub fn active_lethal(&self, safe: bool) -> Vec<Rect> {
        if safe {
            return vec![];
        }
        self.stalactites.iter()
            .flat_map(Stalactite::tip_hitboxes)
            .chain(self.stalagmites.iter().flat_map(Stalagmite::tip_hitboxes))
            .collect()
    }
}

/// Is the body within the inflated radius of any door?
pub fn in_safe_zone(body: &Rect, doors: &[Door], cfg: &HazardConfig) -> bool {
    let inflate = cfg.safe_zone_tiles * TILE;
    doors.iter().any(|d| body.overlaps(&d.rect.inflate(inflate, inflate)))
}
