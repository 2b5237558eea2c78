/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// Each frame:
///   1. Compose the scene into `front` (a grid of `Cell`s)
///   2. Compare against `back` (the previous frame)
///   3. Queue terminal commands only for cells that changed
///   4. Flush once, then swap the buffers
///
/// One tile is drawn as two terminal columns. The simulation works in
/// pixels; everything dynamic (body, falling spikes) is snapped to the
/// tile it covers for display.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::hazard::StalactiteState;
use crate::domain::rect::Rect;
use crate::domain::stage::StageId;
use crate::domain::tile::{Tile, TILE};
use crate::sim::event::{GameEvent, SceneKind};
use crate::sim::scene::{PlayScene, Scene, SceneStatus, WinScene};
use crate::sim::session::Session;

// ── Cell ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Every cell carries an explicit background so row gaps match.
    const BASE_BG: Color = Color::Rgb { r: 18, g: 16, b: 24 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Never equal to a real cell; forces a full repaint.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        let bg = if bg == Color::Reset { Self::BASE_BG } else { bg };
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            *self = FrameBuffer::new(w, h);
        }
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    fn fill_row(&mut self, y: usize, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(' ', Color::White, bg));
        }
    }
}

// ── Camera ──

/// Viewport into the tile grid.
///
/// `(x, y)` is the tile shown at the top-left; it goes negative when the
/// map is smaller than the viewport so the map ends up centered.
#[derive(Clone, Debug, Default)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
    pub view_w: usize,
    pub view_h: usize,
}

impl Camera {
    /// Scroll only when the target leaves the inner 60% of the view.
    pub fn follow(&mut self, tx: i32, ty: i32, world_w: usize, world_h: usize) {
        self.x = follow_axis(self.x, tx, self.view_w, world_w);
        self.y = follow_axis(self.y, ty, self.view_h, world_h);
    }

    /// Jump straight to the target, no dead zone.
    pub fn center_on(&mut self, tx: i32, ty: i32, world_w: usize, world_h: usize) {
        self.x = clamp_axis(tx - self.view_w as i32 / 2, self.view_w, world_w);
        self.y = clamp_axis(ty - self.view_h as i32 / 2, self.view_h, world_h);
    }

    pub fn world_to_view(&self, wx: i32, wy: i32) -> Option<(usize, usize)> {
        let vx = wx - self.x;
        let vy = wy - self.y;
        if vx >= 0 && vx < self.view_w as i32 && vy >= 0 && vy < self.view_h as i32 {
            Some((vx as usize, vy as usize))
        } else {
            None
        }
    }
}

fn follow_axis(pos: i32, target: i32, view: usize, world: usize) -> i32 {
    if view == 0 {
        return pos;
    }
    let view = view as i32;
    let margin = view / 5;
    let next = if target < pos + margin {
        target - margin
    } else if target > pos + view - margin - 1 {
        target - view + margin + 1
    } else {
        pos
    };
    clamp_axis(next, view as usize, world)
}

fn clamp_axis(pos: i32, view: usize, world: usize) -> i32 {
    if world <= view {
        -((view as i32 - world as i32) / 2)
    } else {
        pos.clamp(0, world as i32 - view as i32)
    }
}

// ── Glyphs ──

/// Two-column look of a static tile.
fn tile_glyph(tile: Tile) -> (char, char, Color, Color) {
    match tile {
        Tile::Ground => ('▓', '▓', Color::Rgb { r: 110, g: 90, b: 70 }, Color::Rgb { r: 60, g: 48, b: 36 }),
        Tile::Platform => ('▔', '▔', Color::Rgb { r: 170, g: 140, b: 100 }, Color::Reset),
        Tile::HubDoor => ('[', ']', Color::Rgb { r: 120, g: 200, b: 255 }, Color::Rgb { r: 20, g: 40, b: 70 }),
        Tile::LevelDoor(n) => ('[', char::from(b'0' + n), Color::Rgb { r: 255, g: 220, b: 120 }, Color::Rgb { r: 60, g: 40, b: 10 }),
        Tile::ExitDoor => ('<', '>', Color::Rgb { r: 120, g: 255, b: 140 }, Color::Rgb { r: 10, g: 60, b: 20 }),
        Tile::Lava => ('≈', '≈', Color::Rgb { r: 255, g: 200, b: 60 }, Color::Rgb { r: 170, g: 40, b: 10 }),
        // Hazards and collectibles are drawn from live state; markers are blank.
        Tile::Empty
        | Tile::Spawn
        | Tile::StalactiteAnchor
        | Tile::StalagmiteBase
        | Tile::Collectible => (' ', ' ', Color::Reset, Color::Reset),
    }
}

/// Tiles covered by a pixel rect.
fn covered_tiles(r: &Rect) -> impl Iterator<Item = (i32, i32)> {
    let x0 = r.left().div_euclid(TILE);
    let x1 = (r.right() - 1).div_euclid(TILE);
    let y0 = r.top().div_euclid(TILE);
    let y1 = (r.bottom() - 1).div_euclid(TILE);
    (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| (x, y)))
}

// ── Renderer ──

const CELL_W: usize = 2;
const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;
/// HUD, gap, status and help rows around the map.
const RESERVED_ROWS: usize = MAP_ROW + 3;

const HUD_BG: Color = Color::Rgb { r: 30, g: 24, b: 50 };

/// Ticks a banner stays up.
const BANNER_TICKS: u32 = 90;
/// Ticks a stalactite flashes when it cracks loose or lands.
const FLASH_TICKS: u32 = 6;

const SPIKE_IDLE: Color = Color::Rgb { r: 200, g: 210, b: 230 };
const SPIKE_HOT: Color = Color::Rgb { r: 255, g: 110, b: 90 };

fn spike_color(state: StalactiteState, flashing: bool, safe: bool) -> Color {
    if safe {
        Color::DarkGrey
    } else if flashing {
        Color::White
    } else if state == StalactiteState::Falling {
        SPIKE_HOT
    } else {
        SPIKE_IDLE
    }
}

/// One-line banner text for an event, if it deserves one.
fn banner_for(event: &GameEvent, required: usize) -> Option<String> {
    match event {
        GameEvent::CollectiblePicked { total, .. } if *total >= required => {
            Some(format!("All {required} egg clutches found! Head for the exit"))
        }
        GameEvent::CollectiblePicked { key, total } => {
            Some(format!("Egg clutch {total}/{required} ({})", key.stage()))
        }
        GameEvent::SceneChanged { to: SceneKind::Hub } => Some("Back at the hub".to_string()),
        GameEvent::SceneChanged { to: SceneKind::Level(n) } => Some(format!("Cave {n}")),
        GameEvent::SceneReset { scene: SceneKind::Hub } => Some("Start over, the eggs are lost".to_string()),
        GameEvent::SceneReset { scene: SceneKind::Level(n) } => Some(format!("Cave {n}, try again")),
        GameEvent::Won => Some("Dodo found!".to_string()),
        _ => None,
    }
}

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    camera: Camera,
    last_scene: Option<SceneKind>,
    message: String,
    message_timer: u32,
    /// `(stalactite index, ticks left)` of spikes flashing this scene.
    flashes: Vec<(usize, u32)>,
    /// Key release events are being reported.
    enhanced: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            camera: Camera::default(),
            last_scene: None,
            message: String::new(),
            message_timer: 0,
            flashes: Vec::new(),
            enhanced: false,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;
        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            execute!(
                self.writer,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.enhanced = true;
        }
        self.sync_size();
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        if self.enhanced {
            execute!(self.writer, PopKeyboardEnhancementFlags)?;
        }
        execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    pub fn reports_key_release(&self) -> bool {
        self.enhanced
    }

    /// Feed one tick's events. Call once per simulation tick.
    pub fn notify(&mut self, events: &[GameEvent], required: usize) {
        for f in &mut self.flashes {
            f.1 = f.1.saturating_sub(1);
        }
        self.flashes.retain(|f| f.1 > 0);
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message.clear();
            }
        }
        for event in events {
            match event {
                GameEvent::StalactiteTriggered { index } | GameEvent::StalactiteRested { index } => {
                    self.flashes.retain(|f| f.0 != *index);
                    self.flashes.push((*index, FLASH_TICKS));
                }
                // Indices belong to the scene that is gone.
                GameEvent::SceneChanged { .. } | GameEvent::SceneReset { .. } => self.flashes.clear(),
                _ => {}
            }
            if let Some(msg) = banner_for(event, required) {
                self.message = msg;
                self.message_timer = BANNER_TICKS;
            }
        }
    }

    /// Pick up the terminal size; on change, force a full repaint.
    fn sync_size(&mut self) -> bool {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        let (tw, th) = (tw as usize, th as usize);
        if tw == self.term_w && th == self.term_h {
            return false;
        }
        self.term_w = tw;
        self.term_h = th;
        self.front.resize(tw, th);
        self.back.resize(tw, th);
        self.back.cells.fill(Cell::INVALID);
        true
    }

    pub fn render(&mut self, session: &Session) -> io::Result<()> {
        let scene = session.scene();
        let kind = scene.kind();
        let resized = self.sync_size();
        let changed = self.last_scene != Some(kind);

        if resized || changed {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        self.front.cells.fill(Cell::BLANK);
        match scene {
            Scene::Hub(play) | Scene::Level(play) => {
                self.place_camera(play, changed);
                self.compose_play(play, session);
            }
            Scene::Win(win) => self.compose_win(win, session),
        }
        self.last_scene = Some(kind);

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    fn place_camera(&mut self, play: &PlayScene, snap: bool) {
        let geo = &play.geometry;
        self.camera.view_w = (self.term_w / CELL_W).min(geo.width);
        self.camera.view_h = self.term_h.saturating_sub(RESERVED_ROWS).max(1).min(geo.height);

        let c = play.body.rect;
        let tx = (c.x + c.w / 2).div_euclid(TILE);
        let ty = (c.y + c.h / 2).div_euclid(TILE);
        if snap {
            self.camera.center_on(tx, ty, geo.width, geo.height);
        } else {
            self.camera.follow(tx, ty, geo.width, geo.height);
        }
    }

    // ── Diff flush ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut cursor_at: Option<(usize, usize)> = None;

        queue!(self.writer, SetForegroundColor(last_fg), SetBackgroundColor(last_bg))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    continue;
                }
                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.writer.flush()
    }

    // ── Compose ──

    fn compose_play(&mut self, play: &PlayScene, session: &Session) {
        let cfg = session.config();

        // ── HUD ──
        let mut hud = format!(
            " {:<8}  Dodo eggs {}/{}",
            play.stage.to_string(),
            session.ledger().count(),
            cfg.progress.required_collectibles,
        );
        if session.difficulty() > 0 {
            hud.push_str(&format!("  Heat {}", session.difficulty()));
        }
        if matches!(play.stage, StageId::Level(_)) && play.collectibles.is_empty() {
            hud.push_str("  (cave cleared)");
        }
        if play.safe {
            hud.push_str("  (door: safe)");
        }
        self.front.fill_row(HUD_ROW, HUD_BG);
        self.front.put_str(0, HUD_ROW, &hud, Color::White, HUD_BG);

        // ── Static tiles ──
        let cam = self.camera.clone();
        for vy in 0..cam.view_h {
            for vx in 0..cam.view_w {
                let wx = cam.x + vx as i32;
                let wy = cam.y + vy as i32;
                if wx < 0 || wy < 0 || wx as usize >= play.grid.width() || wy as usize >= play.grid.height() {
                    continue;
                }
                let glyph = tile_glyph(play.grid.tile_at(wx as usize, wy as usize));
                self.put_tile(vx, vy, glyph);
            }
        }

        // ── Collectibles ──
        let egg = ('◖', '◗', Color::Rgb { r: 255, g: 240, b: 200 }, Color::Reset);
        for group in &play.collectibles.groups {
            for t in &group.tiles {
                self.put_world(t.x.div_euclid(TILE), t.y.div_euclid(TILE), egg);
            }
        }

        // ── Hazards ──
        for (i, st) in play.hazards.stalactites.iter().enumerate() {
            let r = st.rect();
            let tip_row = (r.bottom() - 1).div_euclid(TILE);
            let flashing = self.flashes.iter().any(|f| f.0 == i);
            let fg = spike_color(st.state, flashing, play.safe);
            for (x, y) in covered_tiles(&r) {
                let ch = if y == tip_row { '▼' } else { '█' };
                self.put_world(x, y, (ch, ch, fg, Color::Reset));
            }
        }
        for sm in &play.hazards.stalagmites {
            let r = sm.rect();
            let tip_row = r.top().div_euclid(TILE);
            for (x, y) in covered_tiles(&r) {
                let ch = if y == tip_row { '▲' } else { '█' };
                let fg = spike_color(StalactiteState::Rested, false, play.safe);
                self.put_world(x, y, (ch, ch, fg, Color::Reset));
            }
        }

        // ── Body ──
        let body_fg = match play.status {
            SceneStatus::Running => Color::Rgb { r: 140, g: 255, b: 180 },
            SceneStatus::LavaStun { .. } => Color::Rgb { r: 255, g: 120, b: 40 },
            SceneStatus::PendingReset { .. } => Color::DarkRed,
        };
        for (x, y) in covered_tiles(&play.body.rect) {
            self.put_world(x, y, ('█', '█', body_fg, Color::Reset));
        }

        // ── Status & help ──
        let status_row = MAP_ROW + cam.view_h + 1;
        let status = match play.status {
            SceneStatus::Running => None,
            SceneStatus::LavaStun { .. } => Some(" Burnt! "),
            SceneStatus::PendingReset { .. } => Some(" Ouch! "),
        };
        if let Some(msg) = status {
            self.front.put_str(0, status_row, msg, Color::Black, Color::Rgb { r: 230, g: 120, b: 60 });
        } else if !self.message.is_empty() {
            let msg = format!(" ◈ {} ", self.message);
            self.front.put_str(0, status_row, &msg, Color::Black, Color::Rgb { r: 255, g: 220, b: 120 });
        }
        let help = " A/D:Move  W/Space:Jump  E:Door  Esc:Hub (x2 anywhere)  Q:Quit";
        self.front.put_str(0, status_row + 1, help, Color::DarkGrey, Color::Reset);
    }

    fn compose_win(&mut self, win: &WinScene, session: &Session) {
        let lines = [
            "You found Dodo!".to_string(),
            String::new(),
            format!("{} eggs brought home", win.collected),
            String::new(),
            "Press E or Esc to play again".to_string(),
        ];
        let top = self.front.height.saturating_sub(lines.len()) / 2;
        for (i, line) in lines.iter().enumerate() {
            let x = self.front.width.saturating_sub(line.chars().count()) / 2;
            self.front.put_str(x, top + i, line, Color::Rgb { r: 255, g: 230, b: 120 }, Color::Reset);
        }
        if session.difficulty() > 0 {
            let note = format!("Lava level survived at heat {}", session.difficulty());
            let x = self.front.width.saturating_sub(note.chars().count()) / 2;
            self.front.put_str(x, top + lines.len() + 1, &note, Color::DarkGrey, Color::Reset);
        }
    }

    /// Draw at a viewport tile position.
    fn put_tile(&mut self, vx: usize, vy: usize, (c0, c1, fg, bg): (char, char, Color, Color)) {
        let col = vx * CELL_W;
        let row = MAP_ROW + vy;
        self.front.set(col, row, Cell::new(c0, fg, bg));
        self.front.set(col + 1, row, Cell::new(c1, fg, bg));
    }

    /// Draw at a world tile position, if visible.
    fn put_world(&mut self, wx: i32, wy: i32, glyph: (char, char, Color, Color)) {
        if let Some((vx, vy)) = self.camera.world_to_view(wx, wy) {
            self.put_tile(vx, vy, glyph);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::domain::grid::Grid;
    use crate::sim::level::LevelSet;

    fn cam(view_w: usize, view_h: usize) -> Camera {
        Camera { x: 0, y: 0, view_w, view_h }
    }

    #[test]
    fn small_map_is_centered() {
        let mut c = cam(20, 10);
        c.follow(3, 3, 10, 6);
        assert_eq!((c.x, c.y), (-5, -2));
    }

    #[test]
    fn dead_zone_holds_then_scrolls() {
        let mut c = cam(10, 10);
        c.follow(5, 5, 40, 10);
        assert_eq!(c.x, 0);
        // Past the right margin (view 10, margin 2 → scroll once target > 7).
        c.follow(9, 5, 40, 10);
        assert_eq!(c.x, 2);
        // Never past the world edge.
        c.follow(39, 5, 40, 10);
        assert_eq!(c.x, 30);
    }

    #[test]
    fn world_to_view_rejects_offscreen() {
        let c = Camera { x: 4, y: 2, view_w: 5, view_h: 5 };
        assert_eq!(c.world_to_view(4, 2), Some((0, 0)));
        assert_eq!(c.world_to_view(8, 6), Some((4, 4)));
        assert_eq!(c.world_to_view(9, 2), None);
        assert_eq!(c.world_to_view(3, 2), None);
    }

    #[test]
    fn rect_to_tiles() {
        let body = Rect::new(TILE + 4, 0, 2 * TILE, 2 * TILE);
        let tiles: Vec<_> = covered_tiles(&body).collect();
        assert_eq!(tiles, vec![(1, 0), (2, 0), (3, 0), (1, 1), (2, 1), (3, 1)]);
        let aligned: Vec<_> = covered_tiles(&Rect::new(0, 0, TILE, TILE)).collect();
        assert_eq!(aligned, vec![(0, 0)]);
    }

    fn spike_hub() -> Session {
        let hub = Grid::new(&[
            "##########",
            "....^^....",
            "..........",
            "..........",
            "..........",
            "....P.....",
            "..........",
            "##########",
        ])
        .unwrap();
        Session::new(LevelSet::new(hub, vec![]), SimConfig::default())
    }

    #[test]
    fn spike_colour_follows_live_state_across_reset() {
        let mut session = spike_hub();
        let mut r = Renderer::new();
        let required = session.config().progress.required_collectibles;

        let mut killed = false;
        let mut reset = false;
        for _ in 0..120 {
            let events = session.update(1.0 / 60.0);
            r.notify(&events, required);
            if events.contains(&GameEvent::PlayerKilled) {
                killed = true;
                let st = &session.scene().as_play().unwrap().hazards.stalactites[0];
                assert_eq!(st.state, StalactiteState::Falling);
                assert_eq!(spike_color(st.state, false, false), SPIKE_HOT);
            }
            if events.iter().any(|e| matches!(e, GameEvent::SceneReset { .. })) {
                reset = true;
                break;
            }
        }
        assert!(killed && reset);
        assert!(r.flashes.is_empty());
        let st = &session.scene().as_play().unwrap().hazards.stalactites[0];
        assert_eq!(st.state, StalactiteState::Pinned);
        assert_eq!(spike_color(st.state, false, false), SPIKE_IDLE);
    }

    #[test]
    fn reset_drops_flashes_of_the_old_scene() {
        let mut r = Renderer::new();
        r.notify(&[GameEvent::StalactiteTriggered { index: 0 }], 6);
        r.notify(&[GameEvent::StalactiteTriggered { index: 0 }], 6);
        assert_eq!(r.flashes, vec![(0, FLASH_TICKS)]);
        r.notify(&[GameEvent::SceneReset { scene: SceneKind::Hub }], 6);
        assert!(r.flashes.is_empty());
        assert_eq!(r.message, "Start over, the eggs are lost");
    }

    #[test]
    fn banners_track_progress() {
        let key = crate::domain::collectible::GroupKey::new(StageId::Level(2), vec![(1, 1)]);
        let partial = GameEvent::CollectiblePicked { key: key.clone(), total: 2 };
        assert_eq!(banner_for(&partial, 6).as_deref(), Some("Egg clutch 2/6 (Level 2)"));
        let done = GameEvent::CollectiblePicked { key, total: 6 };
        assert!(banner_for(&done, 6).is_some_and(|m| m.starts_with("All 6")));
        assert_eq!(banner_for(&GameEvent::PlayerKilled, 6), None);
    }

    #[test]
    fn level_doors_show_their_number() {
        let (_, c1, _, _) = tile_glyph(Tile::LevelDoor(3));
        assert_eq!(c1, '3');
        assert_eq!(tile_glyph(Tile::Collectible).0, ' ');
    }
}
