/// Level data: the hub, the numbered levels and the difficulty ramp.
///
/// ## Sources (priority order):
///   1. `levels/hub.txt`, `levels/level1.txt`, `levels/level2.txt`, …
///   2. Built-in embedded grids
///
/// Every grid is validated when the set is loaded, so a bad file stops
/// the game before the terminal is taken over.
///
/// ## Tile legend:
///   '#' = Ground                 '=' = Platform
///   'D' = Door to hub            '1'-'9' = Door to level n
///   'E' = Exit door              'P' = Spawn
///   '^' = Stalactite anchor      'v' = Stalagmite base
///   '~' = Lava                   '*' = Collectible
///   anything else = Empty
///
/// ## Difficulty ramp
///
/// The hard level gets lava poured into its two rows above the floor
/// line (`h-2`, `h-3`), from `ramp_start_col` rightwards, `ramp_step`
/// tiles per recorded death. Only empty cells turn to lava. Door columns
/// and the columns the body occupies at spawn (the default spawn when the
/// grid has no `P`) are never touched. The base grid is never mutated.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::ProgressConfig;
use crate::domain::entity::BODY_SIZE;
use crate::domain::geometry::default_spawn;
use crate::domain::grid::{Grid, GridError};
use crate::domain::stage::StageId;
use crate::domain::tile::{Tile, LAVA_CHAR, TILE};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("bad grid in {name}: {source}")]
    Grid {
        name: String,
        #[source]
        source: GridError,
    },
}

#[derive(Clone, Debug)]
pub struct LevelSet {
    hub: Grid,
    levels: BTreeMap<u8, Grid>,
}

impl LevelSet {
    pub fn new(hub: Grid, levels: impl IntoIterator<Item = (u8, Grid)>) -> Self {
        LevelSet { hub, levels: levels.into_iter().collect() }
    }

    /// Built-in grids only.
    pub fn embedded() -> Result<Self, LevelError> {
        let hub = embedded_grid("hub", HUB)?;
        let mut levels = BTreeMap::new();
        for (id, rows) in [(1u8, LEVEL1), (2, LEVEL2), (3, LEVEL3)] {
            levels.insert(id, embedded_grid(&format!("level{id}"), rows)?);
        }
        Ok(LevelSet::new(hub, levels))
    }

    /// Embedded grids, overridden by any matching file in `dir`.
    pub fn load(dir: &Path) -> Result<Self, LevelError> {
        let mut set = Self::embedded()?;
        if !dir.is_dir() {
            return Ok(set);
        }

        if let Some(grid) = load_file(&dir.join("hub.txt"))? {
            tracing::info!("hub loaded from {}", dir.display());
            set.hub = grid;
        }
        for id in 1..=9u8 {
            if let Some(grid) = load_file(&dir.join(format!("level{id}.txt")))? {
                tracing::info!("level {id} loaded from {}", dir.display());
                set.levels.insert(id, grid);
            }
        }
        Ok(set)
    }

    pub fn hub(&self) -> &Grid {
        &self.hub
    }

    pub fn has_level(&self, id: u8) -> bool {
        self.levels.contains_key(&id)
    }

    pub fn level_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.levels.keys().copied()
    }

    /// Grid for a stage, with the difficulty ramp applied to the hard
    /// level. Always a fresh copy.
    pub fn grid_for(&self, stage: StageId, difficulty: u32, progress: &ProgressConfig) -> Option<Grid> {
        match stage {
            StageId::Hub => Some(self.hub.clone()),
            StageId::Level(id) => {
                let base = self.levels.get(&id)?;
                if id == progress.hard_level {
                    Some(apply_difficulty_ramp(base, difficulty, progress))
                } else {
                    Some(base.clone())
                }
            }
        }
    }
}

/// Pour lava into the hard level's bottom lanes. Pure: the same counter
/// always yields the same grid, and counter 0 yields `base` unchanged.
pub fn apply_difficulty_ramp(base: &Grid, counter: u32, progress: &ProgressConfig) -> Grid {
    let mut grid = base.clone();
    let len = (counter as usize).saturating_mul(progress.ramp_step);
    if len == 0 {
        return grid;
    }

    let mut reserved = BTreeSet::new();
    let mut spawn_xs = vec![];
    for (x, y, _) in base.cells() {
        match base.tile_at(x, y) {
            t if t.is_door() => {
                reserved.insert(x);
            }
            Tile::Spawn => spawn_xs.push(x as i32 * TILE),
            _ => {}
        }
    }
    if spawn_xs.is_empty() {
        spawn_xs.push(default_spawn(base.height()).0);
    }
    // Every column the body covers where it appears.
    for sx in spawn_xs {
        let first = (sx / TILE) as usize;
        let last = ((sx + BODY_SIZE - 1) / TILE) as usize;
        reserved.extend(first..=last);
    }

    let h = base.height();
    let rows = [h.checked_sub(2), h.checked_sub(3)];
    let end = progress.ramp_start_col.saturating_add(len).min(base.width());

    for row in rows.into_iter().flatten() {
        for x in progress.ramp_start_col..end {
            if reserved.contains(&x) {
                continue;
            }
            if base.tile_at(x, row).is_empty() {
                grid.set_char(x, row, LAVA_CHAR);
            }
        }
    }
    grid
}

fn embedded_grid(name: &str, rows: &[&str]) -> Result<Grid, LevelError> {
    Grid::new(rows).map_err(|source| LevelError::Grid { name: name.to_string(), source })
}

/// Read one level file. `Ok(None)` if it does not exist.
fn load_file(path: &Path) -> Result<Option<Grid>, LevelError> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .map_err(|source| LevelError::Io { path: path.to_path_buf(), source })?;
    parse_grid_text(&content)
        .map(Some)
        .map_err(|source| LevelError::Grid { name: path.display().to_string(), source })
}

/// One grid row per line. Trailing blank lines are dropped; blank lines
/// inside the grid are kept so they are reported as malformed.
fn parse_grid_text(content: &str) -> Result<Grid, GridError> {
    let mut rows: Vec<&str> = content.lines().map(|l| l.trim_end_matches('\r')).collect();
    while rows.last().is_some_and(|l| l.is_empty()) {
        rows.pop();
    }
    Grid::new(&rows)
}

// ══════════════════════════════════════════════════════════════
// Embedded grids
// ══════════════════════════════════════════════════════════════

const HUB: &[&str] = &[
    "########################################",
    ".............................^^.........",
    "........................................",
    "........................................",
    "........................................",
    "........................................",
    "........................................",
    "........................................",
    "........................................",
    "....................====................",
    "........................................",
    "........................................",
    "..P.....................................",
    "........1...............2.........3.....",
    "################~~~~####################",
];

const LEVEL1: &[&str] = &[
    "########################################",
    "...............^^...........^...........",
    "........................................",
    "........................................",
    "........................................",
    ".....................**.................",
    "....................=====...............",
    "........................................",
    "........................................",
    "........................................",
    ".............====...........====.....*..",
    ".....................................*..",
    ".P......................................",
    "...D..........v.......v..............*..",
    "########################################",
];

const LEVEL2: &[&str] = &[
    "########################################",
    "........................................",
    "........................................",
    "..............................**........",
    "........................................",
    "..........................=======.......",
    "........................................",
    "........................................",
    "..................=====.................",
    "........................................",
    "........................................",
    ".........=====..........................",
    ".P......................................",
    "..................v.................D...",
    "##########~~~~##########################",
];

const LEVEL3: &[&str] = &[
    "########################################",
    "........................^^^.............",
    "........................................",
    "........................................",
    "........................................",
    "........................................",
    "...........*............................",
    "..........===...........................",
    "........................................",
    "........................................",
    "......====..................====........",
    "........................................",
    ".P......................................",
    "...D...........v............*......E....",
    "##########################~~~###########",
];
