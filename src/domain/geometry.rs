/// Grid → level geometry.
///
/// One pass over the grid produces every typed list a scene needs. The
/// result is immutable for the life of the scene; a new scene re-parses.
///
/// ## Boundary cage
///
/// Three synthetic solids sit just outside the left, right and top edges
/// of the world. There is no bottom cage: falling out of the world is not
/// handled here.

use std::collections::BTreeMap;

use super::grid::Grid;
use super::rect::Rect;
use super::stage::DoorTarget;
use super::tile::{Tile, TILE};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Door {
    pub rect: Rect,
    pub target: DoorTarget,
}

/// A maximal horizontal run of same-kind tiles on one row (inclusive).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Run {
    pub row: usize,
    pub x0: usize,
    pub x1: usize,
}

impl Run {
    pub fn len(&self) -> usize {
        self.x1 - self.x0 + 1
    }
}

#[derive(Clone, Debug)]
pub struct LevelGeometry {
    pub width: usize,
    pub height: usize,
    pub world_w: i32,
    pub world_h: i32,
    /// Ground, platforms and the cage. Hazards are not included.
    pub solids: Vec<Rect>,
    pub doors: Vec<Door>,
    pub lava: Vec<Rect>,
    pub spawn: (i32, i32),
    pub stalactite_anchors: Vec<(usize, usize)>,
    pub stalagmite_bases: Vec<(usize, usize)>,
    pub collectibles: Vec<(usize, usize)>,
}

impl LevelGeometry {
    pub fn parse(grid: &Grid) -> Self {
        let width = grid.width();
        let height = grid.height();
        let world_w = width as i32 * TILE;
        let world_h = height as i32 * TILE;

        let mut geo = LevelGeometry {
            width,
            height,
            world_w,
            world_h,
            solids: vec![],
            doors: vec![],
            lava: vec![],
            spawn: default_spawn(height),
            stalactite_anchors: vec![],
            stalagmite_bases: vec![],
            collectibles: vec![],
        };

        for (x, y, ch) in grid.cells() {
            let rect = tile_rect(x, y);
            let tile = Tile::from_char(ch);
            if tile.is_solid() {
                geo.solids.push(rect);
                continue;
            }
            match tile {
                Tile::HubDoor => geo.doors.push(Door { rect, target: DoorTarget::Hub }),
                Tile::LevelDoor(n) => geo.doors.push(Door { rect, target: DoorTarget::Level(n) }),
                Tile::ExitDoor => geo.doors.push(Door { rect, target: DoorTarget::Exit }),
                Tile::Spawn => geo.spawn = (rect.x, rect.y),
                Tile::StalactiteAnchor => geo.stalactite_anchors.push((x, y)),
                Tile::StalagmiteBase => geo.stalagmite_bases.push((x, y)),
                Tile::Lava => geo.lava.push(rect),
                Tile::Collectible => geo.collectibles.push((x, y)),
                Tile::Ground | Tile::Platform | Tile::Empty => {}
            }
        }

        geo.solids.extend(cage(world_w, world_h));
        geo
    }
}

/// Pixel rect of the tile at (x, y).
pub fn tile_rect(x: usize, y: usize) -> Rect {
    Rect::new(x as i32 * TILE, y as i32 * TILE, TILE, TILE)
}

/// Spawn used when the grid has no spawn marker.
pub fn default_spawn(height: usize) -> (i32, i32) {
    (2 * TILE, (height as i32 - 3) * TILE)
}

fn cage(world_w: i32, world_h: i32) -> [Rect; 3] {
    [
        Rect::new(-TILE, 0, TILE, world_h),
        Rect::new(world_w, 0, TILE, world_h),
        Rect::new(0, -TILE, world_w, TILE),
    ]
}

/// Merge tile points into maximal horizontal runs, row by row.
///
/// Points are grouped per row, columns sorted, then split wherever two
/// neighbours are not consecutive. Runs never span rows. Output is
/// ordered by row, then by starting column.
pub fn contiguous_runs(points: &[(usize, usize)]) -> Vec<Run> {
    let mut by_row: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for &(x, y) in points {
        by_row.entry(y).or_default().push(x);
    }

    let mut runs = vec![];
    for (row, mut xs) in by_row {
        xs.sort_unstable();
        xs.dedup();
        let mut start = xs[0];
        let mut prev = xs[0];
        for &x in &xs[1..] {
            if x == prev + 1 {
                prev = x;
            } else {
                runs.push(Run { row, x0: start, x1: prev });
                start = x;
                prev = x;
            }
        }
        runs.push(Run { row, x0: start, x1: prev });
    }
    runs
}
