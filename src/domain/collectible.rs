/// Collectible groups and the global progress ledger.
///
/// Collectible tiles are partitioned into maximal 4-connected groups; one
/// group is one pickup. A group is identified by its stage plus its sorted
/// tile coordinates, so the same cluster always yields the same key no
/// matter how often the stage is rebuilt.

use std::collections::{BTreeSet, HashSet, VecDeque};

use super::geometry::tile_rect;
use super::rect::Rect;
use super::stage::StageId;

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct GroupKey {
    stage: StageId,
    tiles: Vec<(usize, usize)>,
}

impl GroupKey {
    pub fn new(stage: StageId, mut tiles: Vec<(usize, usize)>) -> Self {
        tiles.sort_unstable();
        GroupKey { stage, tiles }
    }

    pub fn stage(&self) -> StageId {
        self.stage
    }
}

#[derive(Clone, Debug)]
pub struct CollectibleGroup {
    pub key: GroupKey,
    /// Display only.
    pub bounds: Rect,
    /// Pickup hit rects, one per tile.
    pub tiles: Vec<Rect>,
}

impl CollectibleGroup {
    fn new(stage: StageId, coords: Vec<(usize, usize)>) -> Self {
        let tiles: Vec<Rect> = coords.iter().map(|&(x, y)| tile_rect(x, y)).collect();
        let bounds = tiles.iter().skip(1).fold(tiles[0], |acc, r| acc.union(r));
        CollectibleGroup { key: GroupKey::new(stage, coords), bounds, tiles }
    }

    pub fn touches(&self, body: &Rect) -> bool {
        self.tiles.iter().any(|t| t.overlaps(body))
    }
}

/// Partition tiles into 4-connected components (BFS flood fill).
/// Components come out in order of their smallest tile.
pub fn group_tiles(coords: &[(usize, usize)]) -> Vec<Vec<(usize, usize)>> {
    let mut remaining: BTreeSet<(usize, usize)> = coords.iter().copied().collect();
    let mut groups = vec![];

    while let Some(start) = remaining.pop_first() {
        let mut group = vec![start];
        let mut queue = VecDeque::from([start]);

        while let Some((x, y)) = queue.pop_front() {
            let neighbours = [
                (x.wrapping_sub(1), y),
                (x + 1, y),
                (x, y.wrapping_sub(1)),
                (x, y + 1),
            ];
            for n in neighbours {
                if remaining.remove(&n) {
                    group.push(n);
                    queue.push_back(n);
                }
            }
        }

        group.sort_unstable();
        groups.push(group);
    }
    groups
}

/// Process-lifetime record of collected groups.
#[derive(Clone, Debug, Default)]
pub struct ProgressLedger {
    collected: HashSet<GroupKey>,
    count: usize,
}

impl ProgressLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &GroupKey) -> bool {
        self.collected.contains(key)
    }

    /// Record a pickup. Returns false (and counts nothing) if the key was
    /// already recorded.
    pub fn record(&mut self, key: GroupKey) -> bool {
        if self.collected.contains(&key) {
            return false;
        }
        self.collected.insert(key);
        self.count += 1;
        true
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn clear(&mut self) {
        self.collected.clear();
        self.count = 0;
    }
}

/// Groups still on offer in the current scene.
#[derive(Clone, Debug, Default)]
pub struct Collectibles {
    pub groups: Vec<CollectibleGroup>,
}

impl Collectibles {
    /// Build the groups for a freshly entered stage, leaving out any group
    /// the ledger already holds.
    pub fn build(stage: StageId, coords: &[(usize, usize)], ledger: &ProgressLedger) -> Self {
        let groups = group_tiles(coords)
            .into_iter()
            .map(|g| CollectibleGroup::new(stage, g))
            .filter(|g| !ledger.contains(&g.key))
            .collect();
        Collectibles { groups }
    }

    /// Remove every group the body touches. Returns the keys that were
    /// newly recorded in the ledger.
    pub fn collect(&mut self, body: &Rect, ledger: &mut ProgressLedger) -> Vec<GroupKey> {
        let mut picked = vec![];
        self.groups.retain(|g| {
            if !g.touches(body) {
                return true;
            }
            if ledger.record(g.key.clone()) {
                picked.push(g.key.clone());
            }
            false
        });
        picked
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
