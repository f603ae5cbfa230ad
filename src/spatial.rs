use glam::Vec2;

use std::collections::{HashMap, HashSet};

use crate::types::BodyKey;

/// Uniform-bucket spatial index for broad-phase proximity queries on dynamic
/// bodies. Fully rebuilt each tick: `clear` once, then `insert` every body.
/// Nothing is carried over between ticks.
pub struct SpatialGrid {
    cell_size: f32,
    // cell coord -> keys of bodies whose bounds overlap that cell
    buckets: HashMap<(i32, i32), Vec<BodyKey>>,
    entries: usize,
}

/// Occupancy snapshot for debugging and perf inspection.
#[derive(Copy, Clone, Debug, Default)]
pub struct SpatialStats {
    pub entries: usize,
    pub buckets: usize,
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new(64.0)
    }
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(1e-5),
            buckets: HashMap::new(),
            entries: 0,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Drop all buckets. Must run exactly once per tick before any insert.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.entries = 0;
    }

    /// Insert a body's key into every bucket its bounds overlap. A body
    /// straddling cell boundaries appears in multiple buckets; queries
    /// de-duplicate.
    pub fn insert(&mut self, key: BodyKey, min: Vec2, max: Vec2) {
        let (ix0, iy0) = self.cell_of(min);
        let (ix1, iy1) = self.cell_of(max);
        for iy in iy0..=iy1 {
            for ix in ix0..=ix1 {
                self.buckets.entry((ix, iy)).or_default().push(key);
            }
        }
        self.entries += 1;
    }

    /// Union of the buckets covering the square of half-width `radius` around
    /// `center`, de-duplicated. Cost scales with local density, not total
    /// body count.
    pub fn get_nearby(&self, center: Vec2, radius: f32) -> Vec<BodyKey> {
        let r = radius.max(0.0);
        let (ix0, iy0) = self.cell_of(center - Vec2::splat(r));
        let (ix1, iy1) = self.cell_of(center + Vec2::splat(r));
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for iy in iy0..=iy1 {
            for ix in ix0..=ix1 {
                if let Some(list) = self.buckets.get(&(ix, iy)) {
                    for &key in list {
                        if seen.insert(key) {
                            out.push(key);
                        }
                    }
                }
            }
        }
        out
    }

    pub fn stats(&self) -> SpatialStats {
        SpatialStats {
            entries: self.entries,
            buckets: self.buckets.len(),
        }
    }

    fn cell_of(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }
}
