use std::collections::HashSet;

use crate::types::*;

/// Row-major tile grid with fixed dimensions for the life of a session.
///
/// Out-of-bounds reads return `WALL` so map edges behave like solid rock;
/// `set` is the single mutation point (tile breaking routes through it).
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    width: i32,
    height: i32,
    cells: Vec<TileId>,
}

impl TileGrid {
    /// Create a grid filled with `fill`. Non-positive dimensions are rejected
    /// outright; no partial grid is ever returned.
    pub fn new(width: i32, height: i32, fill: TileId) -> Result<Self, WorldError> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![fill; (width * height) as usize],
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Tile at `(x, y)`; out-of-bounds reads as solid `WALL`.
    pub fn get(&self, x: i32, y: i32) -> TileId {
        if !self.in_bounds(x, y) {
            return WALL;
        }
        self.cells[(y * self.width + x) as usize]
    }

    /// The single mutation point. Out-of-bounds writes are programmer errors;
    /// they fail loudly in debug builds and are ignored in release.
    pub fn set(&mut self, x: i32, y: i32, id: TileId) {
        debug_assert!(self.in_bounds(x, y), "set({x}, {y}) out of bounds");
        if self.in_bounds(x, y) {
            self.cells[(y * self.width + x) as usize] = id;
        }
    }

    pub fn is_air(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == AIR
    }

    /// Count of cells holding `id`.
    pub fn count(&self, id: TileId) -> usize {
        self.cells.iter().filter(|&&c| c == id).count()
    }

    /// All air cells 4-connected to `start`. Empty set if `start` is not air.
    pub fn flood_fill_air(&self, start: (i32, i32)) -> HashSet<(i32, i32)> {
        let mut seen = HashSet::new();
        if !self.is_air(start.0, start.1) {
            return seen;
        }
        let mut stack = vec![start];
        seen.insert(start);
        while let Some((x, y)) = stack.pop() {
            for (nx, ny) in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
                if self.is_air(nx, ny) && seen.insert((nx, ny)) {
                    stack.push((nx, ny));
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_dimensions() {
        assert_eq!(
            TileGrid::new(0, 10, AIR),
            Err(WorldError::InvalidDimension {
                width: 0,
                height: 10
            })
        );
        assert!(TileGrid::new(5, -1, AIR).is_err());
    }

    #[test]
    fn test_out_of_bounds_reads_solid() {
        let g = TileGrid::new(4, 4, AIR).unwrap();
        assert_eq!(g.get(-1, 0), WALL);
        assert_eq!(g.get(0, 4), WALL);
        assert!(!g.is_air(4, 4));
    }

    #[test]
    fn test_set_get_roundtrip() {
        let mut g = TileGrid::new(3, 3, AIR).unwrap();
        g.set(2, 1, STONE);
        assert_eq!(g.get(2, 1), STONE);
        assert_eq!(g.count(STONE), 1);
    }

    #[test]
    fn test_flood_fill_respects_walls() {
        let mut g = TileGrid::new(5, 1, AIR).unwrap();
        g.set(2, 0, WALL);
        let left = g.flood_fill_air((0, 0));
        assert_eq!(left, HashSet::from([(0, 0), (1, 0)]));
        assert!(g.flood_fill_air((2, 0)).is_empty());
    }
}
