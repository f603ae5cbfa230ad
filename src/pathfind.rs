//! Grid pathfinding: A* over tile coordinates plus a line-of-sight path
//! simplifier.
//!
//! Traversability is deliberately strict: a cell is passable iff its tile id
//! is `AIR`. The tile's `collision` property is not consulted, so non-air,
//! non-solid tiles (water, decoration) block pathing.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::grid::TileGrid;
use crate::types::AIR;

/// Grid coordinate used by path queries.
pub type Coord = (i32, i32);

const ORTHO: [Coord; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAG: [Coord; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// A* from `start` to `end` with uniform step cost 1 and a binary-heap open
/// set. Heuristic is Manhattan distance, or Chebyshev when `allow_diagonal`.
///
/// Returns the full coordinate sequence including both endpoints. An empty
/// vec means "no path" (endpoints out of bounds, blocked, or disconnected) —
/// a normal outcome, not an error.
pub fn find_path(grid: &TileGrid, start: Coord, end: Coord, allow_diagonal: bool) -> Vec<Coord> {
    if !grid.is_air(start.0, start.1) || !grid.is_air(end.0, end.1) {
        return Vec::new();
    }
    if start == end {
        return vec![start];
    }

    let h = |c: Coord| -> i32 {
        let dx = (c.0 - end.0).abs();
        let dy = (c.1 - end.1).abs();
        if allow_diagonal { dx.max(dy) } else { dx + dy }
    };

    let mut steps: Vec<Coord> = ORTHO.to_vec();
    if allow_diagonal {
        steps.extend(DIAG);
    }

    // Min-heap on f; g_score doubles as the visited map.
    let mut open: BinaryHeap<Reverse<(i32, Coord)>> = BinaryHeap::new();
    let mut g_score: HashMap<Coord, i32> = HashMap::from([(start, 0)]);
    let mut came_from: HashMap<Coord, Coord> = HashMap::new();
    open.push(Reverse((h(start), start)));

    while let Some(Reverse((f, current))) = open.pop() {
        let g = g_score[&current];
        if f > g + h(current) {
            continue; // stale heap entry, a better route already popped
        }
        if current == end {
            return reconstruct(&came_from, end);
        }
        for &(dx, dy) in &steps {
            let next = (current.0 + dx, current.1 + dy);
            if !grid.is_air(next.0, next.1) {
                continue;
            }
            let tentative = g + 1;
            if g_score.get(&next).is_none_or(|&best| tentative < best) {
                g_score.insert(next, tentative);
                came_from.insert(next, current);
                open.push(Reverse((tentative + h(next), next)));
            }
        }
    }
    Vec::new()
}

fn reconstruct(came_from: &HashMap<Coord, Coord>, end: Coord) -> Vec<Coord> {
    let mut path = vec![end];
    let mut cur = end;
    while let Some(&prev) = came_from.get(&cur) {
        path.push(prev);
        cur = prev;
    }
    path.reverse();
    path
}

/// Greedy line-of-sight reduction: from the current anchor, advance to the
/// farthest waypoint still reachable over air along a straight tile line,
/// repeat until the end. Output is a subsequence of the input with first and
/// last waypoints preserved.
pub fn simplify_path(grid: &TileGrid, path: &[Coord]) -> Vec<Coord> {
    if path.len() <= 2 {
        return path.to_vec();
    }
    let mut out = vec![path[0]];
    let mut anchor = 0;
    while anchor < path.len() - 1 {
        let mut farthest = anchor + 1;
        for j in anchor + 2..path.len() {
            if line_is_clear(grid, path[anchor], path[j]) {
                farthest = j;
            }
        }
        out.push(path[farthest]);
        anchor = farthest;
    }
    out
}

/// Bresenham rasterization of the segment; clear iff every covered cell is
/// air. Any non-air tile on the line is an obstruction.
pub fn line_is_clear(grid: &TileGrid, from: Coord, to: Coord) -> bool {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if to.0 > x { 1 } else { -1 };
    let sy = if to.1 > y { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        if grid.get(x, y) != AIR {
            return false;
        }
        if (x, y) == to {
            return true;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn open_grid(w: i32, h: i32) -> TileGrid {
        TileGrid::new(w, h, AIR).unwrap()
    }

    #[test]
    fn test_astar_exact_length_on_open_grid() {
        let g = open_grid(10, 10);
        let path = find_path(&g, (0, 0), (9, 9), false);
        // Manhattan distance 18, inclusive of both endpoints.
        assert_eq!(path.len(), 19);
        assert_eq!(path.first(), Some(&(0, 0)));
        assert_eq!(path.last(), Some(&(9, 9)));
        for pair in path.windows(2) {
            let (dx, dy) = (pair[1].0 - pair[0].0, pair[1].1 - pair[0].1);
            assert_eq!(dx.abs() + dy.abs(), 1, "non-orthogonal step {pair:?}");
        }
    }

    #[test]
    fn test_astar_diagonal_is_shorter() {
        let g = open_grid(10, 10);
        let path = find_path(&g, (0, 0), (9, 9), true);
        assert_eq!(path.len(), 10);
    }

    #[test]
    fn test_enclosed_target_yields_empty_path() {
        let mut g = open_grid(10, 10);
        for (x, y) in [(4, 4), (5, 4), (6, 4), (4, 5), (6, 5), (4, 6), (5, 6), (6, 6)] {
            g.set(x, y, STONE);
        }
        assert!(find_path(&g, (0, 0), (5, 5), false).is_empty());
        assert!(find_path(&g, (0, 0), (5, 5), true).is_empty());
    }

    #[test]
    fn test_out_of_bounds_endpoints_yield_empty_path() {
        let g = open_grid(5, 5);
        assert!(find_path(&g, (-1, 0), (4, 4), false).is_empty());
        assert!(find_path(&g, (0, 0), (5, 5), false).is_empty());
    }

    #[test]
    fn test_non_air_tiles_block_pathing() {
        // Water is collision:false but still blocks pathing: only tile id 0
        // is passable.
        let mut g = open_grid(5, 1);
        g.set(2, 0, WATER);
        assert!(find_path(&g, (0, 0), (4, 0), false).is_empty());
    }

    #[test]
    fn test_routes_around_a_wall() {
        let mut g = open_grid(7, 7);
        for y in 0..6 {
            g.set(3, y, WALL);
        }
        let path = find_path(&g, (0, 0), (6, 0), false);
        assert!(!path.is_empty());
        assert!(path.contains(&(3, 6)), "must go around the wall gap");
        assert!(path.iter().all(|&(x, y)| g.is_air(x, y)));
    }

    #[test]
    fn test_simplify_straight_corridor() {
        let g = open_grid(10, 10);
        let path = find_path(&g, (0, 5), (9, 5), false);
        let simple = simplify_path(&g, &path);
        assert_eq!(simple, vec![(0, 5), (9, 5)]);
    }

    #[test]
    fn test_simplify_contract() {
        let mut g = open_grid(12, 12);
        for y in 0..11 {
            g.set(5, y, WALL);
        }
        let path = find_path(&g, (0, 0), (11, 0), false);
        let simple = simplify_path(&g, &path);

        assert!(simple.len() <= path.len());
        assert_eq!(simple.first(), path.first());
        assert_eq!(simple.last(), path.last());
        // Subsequence of the input.
        let mut idx = 0;
        for wp in &simple {
            idx += path[idx..]
                .iter()
                .position(|p| p == wp)
                .expect("simplified waypoint not in original order");
        }
        // Every straight segment between consecutive waypoints is air.
        for pair in simple.windows(2) {
            assert!(line_is_clear(&g, pair[0], pair[1]));
        }
    }
}
