//! Procedural level generators: platform scatter, cellular-automata cave,
//! recursive-backtracker maze.
//!
//! All randomness flows through the injected `rng` parameter, so a fixed seed
//! reproduces a level exactly. No ambient RNG is ever consulted.

use rand::Rng;

use crate::grid::TileGrid;
use crate::types::*;

/// Platform level: a ground slab over the bottom fifth of the map (grass top
/// row, dirt below), floating platforms scattered above it, and sand / water
/// decoration around the surface.
///
/// Platform placement is best-effort: each of the `width / 8` platforms gets
/// exactly one random placement attempt and is skipped on overlap, so small
/// or dense maps may end up with fewer platforms than the target.
pub fn platform_map<R: Rng>(width: i32, height: i32, rng: &mut R) -> Result<TileGrid, WorldError> {
    let mut grid = TileGrid::new(width, height, AIR)?;

    let ground_row = (height as f32 * 0.8) as i32;
    for y in ground_row..height {
        for x in 0..width {
            grid.set(x, y, if y == ground_row { GRASS } else { DIRT });
        }
    }

    // Platform rows span the inclusive band [0.3h, 0.7h].
    let row_lo = (height as f32 * 0.3) as i32;
    let row_hi = ((height as f32 * 0.7) as i32).max(row_lo);
    for _ in 0..width / 8 {
        let len = rng.gen_range(3..=8);
        if len > width {
            continue;
        }
        let y = rng.gen_range(row_lo..=row_hi);
        let x = rng.gen_range(0..=width - len);
        // Single attempt, skip on any overlap. No retry.
        if (x..x + len).any(|cx| !grid.is_air(cx, y)) {
            continue;
        }
        for cx in x..x + len {
            grid.set(cx, y, WOOD);
        }
    }

    // Decoration: sand patches replace grass along the surface; shallow water
    // pools sit in the row above it, keeping the ground row itself unbroken.
    let mut x = 0;
    while x < width {
        if grid.get(x, ground_row) == GRASS && rng.gen_bool(0.06) {
            let len = rng.gen_range(2..=4).min(width - x);
            for cx in x..x + len {
                if grid.get(cx, ground_row) == GRASS {
                    grid.set(cx, ground_row, SAND);
                }
            }
            x += len;
        } else if ground_row > 0 && grid.is_air(x, ground_row - 1) && rng.gen_bool(0.04) {
            let len = rng.gen_range(2..=3).min(width - x);
            for cx in x..x + len {
                if grid.is_air(cx, ground_row - 1) {
                    grid.set(cx, ground_row - 1, WATER);
                }
            }
            x += len;
        } else {
            x += 1;
        }
    }

    Ok(grid)
}

/// Cave level: seed the interior with air at 45% probability, smooth with
/// exactly five majority-rule automaton passes, then carve a five-cell
/// entrance centered vertically on each side edge.
pub fn cave_map<R: Rng>(width: i32, height: i32, rng: &mut R) -> Result<TileGrid, WorldError> {
    let mut grid = TileGrid::new(width, height, ROCK)?;

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            if rng.gen_bool(0.45) {
                grid.set(x, y, AIR);
            }
        }
    }

    for _ in 0..5 {
        grid = smooth_pass(&grid);
    }

    // Entrances punch through the untouched rock border, three cells deep.
    let cy = height / 2;
    for y in cy - 2..=cy + 2 {
        for x in 0..3.min(width) {
            if grid.in_bounds(x, y) {
                grid.set(x, y, AIR);
            }
            if grid.in_bounds(width - 1 - x, y) {
                grid.set(width - 1 - x, y, AIR);
            }
        }
    }

    Ok(grid)
}

/// One majority-rule smoothing pass over the interior, 8-neighbor (Moore)
/// neighborhood. Out-of-bounds neighbors count as solid, which `TileGrid`
/// already guarantees by reading edges as `WALL`. A cell with four or more
/// solid neighbors becomes rock; three or fewer, air. The border row/column
/// is left untouched.
pub fn smooth_pass(grid: &TileGrid) -> TileGrid {
    let mut out = grid.clone();
    for y in 1..grid.height() - 1 {
        for x in 1..grid.width() - 1 {
            let mut solid = 0;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if (dx, dy) != (0, 0) && !grid.is_air(x + dx, y + dy) {
                        solid += 1;
                    }
                }
            }
            out.set(x, y, if solid >= 4 { ROCK } else { AIR });
        }
    }
    out
}

/// Maze level: randomized depth-first backtracker over the odd-index
/// sub-lattice (odd cells are room centers, even cells the walls between
/// them). Carving both the chosen neighbor and the wall cell between
/// produces a perfect maze: exactly one simple path between any two rooms.
pub fn maze_map<R: Rng>(width: i32, height: i32, rng: &mut R) -> Result<TileGrid, WorldError> {
    let mut grid = TileGrid::new(width, height, WALL)?;
    if width < 3 || height < 3 {
        return Ok(grid);
    }

    let start = (1, 1);
    grid.set(start.0, start.1, AIR);
    let mut visited = std::collections::HashSet::from([start]);
    let mut stack = vec![start];

    while let Some(&(cx, cy)) = stack.last() {
        let candidates: Vec<(i32, i32)> = [(2, 0), (-2, 0), (0, 2), (0, -2)]
            .iter()
            .map(|(dx, dy)| (cx + dx, cy + dy))
            .filter(|&(nx, ny)| {
                nx >= 1 && ny >= 1 && nx <= width - 2 && ny <= height - 2
                    && !visited.contains(&(nx, ny))
            })
            .collect();

        match candidates.as_slice() {
            [] => {
                stack.pop();
            }
            _ => {
                let (nx, ny) = candidates[rng.gen_range(0..candidates.len())];
                grid.set((cx + nx) / 2, (cy + ny) / 2, AIR);
                grid.set(nx, ny, AIR);
                visited.insert((nx, ny));
                stack.push((nx, ny));
            }
        }
    }

    Ok(grid)
}
