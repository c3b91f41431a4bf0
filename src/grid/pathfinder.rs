//! A* search over the routing grid.
//!
//! The grid is small and bounded, so the frontier is a plain vector scanned
//! for the minimum `f` each step; a binary heap buys nothing at this size.

use std::collections::HashSet;

use crate::geometry::GridPosition;
use crate::grid::GridIndex;
use crate::routing::RoutingStyle;

const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Grid-constrained A* pathfinder.
///
/// Owns the [`GridIndex`] whose obstacle state persists across searches;
/// the per-cell `g`/`h`/`f`/`parent` scratch fields are reset on every call.
#[derive(Debug, Default)]
pub struct PathFinder {
    grid: GridIndex,
}

impl PathFinder {
    /// Create a pathfinder over a fresh grid.
    pub fn new() -> Self {
        Self {
            grid: GridIndex::new(),
        }
    }

    /// Shared access to the underlying grid.
    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    /// Mutable access to the underlying grid, for obstacle and clearance
    /// registration.
    pub fn grid_mut(&mut self) -> &mut GridIndex {
        &mut self.grid
    }

    /// Find a path from `start` to `end` inclusive.
    ///
    /// Returns `None` without searching when either endpoint is out of
    /// bounds or its cell is occupied, and `None` after exhausting the
    /// frontier when the goal is unreachable. Never panics.
    ///
    /// With [`RoutingStyle::Direct`] the four diagonal neighbors are also
    /// expanded; the Manhattan heuristic is then only approximately
    /// admissible, which is acceptable for wire aesthetics.
    pub fn find_path(
        &mut self,
        start: GridPosition,
        end: GridPosition,
        style: RoutingStyle,
    ) -> Option<Vec<GridPosition>> {
        if !self.grid.in_bounds(start) || !self.grid.in_bounds(end) {
            return None;
        }
        if self.grid.is_blocked(start) || self.grid.is_blocked(end) {
            return None;
        }

        self.grid.reset_search_state();

        let mut open: Vec<GridPosition> = Vec::new();
        let mut closed: HashSet<GridPosition> = HashSet::new();

        {
            let h = start.manhattan_distance(end) as f64;
            let node = self.grid.node_mut(start);
            node.g = 0.0;
            node.h = h;
            node.f = h;
            node.parent = None;
        }
        open.push(start);

        while !open.is_empty() {
            let mut best = 0;
            for i in 1..open.len() {
                let fi = self.grid.node(open[i]).map(|n| n.f).unwrap_or(f64::MAX);
                let fb = self.grid.node(open[best]).map(|n| n.f).unwrap_or(f64::MAX);
                if fi < fb {
                    best = i;
                }
            }
            let current = open.swap_remove(best);

            if current == end {
                return Some(self.reconstruct_path(end));
            }
            closed.insert(current);

            let current_g = self.grid.node(current).map(|n| n.g).unwrap_or(0.0);

            for neighbor in Self::neighbors(current, style) {
                if closed.contains(&neighbor) {
                    continue;
                }
                if self.grid.is_blocked(neighbor) || self.grid.is_within_clearance(neighbor) {
                    continue;
                }

                // Unit step cost regardless of direction
                let tentative_g = current_g + 1.0;
                let already_open = open.contains(&neighbor);
                let h = neighbor.manhattan_distance(end) as f64;
                let node = self.grid.node_mut(neighbor);

                if !already_open {
                    node.g = tentative_g;
                    node.h = h;
                    node.f = tentative_g + h;
                    node.parent = Some(current);
                    open.push(neighbor);
                } else if tentative_g < node.g {
                    node.g = tentative_g;
                    node.f = tentative_g + node.h;
                    node.parent = Some(current);
                }
            }
        }

        None
    }

    /// Greedy line-of-sight smoothing over a raw cell path.
    ///
    /// Each kept vertex is extended as far forward as a rasterized
    /// line-of-sight check allows; a shortcut is rejected if its line
    /// crosses any occupied or clearance cell. The result may contain
    /// non-axis-aligned hops, which the segment builder decomposes before
    /// anything is emitted.
    pub fn smooth_path(&self, path: &[GridPosition]) -> Vec<GridPosition> {
        if path.len() <= 2 {
            return path.to_vec();
        }

        let mut smoothed = vec![path[0]];
        let mut anchor = 0;
        while anchor < path.len() - 1 {
            let mut probe = path.len() - 1;
            while probe > anchor + 1 && !self.line_is_clear(path[anchor], path[probe]) {
                probe -= 1;
            }
            smoothed.push(path[probe]);
            anchor = probe;
        }
        smoothed
    }

    /// Rasterize the line between two cells (Bresenham) and confirm no cell
    /// on it is occupied or inside a clearance zone.
    fn line_is_clear(&self, from: GridPosition, to: GridPosition) -> bool {
        for cell in Self::line_cells(from, to) {
            if self.grid.is_blocked(cell) || self.grid.is_within_clearance(cell) {
                return false;
            }
        }
        true
    }

    /// Integer line rasterization between two cells, inclusive.
    fn line_cells(from: GridPosition, to: GridPosition) -> Vec<GridPosition> {
        let mut cells = Vec::new();
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (from.x, from.y);

        loop {
            cells.push(GridPosition::new(x, y));
            if x == to.x && y == to.y {
                break;
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
        cells
    }

    fn neighbors(pos: GridPosition, style: RoutingStyle) -> Vec<GridPosition> {
        let mut result: Vec<GridPosition> = ORTHOGONAL
            .iter()
            .map(|(dx, dy)| GridPosition::new(pos.x + dx, pos.y + dy))
            .collect();
        if style == RoutingStyle::Direct {
            result.extend(
                DIAGONAL
                    .iter()
                    .map(|(dx, dy)| GridPosition::new(pos.x + dx, pos.y + dy)),
            );
        }
        result
    }

    fn reconstruct_path(&self, end: GridPosition) -> Vec<GridPosition> {
        let mut path = Vec::new();
        let mut cursor = Some(end);
        while let Some(pos) = cursor {
            path.push(pos);
            cursor = self.grid.node(pos).and_then(|n| n.parent);
        }
        path.reverse();
        path
    }
}
