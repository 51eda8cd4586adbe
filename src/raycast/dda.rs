use glam::{DVec2, IVec2};
use tracing::debug;

use crate::grid::WorldMap;
use crate::raycast::utils::{axis_params, floor_cell, fract_floor};
use crate::raycast::{Axis, DdaStep, RayHit, RayTrace};
use crate::types::SIMPLE_MAX_STEPS;

/// Scratch state for a single grid traversal.
#[derive(Debug, Clone)]
struct DdaState {
    cell: IVec2,
    step: IVec2,
    delta_dist: DVec2,
    side_dist: DVec2,
    side: Axis,
}

impl DdaState {
    fn new(origin: DVec2, dir: DVec2) -> Self {
        let cell = floor_cell(origin);
        let (step_x, delta_x, side_x) = axis_params(origin.x, cell.x, dir.x);
        let (step_y, delta_y, side_y) = axis_params(origin.y, cell.y, dir.y);

        Self {
            cell,
            step: IVec2::new(step_x, step_y),
            delta_dist: DVec2::new(delta_x, delta_y),
            side_dist: DVec2::new(side_x, side_y),
            side: Axis::X,
        }
    }

    /// Cross the nearer grid line. Ties go to the y-axis.
    ///
    /// Cell indices saturate at the `i32` range, so far-away origins stop
    /// moving instead of overflowing.
    fn advance(&mut self) -> Axis {
        self.side = if self.side_dist.x < self.side_dist.y {
            self.side_dist.x += self.delta_dist.x;
            self.cell.x = self.cell.x.saturating_add(self.step.x);
            Axis::X
        } else {
            self.side_dist.y += self.delta_dist.y;
            self.cell.y = self.cell.y.saturating_add(self.step.y);
            Axis::Y
        };
        self.side
    }

    fn perp_wall_dist(&self) -> f64 {
        match self.side {
            Axis::X => self.side_dist.x - self.delta_dist.x,
            Axis::Y => self.side_dist.y - self.delta_dist.y,
        }
    }
}

/// Step through the grid until a wall cell is entered or `max_steps` runs out.
/// Cells outside the grid are walked through like open ones.
fn traverse(
    grid: &WorldMap,
    state: &mut DdaState,
    max_steps: usize,
    mut on_step: impl FnMut(DdaStep),
) -> bool {
    for i in 0..max_steps {
        let took = state.advance();
        on_step(DdaStep {
            i,
            map: state.cell,
            side_dist: state.side_dist,
            took,
        });

        if grid.is_wall(state.cell.x, state.cell.y) {
            return true;
        }
    }

    debug!(
        max_steps,
        cell = ?state.cell,
        "ray exhausted its step budget without hitting a wall"
    );
    false
}

/// Find the first wall along a ray using the render step budget.
///
/// `origin` is in grid units; `dir` need not be normalized but must be
/// non-zero. A miss is reported through `hit`, never as an error.
pub fn cast_ray(grid: &WorldMap, origin: DVec2, dir: DVec2) -> RayHit {
    cast_ray_with_limit(grid, origin, dir, SIMPLE_MAX_STEPS)
}

/// [`cast_ray`] with an explicit step budget.
pub fn cast_ray_with_limit(grid: &WorldMap, origin: DVec2, dir: DVec2, max_steps: usize) -> RayHit {
    let mut state = DdaState::new(origin, dir);
    let hit = traverse(grid, &mut state, max_steps, |_| {});

    RayHit {
        dist: state.perp_wall_dist(),
        side: state.side,
        map: state.cell,
        ray_dir: dir,
        hit,
    }
}

/// Same traversal as [`cast_ray`], recording every step and the texture
/// coordinate of the hit.
pub fn cast_ray_detailed(grid: &WorldMap, origin: DVec2, dir: DVec2, max_steps: usize) -> RayTrace {
    let mut state = DdaState::new(origin, dir);
    let side_dist0 = state.side_dist;

    let mut steps = Vec::new();
    let hit = traverse(grid, &mut state, max_steps, |step| steps.push(step));

    let perp_wall_dist = state.perp_wall_dist();
    let along_wall = match state.side {
        Axis::X => origin.y + perp_wall_dist * dir.y,
        Axis::Y => origin.x + perp_wall_dist * dir.x,
    };

    RayTrace {
        origin,
        ray_dir: dir,
        hit,
        side: state.side,
        map: state.cell,
        step: state.step,
        delta_dist: state.delta_dist,
        side_dist0,
        perp_wall_dist,
        wall_x: fract_floor(along_wall),
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DEFAULT_MAX_STEPS, DELTA_DIST_SENTINEL, OPEN, WALL};

    fn room(width: u32, height: u32) -> WorldMap {
        let mut data = vec![OPEN; (width * height) as usize];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    data[(y * width + x) as usize] = WALL;
                }
            }
        }
        WorldMap::new(width, height, data).expect("room should build")
    }

    #[test]
    fn demo_map_east_from_centre() {
        let grid = WorldMap::demo();
        let hit = cast_ray(&grid, DVec2::new(3.5, 3.5), DVec2::new(1.0, 0.0));

        assert!(hit.hit);
        assert_eq!(hit.map, IVec2::new(7, 3));
        assert_eq!(hit.side, Axis::X);
        assert_eq!(hit.side.side(), 0);
        assert_eq!(hit.dist, 3.5);
    }

    #[test]
    fn demo_map_hits_pillar() {
        let grid = WorldMap::demo();
        let hit = cast_ray(&grid, DVec2::new(1.5, 2.5), DVec2::new(1.0, 0.0));
        assert_eq!(hit.map, IVec2::new(2, 2));
        assert_eq!(hit.dist, 0.5);
    }

    #[test]
    fn east_ray_hits_first_wall_column() {
        let grid = room(10, 6);
        for cx in [1.0, 2.25, 4.5, 8.9] {
            let hit = cast_ray(&grid, DVec2::new(cx, 3.5), DVec2::X);
            assert!(hit.hit);
            assert_eq!(hit.side.side(), 0);
            assert_eq!(hit.map.x, 9);
            assert!((hit.dist - (9.0 - cx)).abs() < 1e-12);
        }
    }

    #[test]
    fn west_and_north_rays() {
        let grid = WorldMap::demo();
        let origin = DVec2::new(3.5, 3.5);

        let west = cast_ray_detailed(&grid, origin, DVec2::new(-1.0, 0.0), DEFAULT_MAX_STEPS);
        assert_eq!(west.map, IVec2::new(0, 3));
        assert_eq!(west.step, IVec2::new(-1, 1));
        assert_eq!(west.perp_wall_dist, 2.5);
        assert_eq!(west.wall_x, 0.5);

        let north = cast_ray_detailed(&grid, origin, DVec2::new(0.0, -1.0), DEFAULT_MAX_STEPS);
        assert_eq!(north.map, IVec2::new(3, 0));
        assert_eq!(north.side, Axis::Y);
        assert_eq!(north.perp_wall_dist, 2.5);
        assert_eq!(north.delta_dist.x, DELTA_DIST_SENTINEL);
    }

    #[test]
    fn ties_advance_the_y_axis() {
        let grid = WorldMap::demo();
        let trace = cast_ray_detailed(&grid, DVec2::new(1.5, 1.5), DVec2::new(1.0, 1.0), 256);

        assert_eq!(trace.side_dist0, DVec2::new(0.5, 0.5));
        assert_eq!(trace.steps.len(), 2);
        assert_eq!(trace.steps[0].took, Axis::Y);
        assert_eq!(trace.steps[0].map, IVec2::new(1, 2));
        assert_eq!(trace.steps[1].took, Axis::X);
        assert_eq!(trace.map, IVec2::new(2, 2));
        assert_eq!(trace.side, Axis::X);
        assert_eq!(trace.perp_wall_dist, 0.5);
        assert_eq!(trace.wall_x, 0.0);
    }

    #[test]
    fn open_map_misses_within_budget() {
        let grid = WorldMap::new(3, 3, vec![OPEN; 9]).unwrap();
        let origin = DVec2::new(0.5, 0.5);

        let hit = cast_ray(&grid, origin, DVec2::X);
        assert!(!hit.hit);
        assert_eq!(hit.map, IVec2::new(50, 0));
        assert_eq!(hit.distance_or(-1.0), -1.0);

        let trace = cast_ray_detailed(&grid, origin, DVec2::X, 256);
        assert!(!trace.hit);
        assert_eq!(trace.steps.len(), 256);
        assert_eq!(trace.steps.last().map(|step| step.i), Some(255));
    }

    #[test]
    fn zero_budget_returns_initial_state() {
        let grid = WorldMap::demo();
        let trace = cast_ray_detailed(&grid, DVec2::new(3.5, 3.5), DVec2::X, 0);

        assert!(!trace.hit);
        assert_eq!(trace.side, Axis::X);
        assert!(trace.steps.is_empty());
        assert_eq!(trace.map, IVec2::new(3, 3));
        assert_eq!(trace.perp_wall_dist, -0.5);
        assert_eq!(cast_ray_with_limit(&grid, DVec2::new(3.5, 3.5), DVec2::X, 0).dist, -0.5);
    }

    #[test]
    fn ray_from_outside_walks_through_absent_cells() {
        let grid = WorldMap::demo();
        let trace = cast_ray_detailed(&grid, DVec2::new(-3.5, 3.5), DVec2::X, 256);

        assert!(trace.hit);
        assert_eq!(trace.map, IVec2::new(0, 3));
        assert_eq!(trace.side, Axis::X);
        assert_eq!(trace.perp_wall_dist, 3.5);
        let xs: Vec<i32> = trace.steps.iter().map(|step| step.map.x).collect();
        assert_eq!(xs, vec![-3, -2, -1, 0]);
    }

    #[test]
    fn far_away_origin_does_not_overflow() {
        let grid = WorldMap::demo();
        let hit = cast_ray(&grid, DVec2::new(3.0e9, 0.5), DVec2::X);
        assert!(!hit.hit);
        assert_eq!(hit.map.x, i32::MAX);

        let back = cast_ray(&grid, DVec2::new(-3.0e9, 0.5), DVec2::NEG_X);
        assert!(!back.hit);
        assert_eq!(back.map.x, i32::MIN);
    }

    #[test]
    fn steps_record_running_side_distances() {
        let grid = WorldMap::demo();
        let trace = cast_ray_detailed(&grid, DVec2::new(3.5, 3.5), DVec2::X, 256);
        let xs: Vec<f64> = trace.steps.iter().map(|step| step.side_dist.x).collect();
        assert_eq!(xs, vec![1.5, 2.5, 3.5, 4.5]);
        assert!(trace.steps.iter().all(|step| step.took == Axis::X));
    }

    #[test]
    fn distances_and_wall_x_stay_in_range() {
        let grid = WorldMap::demo();
        let origin = DVec2::new(3.3, 3.7);
        for i in 0..360 {
            let angle = (i as f64).to_radians();
            let dir = DVec2::new(angle.cos(), angle.sin());
            let trace = cast_ray_detailed(&grid, origin, dir, 256);
            assert!(trace.hit, "ray at {i} degrees escaped a closed map");
            assert!(trace.perp_wall_dist >= 0.0);
            assert!((0.0..1.0).contains(&trace.wall_x), "wall_x {}", trace.wall_x);
            assert!(trace.euclidean_distance() + 1e-9 >= trace.perp_wall_dist);
        }
    }

    #[test]
    fn detailed_cast_is_deterministic() {
        let grid = WorldMap::demo();
        let origin = DVec2::new(2.7, 5.1);
        let dir = DVec2::new(0.31, -0.77);
        let a = cast_ray_detailed(&grid, origin, dir, 256);
        let b = cast_ray_detailed(&grid, origin, dir, 256);
        assert_eq!(a, b);
        assert_eq!(a.wall_x.to_bits(), b.wall_x.to_bits());
        assert_eq!(a.perp_wall_dist.to_bits(), b.perp_wall_dist.to_bits());
    }

    #[test]
    fn simple_and_detailed_agree() {
        let grid = WorldMap::demo();
        let origin = DVec2::new(4.2, 1.4);
        let dir = DVec2::new(-0.6, 0.8);
        assert_eq!(cast_ray(&grid, origin, dir), cast_ray_detailed(&grid, origin, dir, 50).as_hit());
    }

    #[test]
    fn hit_point_lies_on_wall_face() {
        let grid = WorldMap::demo();
        let trace = cast_ray_detailed(&grid, DVec2::new(3.5, 3.5), DVec2::new(1.0, 0.5), 256);
        let point = trace.hit_point();
        match trace.side {
            Axis::X => assert!((point.x - point.x.round()).abs() < 1e-9),
            Axis::Y => assert!((point.y - point.y.round()).abs() < 1e-9),
        }
    }
}
