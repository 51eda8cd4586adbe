use glam::{DVec2, IVec2};

use crate::grid::WorldMap;
use crate::types::{DEFAULT_MAX_STEPS, SIMPLE_MAX_STEPS};

pub mod dda;
pub(crate) mod utils;

pub use dda::{cast_ray, cast_ray_detailed, cast_ray_with_limit};

/// Grid axis advanced by a DDA step. Also names the kind of grid line a ray
/// crossed: `X` is a vertical line (side 0), `Y` a horizontal one (side 1).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    #[default]
    X,
    Y,
}

impl Axis {
    /// Numeric side, 0 for x-sides and 1 for y-sides.
    pub fn side(self) -> u8 {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::X => 'x',
            Self::Y => 'y',
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayHit {
    /// Perpendicular (fish-eye corrected) distance to the crossed grid line.
    pub dist: f64,
    pub side: Axis,
    /// Cell the traversal stopped in; the wall cell when `hit` is set.
    pub map: IVec2,
    pub ray_dir: DVec2,
    pub hit: bool,
}

impl RayHit {
    /// Extract hit distance, or return `default` if the ray missed.
    pub fn distance_or(&self, default: f64) -> f64 {
        if self.hit { self.dist } else { default }
    }
}

/// One DDA iteration: the cell entered and both running side distances.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DdaStep {
    pub i: usize,
    pub map: IVec2,
    pub side_dist: DVec2,
    pub took: Axis,
}

/// Full record of a cast, for debugging and lesson visualizations.
#[derive(Debug, Clone, PartialEq)]
pub struct RayTrace {
    pub origin: DVec2,
    pub ray_dir: DVec2,
    pub hit: bool,
    pub side: Axis,
    pub map: IVec2,
    pub step: IVec2,
    pub delta_dist: DVec2,
    /// Side distances before the first step.
    pub side_dist0: DVec2,
    pub perp_wall_dist: f64,
    /// Fractional hit position along the wall face, in `[0, 1)`.
    pub wall_x: f64,
    pub steps: Vec<DdaStep>,
}

impl RayTrace {
    /// Perpendicular distance, the one used for projection.
    pub fn dist(&self) -> f64 {
        self.perp_wall_dist
    }

    /// Point where the ray meets the wall face.
    pub fn hit_point(&self) -> DVec2 {
        self.origin + self.ray_dir * self.perp_wall_dist
    }

    /// Straight-line length to the hit point. Projecting with this instead
    /// of `perp_wall_dist` bends straight walls (fish-eye).
    pub fn euclidean_distance(&self) -> f64 {
        let delta = self.hit_point() - self.origin;
        delta.x.hypot(delta.y)
    }

    /// Drop the step record, keeping what [`cast_ray`](crate::raycast::cast_ray) returns.
    pub fn as_hit(&self) -> RayHit {
        RayHit {
            dist: self.perp_wall_dist,
            side: self.side,
            map: self.map,
            ray_dir: self.ray_dir,
            hit: self.hit,
        }
    }
}

impl WorldMap {
    /// Cast with the short step budget used for per-frame rendering.
    pub fn cast_ray(&self, origin: DVec2, dir: DVec2) -> RayHit {
        cast_ray_with_limit(self, origin, dir, SIMPLE_MAX_STEPS)
    }

    pub fn cast_ray_detailed(&self, origin: DVec2, dir: DVec2) -> RayTrace {
        cast_ray_detailed(self, origin, dir, DEFAULT_MAX_STEPS)
    }
}
