use glam::{DVec2, IVec2};

use crate::types::DELTA_DIST_SENTINEL;

/// Ray length needed to cross one full cell along an axis.
#[inline]
pub fn delta_dist(dir: f64) -> f64 {
    if dir == 0.0 {
        return DELTA_DIST_SENTINEL;
    }
    (1.0 / dir).abs()
}

/// Per-axis `(step, delta_dist, side_dist)` for a ray starting in `cell`.
pub fn axis_params(origin: f64, cell: i32, dir: f64) -> (i32, f64, f64) {
    let delta = delta_dist(dir);
    if dir < 0.0 {
        (-1, delta, (origin - cell as f64) * delta)
    } else {
        (1, delta, (cell as f64 + 1.0 - origin) * delta)
    }
}

#[inline]
pub fn floor_cell(pos: DVec2) -> IVec2 {
    IVec2::new(pos.x.floor() as i32, pos.y.floor() as i32)
}

/// `value - floor(value)`, kept strictly below 1 when rounding would reach it.
#[inline]
pub fn fract_floor(value: f64) -> f64 {
    let frac = value - value.floor();
    if frac >= 1.0 { 0.0 } else { frac }
}
