//! Floor casting, one horizontal screen row at a time.

use glam::{DVec2, IVec2};

use crate::camera::Camera;
use crate::raycast::utils::floor_cell;

/// Stand-in for a zero row offset at the horizon.
const HORIZON_EPSILON: f64 = 1e-6;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FloorRow {
    /// Distance from the camera to the floor strip seen on this row.
    pub row_distance: f64,
    pub ray_dir0: DVec2,
    pub ray_dir1: DVec2,
    /// World-space advance per screen column.
    pub floor_step: DVec2,
    /// Floor point under the leftmost column.
    pub left: DVec2,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FloorSample {
    pub x: u32,
    pub point: DVec2,
    pub cell: IVec2,
    pub tex: (u32, u32),
}

impl FloorRow {
    pub fn new(camera: &Camera, y: u32, screen_w: u32, screen_h: u32) -> Self {
        let p = y as f64 - (screen_h / 2) as f64;
        let pos_z = 0.5 * screen_h as f64;
        let denom = if p == 0.0 { HORIZON_EPSILON } else { p };
        let row_distance = pos_z / denom;

        let ray_dir0 = camera.dir - camera.plane;
        let ray_dir1 = camera.dir + camera.plane;
        let floor_step = row_distance * (ray_dir1 - ray_dir0) / screen_w.max(1) as f64;

        Self {
            row_distance,
            ray_dir0,
            ray_dir1,
            floor_step,
            left: camera.pos + row_distance * ray_dir0,
        }
    }

    pub fn right(&self, camera: &Camera) -> DVec2 {
        camera.pos + self.row_distance * self.ray_dir1
    }

    /// Floor point, cell and texture coordinates under column `x`.
    ///
    /// Texture sizes must be powers of two.
    pub fn sample(&self, x: u32, tex_w: u32, tex_h: u32) -> FloorSample {
        let point = self.left + self.floor_step * x as f64;
        let cell = floor_cell(point);
        let frac = point - cell.as_dvec2();
        let tx = ((tex_w as f64 * frac.x).floor() as i64 & (tex_w as i64 - 1)) as u32;
        let ty = ((tex_h as f64 * frac.y).floor() as i64 & (tex_h as i64 - 1)) as u32;

        FloorSample {
            x,
            point,
            cell,
            tex: (tx, ty),
        }
    }
}
