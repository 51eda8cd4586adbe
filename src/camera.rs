//! Player camera: position, facing and camera plane.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec2;

use crate::grid::WorldMap;
use crate::raycast::utils::floor_cell;
use crate::types::DEFAULT_PLANE_LEN;
use crate::validate::Spawn;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub pos: DVec2,
    pub dir: DVec2,
    /// Half-width of the view, perpendicular to `dir`.
    pub plane: DVec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_angle(DVec2::new(3.5, 3.5), 0.0, DEFAULT_PLANE_LEN)
    }
}

impl Camera {
    /// Camera facing `angle` radians (y grows downward, so positive angles
    /// turn clockwise on screen).
    pub fn from_angle(pos: DVec2, angle: f64, plane_len: f64) -> Self {
        let dir = DVec2::new(angle.cos(), angle.sin());
        Self {
            pos,
            dir,
            plane: DVec2::new(-dir.y, dir.x) * plane_len,
        }
    }

    /// Camera at the centre of a spawn cell, facing its marker.
    pub fn from_spawn(spawn: &Spawn, plane_len: f64) -> Self {
        let pos = DVec2::new(spawn.x as f64 + 0.5, spawn.y as f64 + 0.5);
        Self::from_angle(pos, spawn_angle(spawn.facing), plane_len)
    }

    pub fn angle(&self) -> f64 {
        self.dir.y.atan2(self.dir.x)
    }

    /// Horizontal field of view in degrees.
    pub fn fov_degrees(&self) -> f64 {
        2.0 * (self.plane.length() / self.dir.length()).atan().to_degrees()
    }

    /// Ray direction through a point on the camera plane, `camera_x` in `[-1, 1]`.
    pub fn ray_dir(&self, camera_x: f64) -> DVec2 {
        self.dir + self.plane * camera_x
    }

    pub fn rotate(&mut self, delta: f64) {
        let rotation = DVec2::from_angle(delta);
        self.dir = rotation.rotate(self.dir);
        self.plane = rotation.rotate(self.plane);
    }

    /// Move along `dir` by `distance` (negative backs up). The move is only
    /// committed when the target cell is open floor.
    pub fn try_move(&mut self, grid: &WorldMap, distance: f64) -> bool {
        let target = self.pos + self.dir * distance;
        let cell = floor_cell(target);
        if !grid.is_open(cell.x, cell.y) {
            return false;
        }
        self.pos = target;
        true
    }
}

/// Heading of a spawn marker, in radians.
pub fn spawn_angle(facing: char) -> f64 {
    match facing {
        'S' => FRAC_PI_2,
        'W' => PI,
        'N' => 3.0 * FRAC_PI_2,
        _ => 0.0,
    }
}

/// Camera-plane coordinate of a screen column, spanning `[-1, 1)`.
#[inline]
pub fn camera_x(column: u32, width: u32) -> f64 {
    2.0 * column as f64 / width as f64 - 1.0
}

/// Camera-plane coordinate for ray `i` of an inclusive sweep of `rays` rays.
#[inline]
pub fn sweep_camera_x(i: usize, rays: usize) -> f64 {
    if rays <= 1 {
        return 0.0;
    }
    2.0 * i as f64 / (rays - 1) as f64 - 1.0
}
