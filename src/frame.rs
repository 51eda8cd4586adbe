use glam::DVec2;

use crate::camera::{Camera, camera_x};
use crate::grid::WorldMap;
use crate::projection::WallSlice;
use crate::raycast::{RayTrace, cast_ray_detailed};

#[derive(Debug, Clone, PartialEq)]
pub struct FrameColumn {
    pub x: u32,
    pub camera_x: f64,
    pub ray_dir: DVec2,
    pub trace: RayTrace,
    /// `None` when the ray ran out of steps without finding a wall.
    pub slice: Option<WallSlice>,
}

/// One ray per screen column.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub columns: Vec<FrameColumn>,
}

impl Frame {
    /// Wall distance per column, for sprite occlusion. Misses are infinitely far.
    pub fn z_buffer(&self) -> Vec<f64> {
        self.columns
            .iter()
            .map(|column| {
                if column.trace.hit {
                    column.trace.perp_wall_dist
                } else {
                    f64::INFINITY
                }
            })
            .collect()
    }

    pub fn column(&self, x: u32) -> Option<&FrameColumn> {
        self.columns.get(x as usize)
    }
}

pub fn render_columns(
    grid: &WorldMap,
    camera: &Camera,
    screen_w: u32,
    screen_h: u32,
    max_steps: usize,
) -> Frame {
    let columns = (0..screen_w)
        .map(|x| {
            let camera_x = camera_x(x, screen_w);
            let ray_dir = camera.ray_dir(camera_x);
            let trace = cast_ray_detailed(grid, camera.pos, ray_dir, max_steps);
            let slice = trace
                .hit
                .then(|| WallSlice::project(trace.perp_wall_dist, screen_h));
            FrameColumn {
                x,
                camera_x,
                ray_dir,
                trace,
                slice,
            }
        })
        .collect();

    Frame {
        width: screen_w,
        height: screen_h,
        columns,
    }
}
