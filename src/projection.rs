//! Turning a wall distance into a vertical screen slice and texture lookups.

use glam::DVec2;

use crate::raycast::{Axis, RayTrace};

/// Vertical run of pixels covered by a wall in one screen column.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WallSlice {
    pub line_height: i32,
    pub draw_start: i32,
    pub draw_end: i32,
}

impl WallSlice {
    /// Project a perpendicular wall distance onto a screen `screen_h` pixels
    /// tall. The draw range is clamped to `[0, screen_h - 1]`.
    pub fn project(perp_dist: f64, screen_h: u32) -> Self {
        let h = screen_h as f64;
        let line_height = if perp_dist > 0.0 {
            (h / perp_dist).floor().min(i32::MAX as f64) as i32
        } else {
            0
        };

        let max_y = screen_h.saturating_sub(1) as i32;
        let half = line_height as f64 / 2.0;
        let draw_start = (-half + h / 2.0).floor() as i32;
        let draw_end = (half + h / 2.0).floor() as i32;

        Self {
            line_height,
            draw_start: draw_start.clamp(0, max_y),
            draw_end: draw_end.clamp(0, max_y),
        }
    }

    pub fn contains(&self, y: i32) -> bool {
        (self.draw_start..=self.draw_end).contains(&y)
    }
}

/// Texture column for a wall hit, mirrored so textures read left to right
/// from every viewing direction.
pub fn texture_column(wall_x: f64, side: Axis, ray_dir: DVec2, tex_w: u32) -> u32 {
    if tex_w == 0 {
        return 0;
    }
    let tex_x = ((wall_x * tex_w as f64) as u32).min(tex_w.saturating_sub(1));
    let mirrored = match side {
        Axis::X => ray_dir.x > 0.0,
        Axis::Y => ray_dir.y < 0.0,
    };
    if mirrored {
        tex_w - tex_x - 1
    } else {
        tex_x
    }
}

/// Texture row for screen row `y` inside a wall slice, using 8.8 fixed point.
pub fn texture_row(y: i32, screen_h: u32, line_height: i32, tex_h: u32) -> u32 {
    if line_height <= 0 {
        return 0;
    }
    let d = y as i64 * 256 - screen_h as i64 * 128 + line_height as i64 * 128;
    let tex_y = (d * tex_h as i64 / line_height as i64) / 256;
    tex_y.clamp(0, tex_h.saturating_sub(1) as i64) as u32
}

/// Side-by-side projection of the corrected and the naive distance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColumnSample {
    pub perp: f64,
    pub euclid: f64,
    pub line_height_perp: i32,
    pub line_height_euclid: i32,
}

impl ColumnSample {
    pub fn from_trace(trace: &RayTrace, screen_h: u32) -> Self {
        let perp = trace.perp_wall_dist;
        let euclid = trace.euclidean_distance();
        Self {
            perp,
            euclid,
            line_height_perp: WallSlice::project(perp, screen_h).line_height,
            line_height_euclid: WallSlice::project(euclid, screen_h).line_height,
        }
    }
}
