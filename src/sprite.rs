//! Billboard sprites: camera-space transform and screen footprint.

use glam::DVec2;

use crate::camera::Camera;

const MIN_DEPTH: f64 = 1e-6;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteProjection {
    /// Sprite position in camera space; `y` is depth along the view direction.
    pub transform: DVec2,
    pub screen_x: i32,
    pub width: i32,
    pub height: i32,
    pub draw_start_x: i32,
    pub draw_end_x: i32,
    pub draw_start_y: i32,
    pub draw_end_y: i32,
}

impl SpriteProjection {
    pub fn project(camera: &Camera, sprite: DVec2, screen_w: u32, screen_h: u32) -> Self {
        let Camera { pos, dir, plane } = *camera;
        let rel = sprite - pos;

        // Inverse of the camera matrix [plane dir].
        let inv_det = 1.0 / (plane.x * dir.y - dir.x * plane.y);
        let transform = DVec2::new(
            inv_det * (dir.y * rel.x - dir.x * rel.y),
            inv_det * (-plane.y * rel.x + plane.x * rel.y),
        );

        let w = screen_w as f64;
        let h = screen_h as f64;
        let depth = transform.y.max(MIN_DEPTH);
        let screen_x = ((w / 2.0) * (1.0 + transform.x / depth)).floor() as i32;
        let height = (h / depth).floor().min(i32::MAX as f64).abs() as i32;
        let width = height;

        let max_x = screen_w.saturating_sub(1) as i32;
        let max_y = screen_h.saturating_sub(1) as i32;
        let half = height as f64 / 2.0;
        let half_w = width as f64 / 2.0;

        Self {
            transform,
            screen_x,
            width,
            height,
            draw_start_y: ((-half + h / 2.0).floor() as i32).clamp(0, max_y),
            draw_end_y: ((half + h / 2.0).floor() as i32).clamp(0, max_y),
            draw_start_x: ((-half_w + screen_x as f64).floor() as i32).clamp(0, max_x),
            draw_end_x: ((half_w + screen_x as f64).floor() as i32).clamp(0, max_x),
        }
    }

    pub fn depth(&self) -> f64 {
        self.transform.y
    }

    /// A stripe is drawn when the sprite is in front of the camera, inside
    /// its draw range, and nearer than the wall already in that column.
    pub fn stripe_visible(&self, stripe: i32, z_buffer: &[f64]) -> bool {
        if self.transform.y <= 0.0 || stripe < self.draw_start_x || stripe >= self.draw_end_x {
            return false;
        }
        usize::try_from(stripe)
            .ok()
            .and_then(|column| z_buffer.get(column))
            .is_some_and(|&wall| self.transform.y < wall)
    }

    /// Texture column for a screen stripe.
    pub fn stripe_tex_x(&self, stripe: i32, tex_w: u32) -> u32 {
        if self.width <= 0 {
            return 0;
        }
        let left = -self.width / 2 + self.screen_x;
        let tex_x = (stripe - left) as i64 * tex_w as i64 / self.width as i64;
        tex_x.clamp(0, tex_w.saturating_sub(1) as i64) as u32
    }
}

/// Indices of `sprites` ordered far to near, for painter's-order drawing.
pub fn sort_far_to_near(camera: &Camera, sprites: &[DVec2]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..sprites.len()).collect();
    order.sort_by(|&a, &b| {
        let da = camera.pos.distance_squared(sprites[a]);
        let db = camera.pos.distance_squared(sprites[b]);
        db.total_cmp(&da)
    });
    order
}
