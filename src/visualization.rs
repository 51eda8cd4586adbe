use image::{GrayImage, Luma};

use crate::frame::Frame;
use crate::grid::WorldMap;
use crate::raycast::{Axis, RayTrace};
use crate::types::WALL;

const OPEN_GRAY: u8 = 235;
const WALL_GRAY: u8 = 40;
const ABSENT_GRAY: u8 = 205;
const VISITED_X_GRAY: u8 = 170;
const VISITED_Y_GRAY: u8 = 130;
const HIT_GRAY: u8 = 0;

const CEILING_GRAY: u8 = 60;
const FLOOR_GRAY: u8 = 25;
const WALL_X_SIDE_GRAY: u8 = 200;
const WALL_Y_SIDE_GRAY: u8 = 150;

/// Top-down preview of a world map, `scale` pixels per cell.
///
/// Row `y = 0` is drawn at the top, matching how maps are written as text.
pub fn world_map_to_image(grid: &WorldMap, scale: u32) -> GrayImage {
    let scale = scale.max(1);
    let mut img = GrayImage::new(grid.width() * scale, grid.height() * scale);

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let px = match grid.lookup(x as i32, y as i32) {
                Some(WALL) => WALL_GRAY,
                Some(_) => OPEN_GRAY,
                None => ABSENT_GRAY,
            };
            fill_cell(&mut img, x, y, scale, px);
        }
    }

    img
}

/// Map preview with the cells visited by a DDA trace shaded by the axis
/// that was stepped. The hit cell is drawn black.
pub fn trace_to_image(grid: &WorldMap, trace: &RayTrace, scale: u32) -> GrayImage {
    let scale = scale.max(1);
    let mut img = world_map_to_image(grid, scale);

    for step in &trace.steps {
        if step.map.x < 0
            || step.map.y < 0
            || step.map.x >= grid.width() as i32
            || step.map.y >= grid.height() as i32
        {
            continue;
        }
        let px = match step.took {
            Axis::X => VISITED_X_GRAY,
            Axis::Y => VISITED_Y_GRAY,
        };
        fill_cell(&mut img, step.map.x as u32, step.map.y as u32, scale, px);
    }

    if trace.hit {
        fill_cell(&mut img, trace.map.x as u32, trace.map.y as u32, scale, HIT_GRAY);
    }

    img
}

/// First-person view: ceiling, wall slice and floor for each column, with
/// y-side walls drawn darker.
pub fn frame_to_image(frame: &Frame) -> GrayImage {
    let mut img = GrayImage::new(frame.width, frame.height);
    let horizon = frame.height / 2;

    for column in &frame.columns {
        for y in 0..frame.height {
            let px = match column.slice {
                Some(slice) if slice.contains(y as i32) => match column.trace.side {
                    Axis::X => WALL_X_SIDE_GRAY,
                    Axis::Y => WALL_Y_SIDE_GRAY,
                },
                _ if y < horizon => CEILING_GRAY,
                _ => FLOOR_GRAY,
            };
            img.put_pixel(column.x, y, Luma([px]));
        }
    }

    img
}

fn fill_cell(img: &mut GrayImage, x: u32, y: u32, scale: u32, px: u8) {
    for dy in 0..scale {
        for dx in 0..scale {
            img.put_pixel(x * scale + dx, y * scale + dy, Luma([px]));
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::camera::Camera;
    use crate::frame::render_columns;
    use crate::raycast::cast_ray_detailed;

    #[test]
    fn world_map_preview_scales_cells() {
        let grid = WorldMap::demo();
        let img = world_map_to_image(&grid, 4);
        assert_eq!(img.width(), 32);
        assert_eq!(img.height(), 28);
        assert_eq!(img.get_pixel(0, 0).0[0], WALL_GRAY);
        assert_eq!(img.get_pixel(4 * 3 + 1, 4 * 3 + 1).0[0], OPEN_GRAY);
        // Pillar at (2, 2).
        assert_eq!(img.get_pixel(4 * 2 + 3, 4 * 2).0[0], WALL_GRAY);
    }

    #[test]
    fn trace_overlay_marks_visited_cells() {
        let grid = WorldMap::demo();
        let trace = cast_ray_detailed(&grid, DVec2::new(3.5, 3.5), DVec2::X, 256);
        let img = trace_to_image(&grid, &trace, 1);
        assert_eq!(img.get_pixel(4, 3).0[0], VISITED_X_GRAY);
        assert_eq!(img.get_pixel(6, 3).0[0], VISITED_X_GRAY);
        assert_eq!(img.get_pixel(7, 3).0[0], HIT_GRAY);
        assert_eq!(img.get_pixel(3, 3).0[0], OPEN_GRAY);
    }

    #[test]
    fn frame_image_has_ceiling_wall_and_floor() {
        let grid = WorldMap::demo();
        let camera = Camera::from_angle(DVec2::new(3.5, 3.5), 0.0, 0.66);
        let frame = render_columns(&grid, &camera, 64, 40, 256);
        let img = frame_to_image(&frame);

        assert_eq!(img.dimensions(), (64, 40));
        assert_eq!(img.get_pixel(32, 0).0[0], CEILING_GRAY);
        assert_eq!(img.get_pixel(32, 20).0[0], WALL_X_SIDE_GRAY);
        assert_eq!(img.get_pixel(32, 39).0[0], FLOOR_GRAY);
    }
}
