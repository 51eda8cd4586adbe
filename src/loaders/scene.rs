//! YAML scene files: a cub map plus camera and screen settings.
//!
//! ```yaml
//! map: level.cub
//! position: [3.5, 3.5]    # optional, defaults to the spawn cell centre
//! angle: 0.0              # optional, defaults to the spawn heading
//! plane_len: 0.66
//! screen: { width: 320, height: 200 }
//! max_steps: 256
//! ```

use std::path::{Path, PathBuf};

use glam::DVec2;
use serde::Deserialize;
use tracing::debug;

use crate::camera::{Camera, spawn_angle};
use crate::grid::WorldMap;
use crate::raycast::utils::floor_cell;
use crate::types::{
    DEFAULT_MAX_STEPS, DEFAULT_PLANE_LEN, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH,
    GridcastError,
};
use crate::validate::{ValidatedMap, validate_cub_map};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneMetadata {
    map: String,
    #[serde(default)]
    position: Option<[f64; 2]>,
    #[serde(default)]
    angle: Option<f64>,
    #[serde(default = "default_plane_len")]
    plane_len: f64,
    #[serde(default)]
    screen: ScreenMetadata,
    #[serde(default = "default_max_steps")]
    max_steps: usize,
}

#[derive(Debug, Deserialize)]
struct ScreenMetadata {
    width: u32,
    height: u32,
}

impl Default for ScreenMetadata {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

fn default_plane_len() -> f64 {
    DEFAULT_PLANE_LEN
}

fn default_max_steps() -> usize {
    DEFAULT_MAX_STEPS
}

/// Everything needed to cast a full frame.
#[derive(Debug, Clone)]
pub struct Scene {
    pub map: ValidatedMap,
    pub grid: WorldMap,
    pub camera: Camera,
    pub screen_width: u32,
    pub screen_height: u32,
    pub max_steps: usize,
}

/// Read a cub map body from disk and validate it.
pub fn load_map(path: impl AsRef<Path>) -> Result<ValidatedMap, GridcastError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    Ok(validate_cub_map(&text))
}

pub fn load_scene(yaml_path: impl AsRef<Path>) -> Result<Scene, GridcastError> {
    let yaml_path = yaml_path.as_ref();
    let yaml_str = std::fs::read_to_string(yaml_path)?;
    let metadata: SceneMetadata = serde_yaml::from_str(&yaml_str)?;

    if !(metadata.plane_len.is_finite() && metadata.plane_len > 0.0) {
        return Err(GridcastError::InvalidScene(
            "plane_len must be a positive number".to_string(),
        ));
    }
    if metadata.screen.width == 0 || metadata.screen.height == 0 {
        return Err(GridcastError::InvalidScene(
            "screen width and height must be non-zero".to_string(),
        ));
    }
    if metadata.max_steps == 0 {
        return Err(GridcastError::InvalidScene(
            "max_steps must be non-zero".to_string(),
        ));
    }

    let map_path = resolve_map_path(yaml_path, &metadata.map);
    debug!(map = %map_path.display(), "loading scene map");
    let map = load_map(&map_path)?;
    let grid = WorldMap::from_validated(&map)?;

    let spawn = map
        .spawn()
        .ok_or_else(|| GridcastError::InvalidScene("map has no spawn marker".to_string()))?;
    let mut camera = Camera::from_spawn(&spawn, metadata.plane_len);
    if let Some([x, y]) = metadata.position {
        let pos = DVec2::new(x, y);
        let cell = floor_cell(pos);
        if !pos.is_finite() || !grid.is_open(cell.x, cell.y) {
            return Err(GridcastError::InvalidScene(format!(
                "position [{x}, {y}] is not on an open map cell"
            )));
        }
        camera.pos = pos;
    }
    if let Some(angle) = metadata.angle {
        if !angle.is_finite() {
            return Err(GridcastError::InvalidScene(
                "angle must be a finite number".to_string(),
            ));
        }
        camera = Camera::from_angle(camera.pos, angle, metadata.plane_len);
    } else {
        debug!(facing = %spawn.facing, angle = spawn_angle(spawn.facing), "using spawn heading");
    }

    Ok(Scene {
        map,
        grid,
        camera,
        screen_width: metadata.screen.width,
        screen_height: metadata.screen.height,
        max_steps: metadata.max_steps,
    })
}

fn resolve_map_path(yaml_path: &Path, map_ref: &str) -> PathBuf {
    let map_path = PathBuf::from(map_ref);
    if map_path.is_absolute() {
        return map_path;
    }

    match yaml_path.parent() {
        Some(parent) => parent.join(map_path),
        None => map_path,
    }
}
