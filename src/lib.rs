pub mod camera;
pub mod floor;
pub mod frame;
pub mod grid;
pub mod loaders;
pub mod projection;
pub mod raycast;
pub mod sprite;
pub mod types;
pub mod validate;
pub mod visualization;

pub use camera::Camera;
pub use grid::WorldMap;
pub use loaders::scene::{Scene, load_map, load_scene};
pub use raycast::{Axis, DdaStep, RayHit, RayTrace, cast_ray, cast_ray_detailed};
pub use types::GridcastError;
pub use validate::{MapIssue, MapIssueKind, ValidatedMap, validate_cub_map};
