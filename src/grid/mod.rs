pub mod world_map;

pub use world_map::WorldMap;
