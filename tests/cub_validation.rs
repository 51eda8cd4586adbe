use std::path::{Path, PathBuf};

use glam::{DVec2, IVec2};

use gridcast::validate::Exposure;
use gridcast::{Camera, MapIssue, MapIssueKind, WorldMap, load_map};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn closed_map_validates_cleanly() {
    let map = load_map(fixture("valid.cub")).expect("map should load");

    assert!(map.issues.is_empty(), "{:?}", map.issues);
    assert_eq!(map.player_count, 1);
    assert_eq!((map.width, map.height), (9, 5));
}

#[test]
fn hole_reports_each_exposed_neighbour() {
    let map = load_map(fixture("hole.cub")).expect("map should load");

    assert_eq!(
        map.issues,
        vec![
            MapIssue::TouchesVoid {
                x: 4,
                y: 1,
                exposure: Exposure::Void
            },
            MapIssue::TouchesVoid {
                x: 3,
                y: 2,
                exposure: Exposure::Void
            },
            MapIssue::TouchesVoid {
                x: 4,
                y: 3,
                exposure: Exposure::Void
            },
        ]
    );
    assert_eq!(map.issues_of(MapIssueKind::InvalidChar).count(), 0);
    assert_eq!(map.issues_of(MapIssueKind::PlayerCount).count(), 0);
}

#[test]
fn irregular_outline_is_closed() {
    let map = load_map(fixture("irregular.cub")).expect("map should load");
    assert!(map.is_valid(), "{:?}", map.issues);
    assert_eq!((map.width, map.height), (12, 7));
    // Short rows are padded with void.
    assert_eq!(map.get(11, 6), Some(' '));
}

#[test]
fn spawn_next_to_void_is_open() {
    let map = load_map(fixture("open_spawn.cub")).expect("map should load");
    assert_eq!(
        map.issues,
        vec![MapIssue::TouchesVoid {
            x: 10,
            y: 3,
            exposure: Exposure::Void
        }]
    );
    assert!(WorldMap::from_validated(&map).is_err());
}

#[test]
fn validated_map_feeds_the_ray_engine() {
    let map = load_map(fixture("irregular.cub")).expect("map should load");
    let grid = WorldMap::from_validated(&map).expect("map is closed");
    let spawn = map.spawn().expect("map has a spawn");
    assert_eq!((spawn.x, spawn.y, spawn.facing), (10, 3, 'W'));

    let camera = Camera::from_spawn(&spawn, 0.66);
    let hit = grid.cast_ray(camera.pos, camera.dir);

    assert!(hit.hit);
    assert_eq!(hit.map, IVec2::new(0, 3));
    assert_eq!(hit.side.side(), 0);
    assert!((hit.dist - 9.5).abs() < 1e-9);
    assert_eq!(camera.pos, DVec2::new(10.5, 3.5));
}
