use std::error::Error;
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use gridcast::camera::camera_x;
use gridcast::frame::render_columns;
use gridcast::visualization::frame_to_image;
use gridcast::{Scene, cast_ray_detailed, load_map, load_scene};

const USAGE: &str = "usage:
  gridcast validate <map.cub> [--yaml]
  gridcast cast <scene.yaml> [column]
  gridcast render <scene.yaml> <out.png>";

fn main() -> Result<ExitCode, Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["validate", path] => validate(path, false),
        ["validate", path, "--yaml"] => validate(path, true),
        ["cast", scene] => cast(scene, None),
        ["cast", scene, column] => cast(scene, Some(column.parse()?)),
        ["render", scene, out] => render(scene, out),
        _ => {
            eprintln!("{USAGE}");
            Ok(ExitCode::from(2))
        }
    }
}

fn validate(path: &str, yaml: bool) -> Result<ExitCode, Box<dyn Error>> {
    let map = load_map(path)?;

    if yaml {
        print!("{}", serde_yaml::to_string(&map.issues)?);
    } else {
        println!(
            "{}x{} map, {} player marker(s)",
            map.width, map.height, map.player_count
        );
        for issue in &map.issues {
            println!("[{}] {}", issue.kind(), issue);
        }
    }

    if map.is_valid() {
        info!("map is closed and valid");
        Ok(ExitCode::SUCCESS)
    } else {
        info!(issues = map.issues.len(), "map has structural issues");
        Ok(ExitCode::FAILURE)
    }
}

fn cast(path: &str, column: Option<u32>) -> Result<ExitCode, Box<dyn Error>> {
    let scene = load_scene(path)?;
    let column = column
        .unwrap_or(scene.screen_width / 2)
        .min(scene.screen_width - 1);
    print_trace(&scene, column);
    Ok(ExitCode::SUCCESS)
}

fn print_trace(scene: &Scene, column: u32) {
    let camera_x = camera_x(column, scene.screen_width);
    let ray_dir = scene.camera.ray_dir(camera_x);
    let trace = cast_ray_detailed(&scene.grid, scene.camera.pos, ray_dir, scene.max_steps);

    println!("column      {column} (cameraX {camera_x:.3})");
    println!("pos         [{:.3}, {:.3}]", scene.camera.pos.x, scene.camera.pos.y);
    println!("rayDir      [{:.3}, {:.3}]", ray_dir.x, ray_dir.y);
    println!("step        [{}, {}]", trace.step.x, trace.step.y);
    println!(
        "deltaDist   [{:.3}, {:.3}]",
        trace.delta_dist.x, trace.delta_dist.y
    );
    println!(
        "sideDist0   [{:.3}, {:.3}]",
        trace.side_dist0.x, trace.side_dist0.y
    );
    for step in &trace.steps {
        println!(
            "  #{:<3} took {}  map [{}, {}]  sideDist [{:.3}, {:.3}]",
            step.i,
            step.took.as_char(),
            step.map.x,
            step.map.y,
            step.side_dist.x,
            step.side_dist.y
        );
    }
    if trace.hit {
        println!(
            "hit         [{}, {}] side {}  perpWallDist {:.3}  euclid {:.3}  wallX {:.3}",
            trace.map.x,
            trace.map.y,
            trace.side.side(),
            trace.perp_wall_dist,
            trace.euclidean_distance(),
            trace.wall_x
        );
    } else {
        println!("no wall found within {} steps", scene.max_steps);
    }
}

fn render(path: &str, out: &str) -> Result<ExitCode, Box<dyn Error>> {
    let scene = load_scene(path)?;
    let frame = render_columns(
        &scene.grid,
        &scene.camera,
        scene.screen_width,
        scene.screen_height,
        scene.max_steps,
    );
    frame_to_image(&frame).save(out)?;
    info!(out, width = frame.width, height = frame.height, "wrote frame");
    Ok(ExitCode::SUCCESS)
}
