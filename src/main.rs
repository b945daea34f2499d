//! Replays recorded head pose traces through the camera rig.

use anyhow::{bail, Result};
use clap::Parser;
use head_pose_rig::{
    config::{Config, EXAMPLE_CONFIG},
    constants::DEFAULT_FPS,
    replay::{PoseTrace, ReplayApp, ReplayOptions},
    rig::Transform,
};
use log::info;
use nalgebra::Vector3;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pose trace to replay (YAML)
    #[arg(short, long)]
    trace: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Render frames per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: f32,

    /// Request a depth recalibration before these frame indices
    #[arg(long, value_delimiter = ',')]
    recalibrate_at: Vec<usize>,

    /// Number of wandering animals to simulate
    #[arg(long, default_value = "0")]
    animals: usize,

    /// Seed for the animals' random source
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Camera start position as x,y,z
    #[arg(long, value_delimiter = ',', default_value = "0,1.6,0")]
    camera: Vec<f32>,

    /// Print an example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    let Some(trace_path) = args.trace else {
        bail!("--trace is required unless --print-config is given");
    };

    info!("Head Pose Rig - trace replay");

    let config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    let trace = PoseTrace::from_file(&trace_path)?;
    info!("Loaded {} frames from {}", trace.len(), trace_path);

    let &[x, y, z] = args.camera.as_slice() else {
        bail!("--camera expects exactly three values");
    };
    let camera = Transform::from_position(Vector3::new(x, y, z));

    let options = ReplayOptions {
        fps: args.fps,
        recalibrate_at: args.recalibrate_at,
        animals: args.animals,
        seed: args.seed,
    };
    let mut app = ReplayApp::new(&config, camera, options)?;

    println!("frame,detected,yaw,pitch,roll,parallax_x,dolly_z,cam_x,cam_y,cam_z");
    app.run(&trace, |frame| {
        let t = &frame.targets;
        let p = &frame.camera.position;
        println!(
            "{},{},{:.3},{:.3},{:.3},{:.4},{:.4},{:.4},{:.4},{:.4}",
            frame.index,
            frame.detected,
            t.angles.yaw,
            t.angles.pitch,
            t.angles.roll,
            t.parallax_x,
            t.dolly_z,
            p.x,
            p.y,
            p.z
        );
    });

    Ok(())
}
