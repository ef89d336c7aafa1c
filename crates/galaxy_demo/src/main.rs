//! Galaxy demo: generate a star field, index it and fly a scripted camera through it,
//! logging the LOD and optimized-mode signals a renderer would consume.
//!
//! Usage: `galaxy-demo [config.ron] [--write-config <path>]`

mod config;
mod flight;

use anyhow::{Context, Result};
use config::DemoConfig;
use engine_core::FrameClock;
use flight::FlightPlan;
use procgen::{generate_nebulae, GalaxyComposer, Structure};
use rand::prelude::*;
use spatial::PointOctree;
use std::path::PathBuf;
use view::{LodLevel, ViewController};

struct Args {
    config: Option<PathBuf>,
    write_config: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        write_config: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--write-config" {
            let path = iter.next().context("--write-config needs a path")?;
            args.write_config = Some(PathBuf::from(path));
        } else {
            args.config = Some(PathBuf::from(arg));
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let config = DemoConfig::load(args.config.as_deref());
    if let Some(path) = &args.write_config {
        config.save(path);
        log::info!("Wrote config to {:?}", path);
        return Ok(());
    }

    let composer = GalaxyComposer::new(config.galaxy.clone()).context("invalid galaxy config")?;
    let galaxy = composer.generate();
    for structure in Structure::ALL {
        log::info!(
            "  {:<18} {}",
            structure.label(),
            galaxy.stats.count(structure)
        );
    }
    let batches = galaxy.texture_batches();
    let rare: usize = batches
        .iter()
        .filter(|b| b.texture_index >= procgen::NUM_COMMON_STAR_TEXTURES)
        .map(|b| b.len())
        .sum();
    log::info!(
        "{} texture batches, {} rare-sprite stars, {} vertex bytes",
        batches.len(),
        rare,
        std::mem::size_of_val(galaxy.vertices().as_slice())
    );

    let mut rng = match config.galaxy.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };
    let nebulae = generate_nebulae(&config.nebulae, galaxy.radius, &mut rng);
    log::info!("{} nebulae", nebulae.len());

    let index = PointOctree::from_points(&galaxy.positions);
    log::info!(
        "Octree: {} points, {} nodes, depth {}",
        index.len(),
        index.node_count(),
        index.depth()
    );

    let mut view = ViewController::new(&config.view, galaxy.radius, false)
        .context("invalid view config")?;
    if let Some(level) = config.flight.manual_lod {
        view.lod.set_manual(Some(level));
    }

    let plan = FlightPlan::new(config.flight, galaxy.radius);
    let mut clock = FrameClock::new();
    for frame in 0..plan.frames() {
        clock.advance(plan.frame_time(frame));
        let pose = plan.pose_at(frame);
        let out = view.update(clock.delta_seconds(), &pose, Some(&index));

        if let Some(change) = out.lod_changed {
            let label = LodLevel::from_index(change.level).map_or("custom", LodLevel::label);
            let nearest = index
                .nearest(pose.position)
                .and_then(|n| galaxy.star(n.index));
            log::info!(
                "[frame {}] LOD {} ({}), star size {}, camera {:.0} from center, nearest {}",
                clock.frame_count(),
                change.level,
                label,
                out.star_size,
                pose.distance_from_origin(),
                nearest.map_or("-", |s| s.name.as_str())
            );
        }
        if let Some(active) = out.optimized_changed {
            log::info!("[frame {}] optimized mode {}", clock.frame_count(), active);
        }

        // The monitor only signals; deciding to switch is up to the host.
        if config.flight.auto_optimize {
            let want = out.dynamics.performance_degraded;
            if want != out.optimized_mode {
                view.dynamics.request_optimized_mode(want);
            }
        }
    }

    let state = view.dynamics.state();
    log::info!(
        "Flight done: {} frames in {:.1}s simulated, last LOD {}, smoothed angular speed {:.3} rad/s",
        clock.frame_count(),
        clock.elapsed_seconds(),
        view.lod.raw_level(),
        state.smoothed_angular_speed
    );
    if let Some(nebula) = nebulae.first() {
        log::debug!(
            "{} opacity at LOD: {:.3}",
            nebula.key,
            nebula.opacity_at_lod(view.lod.raw_level())
        );
    }

    Ok(())
}
