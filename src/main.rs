/*
 * Particle Field
 *
 * An animated backdrop of particles anchored to rest positions. Particles
 * near the mouse pointer are pushed away and drift back once it moves on,
 * and nearby particles are joined by lines that fade with distance.
 *
 * Set RUST_LOG=debug to follow pointer and lifecycle events.
 */

use clap::Parser;
use nannou::prelude::*;

use particle_field::app::{self, Model, Settings};
use particle_field::SimulationParams;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Initial window width in pixels (default: 80% of the monitor)
    #[arg(long)]
    width: Option<u32>,

    /// Initial window height in pixels (default: 80% of the monitor)
    #[arg(long)]
    height: Option<u32>,

    /// Seed for a reproducible particle layout
    #[arg(long)]
    seed: Option<u64>,

    /// Canvas area in px² per particle
    #[arg(long)]
    area_per_particle: Option<f32>,

    /// Maximum distance at which particles are connected
    #[arg(long)]
    connect_distance: Option<f32>,

    /// Use the brute-force connect pass instead of the spatial grid
    #[arg(long)]
    no_spatial_grid: bool,

    /// Show the debug overlay on start
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn into_settings(self) -> Settings {
        let mut params = SimulationParams::default();
        if let Some(area) = self.area_per_particle {
            params.area_per_particle = area;
        }
        if let Some(distance) = self.connect_distance {
            params.connect_distance = distance;
        }
        params.enable_spatial_grid = !self.no_spatial_grid;
        params.show_debug = self.debug;

        if let Err(err) = params.validate() {
            log::warn!("{}; falling back to default parameters", err);
            params = SimulationParams::default();
            params.enable_spatial_grid = !self.no_spatial_grid;
            params.show_debug = self.debug;
        }

        Settings {
            width: self.width,
            height: self.height,
            seed: self.seed,
            params,
        }
    }
}

fn main() {
    env_logger::init();
    nannou::app(model).update(app::update).run();
}

fn model(nannou_app: &App) -> Model {
    let settings = Args::parse().into_settings();
    log::info!("starting particle field with {:?}", settings);
    app::model(nannou_app, settings)
}
