/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * tunable values for the particle field. Defaults reproduce the classic
 * backdrop; the UI and command line can adjust them. It also provides change
 * detection so the app knows when the field must be rebuilt.
 */

use nannou::color::{rgba, Rgba};

use crate::error::ParamsError;
use crate::{AREA_PER_PARTICLE, CONNECT_DISTANCE, POINTER_RADIUS_DIVISOR};

// Parameters for the simulation that can be adjusted via UI
#[derive(Clone, Debug)]
pub struct SimulationParams {
    // Canvas area (px²) covered by one particle
    pub area_per_particle: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub min_density: f32,
    pub max_density: f32,
    // Multiplier applied to force * density when repelling
    pub repulsion_strength: f32,
    // Fraction of the offset from base recovered each tick
    pub relax_rate: f32,
    pub pointer_radius_divisor: f32,
    pub connect_distance: f32,
    pub line_width: f32,
    pub particle_color: Rgba,
    pub line_color: Rgba,
    pub backdrop_opacity: f32,
    pub dimmed_opacity: f32,
    pub show_debug: bool,
    pub pause_simulation: bool,
    // Performance settings
    pub enable_spatial_grid: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// Values whose change requires the particle field to be rebuilt
#[derive(Clone, Debug, PartialEq)]
struct ParamSnapshot {
    area_per_particle: f32,
    min_size: f32,
    max_size: f32,
    min_density: f32,
    max_density: f32,
    pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            area_per_particle: AREA_PER_PARTICLE,
            min_size: 1.0,
            max_size: 3.0,
            min_density: 1.0,
            max_density: 31.0,
            repulsion_strength: 0.3,
            relax_rate: 0.1,
            pointer_radius_divisor: POINTER_RADIUS_DIVISOR,
            connect_distance: CONNECT_DISTANCE,
            line_width: 1.0,
            particle_color: rgba(88.0 / 255.0, 166.0 / 255.0, 1.0, 0.8),
            line_color: rgba(88.0 / 255.0, 166.0 / 255.0, 1.0, 1.0),
            backdrop_opacity: 0.7,
            dimmed_opacity: 0.4,
            show_debug: false,
            pause_simulation: false,
            enable_spatial_grid: true,
            previous_values: None,
        }
    }
}

/// What changed between the last snapshot and now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParamChanges {
    /// The field must be rebuilt with fresh particles.
    pub rebuild_field: bool,
    /// The pause toggle flipped.
    pub pause_toggled: bool,
}

impl SimulationParams {
    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.snapshot());
    }

    fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            area_per_particle: self.area_per_particle,
            min_size: self.min_size,
            max_size: self.max_size,
            min_density: self.min_density,
            max_density: self.max_density,
            pause_simulation: self.pause_simulation,
        }
    }

    // Compare against the last snapshot; nothing has changed without one
    pub fn detect_changes(&self) -> ParamChanges {
        let Some(prev) = &self.previous_values else {
            return ParamChanges::default();
        };
        let current = self.snapshot();

        ParamChanges {
            rebuild_field: prev.area_per_particle != current.area_per_particle
                || prev.min_size != current.min_size
                || prev.max_size != current.max_size
                || prev.min_density != current.min_density
                || prev.max_density != current.max_density,
            pause_toggled: prev.pause_simulation != current.pause_simulation,
        }
    }

    /// Checks that every tunable is usable by the simulation.
    pub fn validate(&self) -> Result<(), ParamsError> {
        positive("area_per_particle", self.area_per_particle)?;
        positive("connect_distance", self.connect_distance)?;
        positive("pointer_radius_divisor", self.pointer_radius_divisor)?;
        positive("min_size", self.min_size)?;
        positive("min_density", self.min_density)?;
        positive("line_width", self.line_width)?;

        if !(self.relax_rate > 0.0 && self.relax_rate <= 1.0) {
            return Err(ParamsError::OutOfRange {
                name: "relax_rate",
                value: self.relax_rate,
                min: 0.0,
                max: 1.0,
            });
        }
        if !self.repulsion_strength.is_finite() || self.repulsion_strength < 0.0 {
            return Err(ParamsError::NotPositive {
                name: "repulsion_strength",
                value: self.repulsion_strength,
            });
        }
        if self.max_size < self.min_size {
            return Err(ParamsError::EmptyRange {
                name: "size",
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.max_density < self.min_density {
            return Err(ParamsError::EmptyRange {
                name: "density",
                min: self.min_density,
                max: self.max_density,
            });
        }
        Ok(())
    }

    /// Number of particles for a canvas of the given size.
    pub fn particle_count(&self, width: f32, height: f32) -> usize {
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return 0;
        }
        (width * height / self.area_per_particle).floor() as usize
    }

    /// Influence radius for a canvas of the given size.
    pub fn pointer_radius(&self, width: f32, height: f32) -> f32 {
        (height / self.pointer_radius_divisor) * (width / self.pointer_radius_divisor)
    }

    // Canvas opacity; the backdrop dims while the pointer is over the panel
    pub fn backdrop_for(&self, pointer_over_panel: bool) -> f32 {
        if pointer_over_panel {
            self.dimmed_opacity
        } else {
            self.backdrop_opacity
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_area_per_particle_range() -> std::ops::RangeInclusive<f32> {
        1000.0..=50000.0
    }

    pub fn get_connect_distance_range() -> std::ops::RangeInclusive<f32> {
        10.0..=300.0
    }

    pub fn get_repulsion_strength_range() -> std::ops::RangeInclusive<f32> {
        0.0..=2.0
    }

    pub fn get_relax_rate_range() -> std::ops::RangeInclusive<f32> {
        0.01..=1.0
    }

    pub fn get_density_range() -> std::ops::RangeInclusive<f32> {
        1.0..=100.0
    }

    pub fn get_size_range() -> std::ops::RangeInclusive<f32> {
        0.5..=10.0
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ParamsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParamsError::NotPositive { name, value })
    }
}
