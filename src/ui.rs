/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for adjusting simulation parameters.
 * Parameter change detection is handled by the SimulationParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{ParamChanges, SimulationParams};

// What the app has to act on after the panel ran this frame
#[derive(Clone, Copy, Debug, Default)]
pub struct UiResponse {
    pub rebuild_requested: bool,
    pub changes: ParamChanges,
    // Pointer is over the panel, so the backdrop should dim
    pub pointer_over_panel: bool,
}

pub fn update_ui(egui: &mut Egui, params: &mut SimulationParams, debug_info: &DebugInfo) -> UiResponse {
    let mut rebuild_requested = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Particle Field")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Particles", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.area_per_particle, SimulationParams::get_area_per_particle_range())
                        .text("Area per Particle"),
                );
                ui.add(
                    egui::Slider::new(&mut params.min_size, SimulationParams::get_size_range())
                        .text("Min Size"),
                );
                ui.add(
                    egui::Slider::new(&mut params.max_size, SimulationParams::get_size_range())
                        .text("Max Size"),
                );
                ui.add(
                    egui::Slider::new(&mut params.min_density, SimulationParams::get_density_range())
                        .text("Min Density"),
                );
                ui.add(
                    egui::Slider::new(&mut params.max_density, SimulationParams::get_density_range())
                        .text("Max Density"),
                );

                if ui.button("Rebuild Field").clicked() {
                    rebuild_requested = true;
                }
            });

            ui.collapsing("Motion", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.repulsion_strength, SimulationParams::get_repulsion_strength_range())
                        .text("Repulsion Strength"),
                );
                ui.add(
                    egui::Slider::new(&mut params.relax_rate, SimulationParams::get_relax_rate_range())
                        .text("Relax Rate"),
                );
            });

            ui.collapsing("Connections", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.connect_distance, SimulationParams::get_connect_distance_range())
                        .text("Connect Distance"),
                );
                ui.checkbox(&mut params.enable_spatial_grid, "Enable Spatial Grid");
            });

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Particles: {}", debug_info.particles));
            ui.label(format!("Connections: {}", debug_info.connections));

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    // Keep the sampling ranges non-empty while dragging the sliders
    if params.max_size < params.min_size {
        params.max_size = params.min_size;
    }
    if params.max_density < params.min_density {
        params.max_density = params.min_density;
    }

    UiResponse {
        rebuild_requested,
        changes: params.detect_changes(),
        pointer_over_panel: ctx.is_pointer_over_area(),
    }
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let lines = debug_info.lines();

    // Background panel in the bottom-left corner, clear of the controls
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.bottom() + panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.bottom() + panel_height - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(text_x + 80.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
