/*
 * Application Module
 *
 * This module defines the main application model for the particle field.
 * It hosts the simulator in a nannou window:
 * - update() runs the egui panel and fires at most one due frame, recording
 *   that frame's draw calls into a command buffer
 * - view() replays the recorded frame onto the window
 *
 * nannou's refresh loop acts as the display clock behind the FrameQueue.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::debug::DebugInfo;
use crate::frame::FrameQueue;
use crate::input;
use crate::params::SimulationParams;
use crate::render::{CanvasTransform, CommandBuffer, NannouTarget};
use crate::simulator::Simulator;
use crate::ui;

// Startup options gathered from the command line
#[derive(Clone, Debug, Default)]
pub struct Settings {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub seed: Option<u64>,
    pub params: SimulationParams,
}

// Main model for the application
pub struct Model {
    pub simulator: Simulator,
    pub frames: FrameQueue,
    pub commands: CommandBuffer,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub opacity: f32,
}

// Initialize the model
pub fn model(app: &App, settings: Settings) -> Model {
    // Default to 80% of the primary monitor
    let (default_width, default_height) = match app.primary_monitor() {
        Some(monitor) => {
            let size = monitor.size();
            ((size.width as f32 * 0.8) as u32, (size.height as f32 * 0.8) as u32)
        }
        None => {
            log::warn!("no primary monitor found, using 1280x720");
            (1280, 720)
        }
    };
    let window_width = settings.width.unwrap_or(default_width);
    let window_height = settings.height.unwrap_or(default_height);

    // Create the main window
    let window_id = app
        .new_window()
        .title("Particle Field")
        .size(window_width, window_height)
        .view(view)
        .mouse_moved(input::mouse_moved)
        .mouse_exited(input::mouse_exited)
        .resized(input::resized)
        .raw_event(input::raw_window_event)
        .build()
        .expect("failed to build window");

    let window = app.window(window_id).expect("window was just created");
    let egui = Egui::from_window(&window);

    // Size the canvas from the window actually created
    let rect = window.rect();
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let params = settings.params;
    let mut simulator = Simulator::new(rect.w(), rect.h(), params.clone(), rng);
    let mut frames = FrameQueue::new();
    if !params.pause_simulation {
        simulator.start(&mut frames);
    }

    Model {
        simulator,
        frames,
        commands: CommandBuffer::new(),
        opacity: params.backdrop_opacity,
        params,
        egui,
        debug_info: DebugInfo::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let response = ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    model.opacity = model.params.backdrop_for(response.pointer_over_panel);

    if let Err(err) = model.params.validate() {
        log::warn!("ignoring invalid parameters: {}", err);
    } else {
        model.simulator.set_params(model.params.clone());
        if response.rebuild_requested || response.changes.rebuild_field {
            model.simulator.initialize();
        }
    }

    if response.changes.pause_toggled {
        if model.params.pause_simulation {
            model.simulator.stop(&mut model.frames);
        } else {
            model.simulator.start(&mut model.frames);
        }
    }

    // One frame per refresh; a paused simulator keeps showing its last frame
    if let Some(id) = model.frames.next_due() {
        let mut frame = CommandBuffer::new();
        if model.simulator.on_frame(id, &mut model.frames, &mut frame) {
            model.commands = frame;
        }
    }

    model.debug_info.record(&model.simulator);
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let mut target = NannouTarget::new(&draw, CanvasTransform::from_window_rect(window_rect), model.opacity);
    model.commands.replay(&mut target);

    if model.params.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        log::error!("failed to draw frame: {:?}", err);
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        log::error!("failed to draw ui: {:?}", err);
    }
}
