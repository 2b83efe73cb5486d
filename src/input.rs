/*
 * Input Module
 *
 * This module handles window events for the particle field.
 * Mouse positions arrive in nannou window space and are converted to canvas
 * space before reaching the simulator.
 *
 * Features:
 * - Pointer tracking on move (entering the window only counts once the
 *   first move reports a position)
 * - Clearing the pointer when it leaves the window
 * - Rebuilding the field when the window is resized
 * - Forwarding raw events to egui
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::render::CanvasTransform;

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    let canvas = CanvasTransform::from_window_rect(app.window_rect()).window_to_canvas(pos);
    model.simulator.on_pointer_move(canvas.x, canvas.y);
}

// Mouse exited event handler
pub fn mouse_exited(_app: &App, model: &mut Model) {
    model.simulator.on_pointer_leave();
}

// Window resized event handler
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.simulator.on_resize(size.x, size.y);
    model.commands.clear();
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
