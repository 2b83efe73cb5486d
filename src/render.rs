/*
 * Render Module
 *
 * This module defines the drawing surface the simulation renders into.
 * RenderTarget mirrors the small set of 2D canvas primitives the particle
 * field needs. Two implementations are provided:
 * - CommandBuffer records calls so a frame built during update can be
 *   replayed during view (and inspected in tests)
 * - NannouTarget draws onto a nannou Draw, converting canvas coordinates
 *   (origin top-left, y down) into window coordinates (origin centre, y up)
 */

use nannou::prelude::*;
use nannou::color::Rgba;

/// Canvas drawing primitives, in canvas coordinates.
///
/// Fill and stroke colors and the line width are state: they apply to every
/// following `fill_circle` / `stroke_line` until changed.
pub trait RenderTarget {
    fn clear_rect(&mut self, origin: Vec2, size: Vec2);
    fn set_fill_color(&mut self, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
    fn set_stroke_color(&mut self, color: Rgba);
    fn set_line_width(&mut self, width: f32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2);
}

/// A single recorded [`RenderTarget`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    ClearRect { origin: Vec2, size: Vec2 },
    SetFillColor(Rgba),
    FillCircle { center: Vec2, radius: f32 },
    SetStrokeColor(Rgba),
    SetLineWidth(f32),
    StrokeLine { from: Vec2, to: Vec2 },
}

#[derive(Clone, Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    // Re-issue every recorded call, in order
    pub fn replay<T: RenderTarget + ?Sized>(&self, target: &mut T) {
        for command in &self.commands {
            match *command {
                DrawCommand::ClearRect { origin, size } => target.clear_rect(origin, size),
                DrawCommand::SetFillColor(color) => target.set_fill_color(color),
                DrawCommand::FillCircle { center, radius } => target.fill_circle(center, radius),
                DrawCommand::SetStrokeColor(color) => target.set_stroke_color(color),
                DrawCommand::SetLineWidth(width) => target.set_line_width(width),
                DrawCommand::StrokeLine { from, to } => target.stroke_line(from, to),
            }
        }
    }

    /// Number of lines stroked in the recorded frame.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
            .count()
    }
}

impl RenderTarget for CommandBuffer {
    fn clear_rect(&mut self, origin: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::ClearRect { origin, size });
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::SetFillColor(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::FillCircle { center, radius });
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::SetStrokeColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::SetLineWidth(width));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::StrokeLine { from, to });
    }
}

// Converts between canvas space and nannou window space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasTransform {
    pub width: f32,
    pub height: f32,
}

impl CanvasTransform {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_window_rect(rect: Rect) -> Self {
        Self::new(rect.w(), rect.h())
    }

    // Convert a point from canvas space to window space
    pub fn canvas_to_window(&self, point: Vec2) -> Vec2 {
        vec2(point.x - self.width / 2.0, self.height / 2.0 - point.y)
    }

    // Convert a point from window space to canvas space
    pub fn window_to_canvas(&self, point: Vec2) -> Vec2 {
        vec2(point.x + self.width / 2.0, self.height / 2.0 - point.y)
    }
}

/// Draws onto a nannou [`Draw`], fading every color by the backdrop opacity.
pub struct NannouTarget<'a> {
    draw: &'a Draw,
    transform: CanvasTransform,
    opacity: f32,
    background: Rgba,
    fill: Rgba,
    stroke: Rgba,
    line_width: f32,
}

impl<'a> NannouTarget<'a> {
    pub fn new(draw: &'a Draw, transform: CanvasTransform, opacity: f32) -> Self {
        Self {
            draw,
            transform,
            opacity: opacity.clamp(0.0, 1.0),
            background: rgba(0.0, 0.0, 0.0, 1.0),
            fill: rgba(0.0, 0.0, 0.0, 1.0),
            stroke: rgba(0.0, 0.0, 0.0, 1.0),
            line_width: 1.0,
        }
    }

    fn faded(&self, color: Rgba) -> Rgba {
        let mut color = color;
        color.alpha *= self.opacity;
        color
    }
}

impl RenderTarget for NannouTarget<'_> {
    fn clear_rect(&mut self, origin: Vec2, size: Vec2) {
        let center = self.transform.canvas_to_window(origin + size / 2.0);
        self.draw.rect().xy(center).wh(size).color(self.background);
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.fill = self.faded(color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.draw
            .ellipse()
            .xy(self.transform.canvas_to_window(center))
            .radius(radius)
            .color(self.fill);
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.stroke = self.faded(color);
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.draw
            .line()
            .start(self.transform.canvas_to_window(from))
            .end(self.transform.canvas_to_window(to))
            .weight(self.line_width)
            .color(self.stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_maps_corners_and_round_trips() {
        let transform = CanvasTransform::new(800.0, 600.0);

        assert_eq!(transform.canvas_to_window(vec2(0.0, 0.0)), vec2(-400.0, 300.0));
        assert_eq!(transform.canvas_to_window(vec2(800.0, 600.0)), vec2(400.0, -300.0));
        assert_eq!(transform.canvas_to_window(vec2(400.0, 300.0)), vec2(0.0, 0.0));

        let p = vec2(123.5, 456.25);
        assert_eq!(transform.window_to_canvas(transform.canvas_to_window(p)), p);
    }

    #[test]
    fn replay_reissues_calls_in_order() {
        let color = rgba(0.1, 0.2, 0.3, 0.4);
        let mut source = CommandBuffer::new();
        source.clear_rect(vec2(0.0, 0.0), vec2(10.0, 10.0));
        source.set_fill_color(color);
        source.fill_circle(vec2(1.0, 2.0), 3.0);
        source.set_stroke_color(color);
        source.set_line_width(1.0);
        source.stroke_line(vec2(0.0, 0.0), vec2(5.0, 5.0));

        let mut copy = CommandBuffer::new();
        source.replay(&mut copy);

        assert_eq!(copy.commands(), source.commands());
        assert_eq!(copy.line_count(), 1);

        copy.clear();
        assert!(copy.is_empty());
    }

    #[test]
    fn nannou_target_fades_fill_and_stroke_by_backdrop_opacity() {
        let draw = Draw::new();
        let mut target = NannouTarget::new(&draw, CanvasTransform::new(800.0, 600.0), 0.4);

        target.set_fill_color(rgba(0.2, 0.4, 1.0, 0.8));
        target.set_stroke_color(rgba(0.2, 0.4, 1.0, 0.8));

        assert!((target.fill.alpha - 0.32).abs() < 1e-6);
        assert!((target.stroke.alpha - 0.32).abs() < 1e-6);
        assert_eq!(target.fill.red, 0.2);
    }

    #[test]
    fn nannou_target_clamps_opacity() {
        let draw = Draw::new();
        let mut target = NannouTarget::new(&draw, CanvasTransform::new(800.0, 600.0), 1.5);
        assert_eq!(target.opacity, 1.0);

        target.set_fill_color(rgba(0.0, 0.0, 0.0, 0.8));
        assert_eq!(target.fill.alpha, 0.8);
    }
}
