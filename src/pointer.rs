/*
 * Pointer Module
 *
 * Tracks the mouse pointer relative to the canvas. The pointer is either
 * absent (it left the canvas) or present at canvas coordinates. The influence
 * radius is refreshed on every enter/move and kept across a leave.
 */

use nannou::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    position: Option<Vec2>,
    radius: f32,
}

impl PointerState {
    // Pointer entered or moved over the canvas
    pub fn enter(&mut self, position: Vec2, radius: f32) {
        self.position = Some(position);
        self.radius = radius;
    }

    // Pointer left the canvas; radius stays as last computed
    pub fn leave(&mut self) {
        self.position = None;
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_present(&self) -> bool {
        self.position.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_absent() {
        let pointer = PointerState::default();
        assert!(!pointer.is_present());
        assert_eq!(pointer.position(), None);
        assert_eq!(pointer.radius(), 0.0);
    }

    #[test]
    fn leave_clears_position_but_keeps_radius() {
        let mut pointer = PointerState::default();
        pointer.enter(vec2(10.0, 20.0), 64.0);
        assert!(pointer.is_present());
        assert_eq!(pointer.position(), Some(vec2(10.0, 20.0)));

        pointer.leave();
        assert!(!pointer.is_present());
        assert_eq!(pointer.radius(), 64.0);

        pointer.enter(vec2(1.0, 2.0), 32.0);
        assert_eq!(pointer.position(), Some(vec2(1.0, 2.0)));
        assert_eq!(pointer.radius(), 32.0);
    }
}
