/*
 * Simulator Module
 *
 * The Simulator owns the particle field and the pointer state and drives
 * one frame at a time. Each frame clears the canvas, updates and draws every
 * particle in turn, then runs a single connect pass over the whole field.
 *
 * The animation loop is an explicit task: start() requests the first frame,
 * every delivered frame requests its successor before doing any work, and
 * stop() withdraws whichever request is outstanding.
 */

use nannou::prelude::*;
use rand::rngs::StdRng;

use crate::field::ParticleField;
use crate::frame::{FrameClock, FrameId};
use crate::params::SimulationParams;
use crate::pointer::PointerState;
use crate::render::RenderTarget;

pub struct Simulator {
    field: ParticleField,
    pointer: PointerState,
    params: SimulationParams,
    rng: StdRng,
    width: f32,
    height: f32,
    pending_frame: Option<FrameId>,
    frames_rendered: u64,
    last_connections: usize,
}

impl Simulator {
    pub fn new(width: f32, height: f32, params: SimulationParams, mut rng: StdRng) -> Self {
        let field = ParticleField::initialize(&mut rng, width, height, &params);
        log::info!(
            "particle field created: {} particles on a {:.0}x{:.0} canvas",
            field.len(),
            width,
            height
        );

        Self {
            field,
            pointer: PointerState::default(),
            params,
            rng,
            width,
            height,
            pending_frame: None,
            frames_rendered: 0,
            last_connections: 0,
        }
    }

    // Replace every particle with a fresh random set for the current canvas
    pub fn initialize(&mut self) {
        self.field = ParticleField::initialize(&mut self.rng, self.width, self.height, &self.params);
        log::debug!("particle field rebuilt with {} particles", self.field.len());
    }

    // One frame: clear, update + draw each particle, then connect
    pub fn tick<T: RenderTarget + ?Sized>(&mut self, target: &mut T) {
        target.clear_rect(Vec2::ZERO, vec2(self.width, self.height));

        for particle in self.field.particles_mut() {
            particle.update(&self.pointer, &self.params);
            particle.draw(target);
        }

        self.last_connections = self.field.connect(target, &self.params);
        self.frames_rendered += 1;
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let radius = self.params.pointer_radius(self.width, self.height);
        if !self.pointer.is_present() {
            log::debug!("pointer entered canvas at ({:.0}, {:.0})", x, y);
        }
        self.pointer.enter(vec2(x, y), radius);
    }

    pub fn on_pointer_leave(&mut self) {
        if self.pointer.is_present() {
            log::debug!("pointer left canvas");
        }
        self.pointer.leave();
    }

    // Resizing discards all particles and rebuilds for the new canvas
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.initialize();
        log::info!(
            "canvas resized to {:.0}x{:.0}, {} particles",
            width,
            height,
            self.field.len()
        );
    }

    pub fn set_params(&mut self, params: SimulationParams) {
        self.params = params;
    }

    pub fn start<C: FrameClock + ?Sized>(&mut self, clock: &mut C) {
        if self.pending_frame.is_none() {
            self.pending_frame = Some(clock.request_frame());
            log::debug!("animation started");
        }
    }

    pub fn stop<C: FrameClock + ?Sized>(&mut self, clock: &mut C) {
        if let Some(id) = self.pending_frame.take() {
            clock.cancel_frame(id);
            log::debug!("animation stopped after {} frames", self.frames_rendered);
        }
    }

    // Handle a delivered frame; returns whether a tick ran
    pub fn on_frame<C, T>(&mut self, id: FrameId, clock: &mut C, target: &mut T) -> bool
    where
        C: FrameClock + ?Sized,
        T: RenderTarget + ?Sized,
    {
        if self.pending_frame != Some(id) {
            log::trace!("ignoring stale frame {:?}", id);
            return false;
        }

        self.pending_frame = Some(clock.request_frame());
        self.tick(target);
        true
    }

    pub fn is_running(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn last_connections(&self) -> usize {
        self.last_connections
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameQueue;
    use crate::render::{CommandBuffer, DrawCommand};
    use rand::SeedableRng;

    fn simulator(width: f32, height: f32) -> Simulator {
        Simulator::new(width, height, SimulationParams::default(), StdRng::seed_from_u64(9))
    }

    #[test]
    fn new_simulator_builds_field_for_canvas() {
        let sim = simulator(900.0, 600.0);
        assert_eq!(sim.field().len(), 60);
        assert!(!sim.pointer().is_present());
        assert!(!sim.is_running());
    }

    #[test]
    fn resize_discards_particles_and_rebuilds() {
        let mut sim = simulator(900.0, 600.0);
        let before: Vec<Vec2> = sim.field().particles().iter().map(|p| p.base()).collect();

        sim.on_resize(300.0, 300.0);

        assert_eq!(sim.field().len(), 10);
        assert_eq!(sim.field().width(), 300.0);
        for p in sim.field().particles() {
            assert!(p.position.x < 300.0 && p.position.y < 300.0);
        }
        let after: Vec<Vec2> = sim.field().particles().iter().map(|p| p.base()).collect();
        assert_ne!(before[..10], after[..]);
    }

    #[test]
    fn pointer_move_and_leave_follow_the_state_machine() {
        let mut sim = simulator(800.0, 400.0);

        sim.on_pointer_move(120.0, 80.0);
        assert_eq!(sim.pointer().position(), Some(vec2(120.0, 80.0)));
        assert_eq!(sim.pointer().radius(), 50.0);

        sim.on_pointer_leave();
        assert!(!sim.pointer().is_present());
        assert_eq!(sim.pointer().radius(), 50.0);
    }

    #[test]
    fn tick_clears_then_interleaves_update_and_draw_then_connects() {
        let mut sim = simulator(300.0, 300.0);
        let mut buffer = CommandBuffer::new();

        sim.tick(&mut buffer);

        let commands = buffer.commands();
        assert_eq!(
            commands[0],
            DrawCommand::ClearRect { origin: Vec2::ZERO, size: vec2(300.0, 300.0) }
        );

        let particle_count = sim.field().len();
        let circles = &commands[1..1 + particle_count * 2];
        for (pair, particle) in circles.chunks(2).zip(sim.field().particles()) {
            assert_eq!(pair[0], DrawCommand::SetFillColor(particle.color));
            assert_eq!(
                pair[1],
                DrawCommand::FillCircle { center: particle.position, radius: particle.size }
            );
        }

        assert_eq!(buffer.line_count(), sim.last_connections());
        assert_eq!(sim.frames_rendered(), 1);
    }

    #[test]
    fn ticks_without_pointer_keep_particles_at_rest() {
        let mut sim = simulator(600.0, 600.0);
        let mut buffer = CommandBuffer::new();

        for _ in 0..5 {
            buffer.clear();
            sim.tick(&mut buffer);
        }

        for p in sim.field().particles() {
            assert_eq!(p.position, p.base());
        }
    }

    #[test]
    fn pointer_displaces_nearby_particles_which_then_relax() {
        let mut sim = simulator(800.0, 800.0);
        let mut buffer = CommandBuffer::new();
        let target = sim.field().particles()[0].base();

        sim.on_pointer_move(target.x + 5.0, target.y);
        sim.tick(&mut buffer);
        let displaced = sim.field().particles()[0].position;
        assert!(displaced.x < target.x);

        sim.on_pointer_leave();
        let mut last = displaced.distance(target);
        for _ in 0..50 {
            sim.tick(&mut buffer);
            let now = sim.field().particles()[0].position.distance(target);
            assert!(now <= last);
            last = now;
        }
        assert!(last < 0.1);
    }

    #[test]
    fn frame_loop_requests_before_ticking_and_stops_cleanly() {
        let mut sim = simulator(300.0, 300.0);
        let mut clock = FrameQueue::new();
        let mut buffer = CommandBuffer::new();

        sim.start(&mut clock);
        sim.start(&mut clock);
        assert!(sim.is_running());
        assert_eq!(clock.pending(), 1);

        for _ in 0..3 {
            let id = clock.next_due().unwrap();
            assert!(sim.on_frame(id, &mut clock, &mut buffer));
            assert_eq!(clock.pending(), 1);
        }
        assert_eq!(sim.frames_rendered(), 3);

        sim.stop(&mut clock);
        assert!(!sim.is_running());
        assert_eq!(clock.next_due(), None);
        assert_eq!(sim.frames_rendered(), 3);
    }

    #[test]
    fn stale_frames_are_ignored() {
        let mut sim = simulator(300.0, 300.0);
        let mut clock = FrameQueue::new();
        let mut buffer = CommandBuffer::new();

        sim.start(&mut clock);
        let id = clock.next_due().unwrap();
        sim.stop(&mut clock);

        assert!(!sim.on_frame(id, &mut clock, &mut buffer));
        assert!(buffer.is_empty());
        assert_eq!(sim.frames_rendered(), 0);
    }
}
