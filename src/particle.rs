/*
 * Particle Module
 *
 * This module defines the Particle struct and its behavior.
 * Each particle follows two rules:
 * 1. Repulsion: Move away from the pointer while it is within the influence radius
 * 2. Relaxation: Otherwise drift back toward the rest (base) position
 */

use nannou::prelude::*;
use nannou::color::Rgba;
use rand::Rng;

use crate::params::SimulationParams;
use crate::pointer::PointerState;
use crate::render::RenderTarget;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    base: Vec2,
    pub size: f32,
    pub density: f32,
    pub color: Rgba,
}

impl Particle {
    pub fn new(position: Vec2, size: f32, density: f32, color: Rgba) -> Self {
        Self {
            position,
            base: position,
            size,
            density,
            color,
        }
    }

    // Sample a particle uniformly inside a width x height canvas
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, params: &SimulationParams) -> Self {
        let x = rng.gen_range(0.0..width);
        let y = rng.gen_range(0.0..height);
        let size = sample(rng, params.min_size, params.max_size);
        let density = sample(rng, params.min_density, params.max_density);

        Self::new(vec2(x, y), size, density, params.particle_color)
    }

    /// The rest position this particle relaxes toward.
    pub fn base(&self) -> Vec2 {
        self.base
    }

    // Update the particle's position based on pointer proximity
    pub fn update(&mut self, pointer: &PointerState, params: &SimulationParams) {
        if let Some(target) = pointer.position() {
            let delta = target - self.position;
            let distance = delta.length();

            if distance < pointer.radius() {
                self.repel(delta, distance, pointer.radius(), params.repulsion_strength);
                return;
            }
        }

        self.relax(params.relax_rate);
    }

    // Push away from the pointer; a coincident pointer gives no direction
    fn repel(&mut self, delta: Vec2, distance: f32, radius: f32, strength: f32) {
        if distance <= f32::EPSILON {
            return;
        }

        let direction = delta / distance;
        let force = (radius - distance) / radius;
        self.position -= direction * force * self.density * strength;
    }

    // Move a fixed fraction of the remaining offset back toward base, per axis
    fn relax(&mut self, rate: f32) {
        if self.position.x != self.base.x {
            self.position.x -= (self.position.x - self.base.x) * rate;
        }
        if self.position.y != self.base.y {
            self.position.y -= (self.position.y - self.base.y) * rate;
        }
    }

    // Draw the particle
    pub fn draw<T: RenderTarget + ?Sized>(&self, target: &mut T) {
        target.set_fill_color(self.color);
        target.fill_circle(self.position, self.size);
    }
}

// A collapsed range yields its lower bound
fn sample<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}
