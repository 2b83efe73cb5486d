/*
 * Field Module
 *
 * The ParticleField owns every particle on the canvas. It is rebuilt
 * wholesale on every resize and provides the connect pass, which joins each
 * pair of particles closer than the connect distance with a line that fades
 * out as the pair moves apart.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::params::SimulationParams;
use crate::particle::Particle;
use crate::render::RenderTarget;
use crate::spatial_grid::SpatialGrid;

/// A pair of particles close enough to be joined by a line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    pub opacity: f32,
}

impl Connection {
    // Some(connection) when the pair lies strictly inside max_distance
    fn between(a: usize, b: usize, from: Vec2, to: Vec2, max_distance: f32) -> Option<Self> {
        let distance = from.distance(to);
        if distance < max_distance {
            Some(Self {
                a,
                b,
                distance,
                opacity: 1.0 - distance / max_distance,
            })
        } else {
            None
        }
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    spatial_grid: SpatialGrid,
}

impl ParticleField {
    // Build a fresh field for a width x height canvas
    pub fn initialize<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, params: &SimulationParams) -> Self {
        let count = params.particle_count(width, height);
        let particles = (0..count)
            .map(|_| Particle::random(rng, width, height, params))
            .collect();

        Self::from_particles(particles, width, height, params)
    }

    pub fn from_particles(particles: Vec<Particle>, width: f32, height: f32, params: &SimulationParams) -> Self {
        Self {
            particles,
            width,
            height,
            spatial_grid: SpatialGrid::new(params.connect_distance, width, height),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    // Every pair (a < b) closer than the connect distance
    pub fn connections(&mut self, params: &SimulationParams) -> Vec<Connection> {
        if params.enable_spatial_grid {
            self.connections_with_spatial_grid(params.connect_distance)
        } else {
            self.connections_brute_force(params.connect_distance)
        }
    }

    pub fn connections_brute_force(&self, max_distance: f32) -> Vec<Connection> {
        let mut result = Vec::new();

        for a in 0..self.particles.len() {
            for b in (a + 1)..self.particles.len() {
                let from = self.particles[a].position;
                let to = self.particles[b].position;
                if let Some(connection) = Connection::between(a, b, from, to, max_distance) {
                    result.push(connection);
                }
            }
        }

        result
    }

    pub fn connections_with_spatial_grid(&mut self, max_distance: f32) -> Vec<Connection> {
        // The grid's cells must be at least max_distance wide
        if self.spatial_grid.cell_size < max_distance {
            self.spatial_grid = SpatialGrid::new(max_distance, self.width, self.height);
        }
        self.spatial_grid
            .rebuild(self.particles.iter().map(|p| p.position));

        let mut result = Vec::new();

        for (a, particle) in self.particles.iter().enumerate() {
            let mut nearby = self.spatial_grid.get_nearby_indices(particle.position);
            nearby.retain(|&b| b > a);
            nearby.sort_unstable();

            for b in nearby {
                let to = self.particles[b].position;
                if let Some(connection) = Connection::between(a, b, particle.position, to, max_distance) {
                    result.push(connection);
                }
            }
        }

        result
    }

    // Draw a fading line for every close pair
    pub fn connect<T: RenderTarget + ?Sized>(&mut self, target: &mut T, params: &SimulationParams) -> usize {
        let connections = self.connections(params);

        for connection in &connections {
            let mut color = params.line_color;
            color.alpha = connection.opacity;

            target.set_stroke_color(color);
            target.set_line_width(params.line_width);
            target.stroke_line(
                self.particles[connection.a].position,
                self.particles[connection.b].position,
            );
        }

        connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CommandBuffer, DrawCommand};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field_of(points: &[(f32, f32)], params: &SimulationParams) -> ParticleField {
        let particles = points
            .iter()
            .map(|&(x, y)| Particle::new(vec2(x, y), 2.0, 5.0, params.particle_color))
            .collect();
        ParticleField::from_particles(particles, 500.0, 500.0, params)
    }

    fn pairs(connections: &[Connection]) -> Vec<(usize, usize)> {
        let mut pairs: Vec<_> = connections.iter().map(|c| (c.a, c.b)).collect();
        pairs.sort_unstable();
        pairs
    }

    #[test]
    fn initialize_produces_area_based_count_inside_canvas() {
        let params = SimulationParams::default();
        let mut rng = StdRng::seed_from_u64(3);
        let field = ParticleField::initialize(&mut rng, 1024.0, 768.0, &params);

        assert_eq!(field.len(), 87);
        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x < 1024.0);
            assert!(p.position.y >= 0.0 && p.position.y < 768.0);
        }
    }

    #[test]
    fn initialize_on_empty_canvas_is_empty() {
        let params = SimulationParams::default();
        let mut rng = StdRng::seed_from_u64(3);
        let field = ParticleField::initialize(&mut rng, 0.0, 768.0, &params);
        assert!(field.is_empty());
    }

    #[test]
    fn connects_only_pairs_closer_than_the_limit() {
        let params = SimulationParams::default();
        let field = field_of(&[(0.0, 0.0), (60.0, 80.0), (150.0, 80.0), (400.0, 400.0)], &params);

        let connections = field.connections_brute_force(100.0);

        // (0,1) is exactly 100 apart and must be skipped
        assert_eq!(pairs(&connections), vec![(1, 2)]);
        for c in &connections {
            assert!(c.distance < 100.0);
        }
    }

    #[test]
    fn opacity_is_one_at_zero_distance_and_fades_linearly() {
        let params = SimulationParams::default();
        let field = field_of(&[(10.0, 10.0), (10.0, 10.0), (10.0, 85.0), (10.0, 109.99)], &params);

        let connections = field.connections_brute_force(100.0);
        let find = |a, b| connections.iter().find(|c| c.a == a && c.b == b).copied();

        assert_eq!(find(0, 1).map(|c| c.opacity), Some(1.0));
        assert!((find(0, 2).map(|c| c.opacity).unwrap_or(0.0) - 0.25).abs() < 1e-6);
        let nearly_gone = find(0, 3).map(|c| c.opacity).unwrap_or(1.0);
        assert!(nearly_gone > 0.0 && nearly_gone < 0.001);
    }

    #[test]
    fn self_pairs_are_never_connected() {
        let params = SimulationParams::default();
        let field = field_of(&[(50.0, 50.0)], &params);
        assert!(field.connections_brute_force(100.0).is_empty());
    }

    #[test]
    fn spatial_grid_matches_brute_force() {
        let params = SimulationParams::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut field = ParticleField::initialize(&mut rng, 900.0, 700.0, &params);

        // Push a few particles off the canvas
        field.particles_mut()[0].position = vec2(-40.0, 20.0);
        field.particles_mut()[1].position = vec2(950.0, 760.0);
        field.particles_mut()[2].position = vec2(-10.0, 15.0);

        let brute = field.connections_brute_force(100.0);
        let grid = field.connections_with_spatial_grid(100.0);

        assert!(!brute.is_empty());
        assert_eq!(pairs(&brute), pairs(&grid));
    }

    #[test]
    fn spatial_grid_regrows_when_connect_distance_increases() {
        let params = SimulationParams::default();
        let mut field = field_of(&[(10.0, 10.0), (10.0, 200.0)], &params);

        assert!(field.connections_with_spatial_grid(100.0).is_empty());
        assert_eq!(pairs(&field.connections_with_spatial_grid(250.0)), vec![(0, 1)]);
    }

    #[test]
    fn connect_strokes_each_pair_with_faded_line_color() {
        let params = SimulationParams::default();
        let mut field = field_of(&[(0.0, 0.0), (0.0, 50.0)], &params);
        let mut buffer = CommandBuffer::new();

        let drawn = field.connect(&mut buffer, &params);

        let mut expected_color = params.line_color;
        expected_color.alpha = 0.5;
        assert_eq!(drawn, 1);
        assert_eq!(
            buffer.commands(),
            &[
                DrawCommand::SetStrokeColor(expected_color),
                DrawCommand::SetLineWidth(1.0),
                DrawCommand::StrokeLine { from: vec2(0.0, 0.0), to: vec2(0.0, 50.0) },
            ]
        );
    }
}
