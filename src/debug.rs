/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and simulation statistics displayed in the UI.
 *
 * Includes metrics for:
 * - FPS (frames per second)
 * - Frame time
 * - Particle and connection counts
 * - Pointer state
 */

use std::time::Duration;

use crate::simulator::Simulator;

// Debug information to display
#[derive(Clone, Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub particles: usize,
    pub connections: usize,
    pub frames_rendered: u64,
    pub pointer: Option<(f32, f32)>,
    pub pointer_radius: f32,
    pub running: bool,
}

impl DebugInfo {
    // Refresh the simulation statistics after a frame
    pub fn record(&mut self, simulator: &Simulator) {
        self.particles = simulator.field().len();
        self.connections = simulator.last_connections();
        self.frames_rendered = simulator.frames_rendered();
        self.pointer = simulator.pointer().position().map(|p| (p.x, p.y));
        self.pointer_radius = simulator.pointer().radius();
        self.running = simulator.is_running();
    }

    pub fn lines(&self) -> Vec<String> {
        let pointer = match self.pointer {
            Some((x, y)) => format!("({:.0}, {:.0}) r={:.1}", x, y, self.pointer_radius),
            None => "absent".to_string(),
        };

        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Particles: {}", self.particles),
            format!("Connections: {}", self.connections),
            format!("Frames: {}", self.frames_rendered),
            format!("Pointer: {}", pointer),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SimulationParams;
    use crate::render::CommandBuffer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn record_copies_simulator_statistics() {
        let mut sim = Simulator::new(300.0, 300.0, SimulationParams::default(), StdRng::seed_from_u64(1));
        sim.on_pointer_move(10.0, 20.0);
        sim.tick(&mut CommandBuffer::new());

        let mut info = DebugInfo::default();
        info.record(&sim);

        assert_eq!(info.particles, 10);
        assert_eq!(info.frames_rendered, 1);
        assert_eq!(info.pointer, Some((10.0, 20.0)));
        assert!(!info.running);
        assert_eq!(info.lines()[5], "Pointer: (10, 20) r=14.1");
    }
}
